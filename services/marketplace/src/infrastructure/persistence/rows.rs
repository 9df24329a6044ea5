//! 数据库行结构
//!
//! 连接池仓储与事务仓储共用的 `sqlx::FromRow` 映射。
//! 列名与迁移脚本保持一致，字段到实体的转换集中在这里。

use chrono::{DateTime, Utc};
use mande_common::UserId;
use mande_domain_core::Coordinate;
use uuid::Uuid;

use crate::domain::entities::{Customer, Job, Listing, ServiceOrder, UserProfile, Worker};
use crate::domain::value_objects::{
    CustomerId, JobId, ListingId, OrderId, RatingAggregate, WorkerId,
};

/// users 表行
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserProfileRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub photo: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl UserProfileRow {
    /// 坐标列要么成对出现要么全空，半残行视为坏数据
    pub fn into_profile(self) -> Result<UserProfile, String> {
        let coordinate = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(
                Coordinate::new(lat, lon)
                    .map_err(|e| format!("Invalid coordinate for user {}: {}", self.id, e))?,
            ),
            (None, None) => None,
            _ => {
                return Err(format!(
                    "User {} has a partial coordinate pair",
                    self.id
                ));
            }
        };

        Ok(UserProfile::from_parts(
            UserId::from_uuid(self.id),
            self.first_name,
            self.last_name,
            self.email,
            self.phone,
            self.photo,
            self.address,
            coordinate,
            self.created_at,
        ))
    }
}

/// workers 表行
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct WorkerRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_available: bool,
    pub rating_sum: f64,
    pub rating_count: i64,
}

impl WorkerRow {
    pub fn into_worker(self) -> Worker {
        Worker::from_parts(
            WorkerId::from_uuid(self.id),
            UserId::from_uuid(self.user_id),
            self.is_available,
            RatingAggregate::new(self.rating_sum, self.rating_count),
        )
    }
}

/// customers 表行
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CustomerRow {
    pub id: Uuid,
    pub user_id: Uuid,
}

impl CustomerRow {
    pub fn into_customer(self) -> Customer {
        Customer::from_parts(CustomerId::from_uuid(self.id), UserId::from_uuid(self.user_id))
    }
}

/// jobs 表行
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub name: String,
}

impl JobRow {
    pub fn into_job(self) -> Job {
        Job::from_parts(JobId::from_uuid(self.id), self.name)
    }
}

/// worker_jobs 表行
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ListingRow {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub job_id: Uuid,
    pub price: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl ListingRow {
    pub fn into_listing(self) -> Listing {
        Listing::from_parts(
            ListingId::from_uuid(self.id),
            WorkerId::from_uuid(self.worker_id),
            JobId::from_uuid(self.job_id),
            self.price,
            self.description,
            self.created_at,
        )
    }
}

/// service_orders 表行
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub worker_job_id: Uuid,
    pub date: DateTime<Utc>,
    pub status: bool,
    pub hours: f64,
    pub cost: f64,
    pub rating: Option<f64>,
    pub description: String,
}

impl OrderRow {
    pub fn into_order(self) -> ServiceOrder {
        ServiceOrder::from_parts(
            OrderId::from_uuid(self.id),
            CustomerId::from_uuid(self.customer_id),
            ListingId::from_uuid(self.worker_job_id),
            self.date,
            self.status,
            self.hours,
            self.cost,
            self.rating,
            self.description,
        )
    }
}

//! 市场查询处理器
//!
//! 只读路径，直接走连接池仓储，不开事务。报价列表在这里拼装
//! 距离标注：双方坐标都已知才计算，查询方缺坐标时先拿存档地址
//! 做一次地理编码兜底，兜底失败只降级为空距离，不让整个请求失败。

use std::sync::Arc;

use async_trait::async_trait;
use mande_adapter_geocode::Geocoder;
use mande_cqrs_core::QueryHandler;
use mande_domain_core::Coordinate;
use mande_errors::{AppError, AppResult};
use tracing::{info, warn};

use crate::application::dto::{JobRecord, ListingRecord, OrderRecord};
use crate::application::queries::{
    ListJobsQuery, ListListingsQuery, ListOrdersQuery, OrderRole,
};
use crate::domain::entities::{ServiceOrder, UserProfile};
use crate::domain::repositories::{
    CustomerRepository, JobRepository, ListingRepository, OrderRepository, UserProfileRepository,
    WorkerRepository,
};
use crate::error::MarketplaceError;

/// 工种目录查询处理器
pub struct ListJobsHandler {
    job_repo: Arc<dyn JobRepository>,
}

impl ListJobsHandler {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }
}

#[async_trait]
impl QueryHandler<ListJobsQuery> for ListJobsHandler {
    async fn handle(&self, _query: ListJobsQuery) -> AppResult<Vec<JobRecord>> {
        let jobs = self.job_repo.find_all().await?;

        Ok(jobs
            .into_iter()
            .map(|job| JobRecord {
                id: job.id().to_string(),
                name: job.name().to_string(),
            })
            .collect())
    }
}

/// 报价列表查询处理器
pub struct ListListingsHandler {
    listing_repo: Arc<dyn ListingRepository>,
    worker_repo: Arc<dyn WorkerRepository>,
    user_repo: Arc<dyn UserProfileRepository>,
    job_repo: Arc<dyn JobRepository>,
    geocoder: Arc<dyn Geocoder>,
}

impl ListListingsHandler {
    pub fn new(
        listing_repo: Arc<dyn ListingRepository>,
        worker_repo: Arc<dyn WorkerRepository>,
        user_repo: Arc<dyn UserProfileRepository>,
        job_repo: Arc<dyn JobRepository>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        Self {
            listing_repo,
            worker_repo,
            user_repo,
            job_repo,
            geocoder,
        }
    }

    /// 查询方的参照坐标：优先存档坐标，缺失时用地址做一次地理编码
    async fn viewer_coordinate(&self, viewer: &UserProfile) -> Option<Coordinate> {
        if let Some(coordinate) = viewer.coordinate() {
            return Some(coordinate);
        }

        let address = viewer.address()?;
        match self.geocoder.geocode(address).await {
            Ok(Some(location)) => {
                Coordinate::new(location.latitude, location.longitude).ok()
            }
            Ok(None) => None,
            Err(e) => {
                warn!(
                    viewer_id = %viewer.id(),
                    error = %e,
                    "Viewer address could not be geocoded, distances omitted"
                );
                None
            }
        }
    }
}

#[async_trait]
impl QueryHandler<ListListingsQuery> for ListListingsHandler {
    async fn handle(&self, query: ListListingsQuery) -> AppResult<Vec<ListingRecord>> {
        let viewer_id = query.viewer_id()?;
        info!(viewer_id = %viewer_id, "Handling ListListingsQuery");

        let viewer = self
            .user_repo
            .find_by_id(&viewer_id)
            .await?
            .ok_or(MarketplaceError::UserNotFound(viewer_id))?;

        let viewer_coordinate = self.viewer_coordinate(&viewer).await;

        let listings = self.listing_repo.find_all().await?;
        let mut records = Vec::with_capacity(listings.len());

        for listing in listings {
            // 外键保证下面三个关联行都在；缺了说明库被外部改坏
            let worker = self
                .worker_repo
                .find_by_id(listing.worker_id())
                .await?
                .ok_or_else(|| {
                    AppError::internal(format!(
                        "Listing {} references missing worker {}",
                        listing.id(),
                        listing.worker_id()
                    ))
                })?;
            let worker_user = self
                .user_repo
                .find_by_id(worker.user_id())
                .await?
                .ok_or_else(|| {
                    AppError::internal(format!(
                        "Worker {} references missing user {}",
                        worker.id(),
                        worker.user_id()
                    ))
                })?;
            let job = self
                .job_repo
                .find_by_id(listing.job_id())
                .await?
                .ok_or_else(|| {
                    AppError::internal(format!(
                        "Listing {} references missing job {}",
                        listing.id(),
                        listing.job_id()
                    ))
                })?;

            let distance = match (viewer_coordinate, worker_user.coordinate()) {
                (Some(viewer_coord), Some(worker_coord)) => {
                    Some(viewer_coord.distance_km(&worker_coord))
                }
                _ => None,
            };

            records.push(ListingRecord {
                id_worker: worker.id().to_string(),
                first_name: worker_user.first_name().to_string(),
                last_name: worker_user.last_name().to_string(),
                email: worker_user.email().to_string(),
                phone: worker_user.phone().to_string(),
                worker_available: worker.is_available(),
                job: job.name().to_string(),
                price: listing.price(),
                description: listing.description().to_string(),
                distance,
                rating: worker.rating().mean(),
                photo: worker_user.photo().map(str::to_string),
            });
        }

        Ok(records)
    }
}

/// 服务工单列表查询处理器
pub struct ListOrdersHandler {
    order_repo: Arc<dyn OrderRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    worker_repo: Arc<dyn WorkerRepository>,
    listing_repo: Arc<dyn ListingRepository>,
    job_repo: Arc<dyn JobRepository>,
    user_repo: Arc<dyn UserProfileRepository>,
}

impl ListOrdersHandler {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        worker_repo: Arc<dyn WorkerRepository>,
        listing_repo: Arc<dyn ListingRepository>,
        job_repo: Arc<dyn JobRepository>,
        user_repo: Arc<dyn UserProfileRepository>,
    ) -> Self {
        Self {
            order_repo,
            customer_repo,
            worker_repo,
            listing_repo,
            job_repo,
            user_repo,
        }
    }

    async fn build_record(&self, order: &ServiceOrder) -> AppResult<OrderRecord> {
        let listing = self
            .listing_repo
            .find_by_id(order.listing_id())
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Order {} references missing listing {}",
                    order.id(),
                    order.listing_id()
                ))
            })?;
        let job = self
            .job_repo
            .find_by_id(listing.job_id())
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Listing {} references missing job {}",
                    listing.id(),
                    listing.job_id()
                ))
            })?;
        let worker = self
            .worker_repo
            .find_by_id(listing.worker_id())
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Listing {} references missing worker {}",
                    listing.id(),
                    listing.worker_id()
                ))
            })?;
        let worker_user = self
            .user_repo
            .find_by_id(worker.user_id())
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Worker {} references missing user {}",
                    worker.id(),
                    worker.user_id()
                ))
            })?;
        let customer = self
            .customer_repo
            .find_by_id(order.customer_id())
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Order {} references missing customer {}",
                    order.id(),
                    order.customer_id()
                ))
            })?;
        let customer_user = self
            .user_repo
            .find_by_id(customer.user_id())
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Customer {} references missing user {}",
                    customer.id(),
                    customer.user_id()
                ))
            })?;

        Ok(OrderRecord {
            id: order.id().to_string(),
            customer_name: customer_user.first_name().to_string(),
            customer_last_name: customer_user.last_name().to_string(),
            customer_email: customer_user.email().to_string(),
            customer_phone: customer_user.phone().to_string(),
            worker_name: worker_user.first_name().to_string(),
            worker_last_name: worker_user.last_name().to_string(),
            worker_email: worker_user.email().to_string(),
            worker_phone: worker_user.phone().to_string(),
            job: job.name().to_string(),
            price: listing.price(),
            hours: order.hours(),
            cost: order.cost(),
            status: order.is_open(),
            date: order.date(),
            description: order.description().to_string(),
        })
    }
}

#[async_trait]
impl QueryHandler<ListOrdersQuery> for ListOrdersHandler {
    async fn handle(&self, query: ListOrdersQuery) -> AppResult<Vec<OrderRecord>> {
        let role = query.role()?;
        let user_id = query.user_id()?;
        info!(role = ?role, user_id = %user_id, "Handling ListOrdersQuery");

        let orders = match role {
            OrderRole::Customer => {
                let customer = self
                    .customer_repo
                    .find_by_user_id(&user_id)
                    .await?
                    .ok_or(MarketplaceError::CustomerNotFound(user_id))?;
                self.order_repo.find_by_customer(customer.id()).await?
            }
            OrderRole::Worker => {
                let worker = self
                    .worker_repo
                    .find_by_user_id(&user_id)
                    .await?
                    .ok_or(MarketplaceError::WorkerNotFoundForUser(user_id))?;
                // 覆盖该工人全部报价下的工单，而非某一条
                self.order_repo.find_by_worker(worker.id()).await?
            }
        };

        let mut records = Vec::with_capacity(orders.len());
        for order in &orders {
            records.push(self.build_record(order).await?);
        }

        Ok(records)
    }
}

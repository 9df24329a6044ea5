//! 事务感知的 Repository 实现
//!
//! 这些 Repository 使用共享的 Transaction 而非 PgPool，
//! 同一工作单元内的读写落在同一事务里。

use async_trait::async_trait;
use mande_common::UserId;
use mande_errors::{AppError, AppResult};
use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::{Customer, Job, Listing, ServiceOrder, UserProfile, Worker};
use crate::domain::repositories::{
    CustomerRepository, JobRepository, ListingRepository, OrderRepository, UserProfileRepository,
    WorkerRepository,
};
use crate::domain::value_objects::{CustomerId, JobId, ListingId, OrderId, WorkerId};

use super::rows::{CustomerRow, JobRow, ListingRow, OrderRow, UserProfileRow, WorkerRow};

/// 共享事务类型
type SharedTx = Arc<Mutex<Option<Transaction<'static, Postgres>>>>;

/// 宏：定义一个简单的 TxRepository 结构体
macro_rules! define_tx_repo {
    ($name:ident) => {
        pub struct $name {
            tx: SharedTx,
        }

        impl $name {
            pub fn new(tx: SharedTx) -> Self {
                Self { tx }
            }
        }
    };
}

define_tx_repo!(TxUserProfileRepository);
define_tx_repo!(TxWorkerRepository);
define_tx_repo!(TxCustomerRepository);
define_tx_repo!(TxJobRepository);
define_tx_repo!(TxListingRepository);
define_tx_repo!(TxOrderRepository);

// =============================================================================
// UserProfileRepository 实现
// =============================================================================

#[async_trait]
impl UserProfileRepository for TxUserProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<UserProfile>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, UserProfileRow>(
            r#"
            SELECT id, first_name, last_name, email, phone, photo, address,
                   latitude, longitude, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        match row {
            Some(r) => Ok(Some(r.into_profile().map_err(AppError::database)?)),
            None => Ok(None),
        }
    }
}

// =============================================================================
// WorkerRepository 实现
// =============================================================================

#[async_trait]
impl WorkerRepository for TxWorkerRepository {
    async fn find_by_id(&self, id: &WorkerId) -> AppResult<Option<Worker>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, WorkerRow>(
            "SELECT id, user_id, is_available, rating_sum, rating_count FROM workers WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to find worker: {}", e)))?;

        Ok(row.map(WorkerRow::into_worker))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AppResult<Option<Worker>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, WorkerRow>(
            r#"
            SELECT id, user_id, is_available, rating_sum, rating_count
            FROM workers
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to find worker by user: {}", e)))?;

        Ok(row.map(WorkerRow::into_worker))
    }

    /// 行锁持有到事务提交，并发的预订与释放在此串行化
    async fn lock_by_id(&self, id: &WorkerId) -> AppResult<Option<Worker>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, WorkerRow>(
            r#"
            SELECT id, user_id, is_available, rating_sum, rating_count
            FROM workers
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.0)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to lock worker: {}", e)))?;

        Ok(row.map(WorkerRow::into_worker))
    }

    async fn update(&self, worker: &Worker) -> AppResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        sqlx::query(
            r#"
            UPDATE workers
            SET is_available = $1, rating_sum = $2, rating_count = $3
            WHERE id = $4
            "#,
        )
        .bind(worker.is_available())
        .bind(worker.rating().sum())
        .bind(worker.rating().count())
        .bind(worker.id().0)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update worker: {}", e)))?;

        Ok(())
    }
}

// =============================================================================
// CustomerRepository 实现
// =============================================================================

#[async_trait]
impl CustomerRepository for TxCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> AppResult<Option<Customer>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, user_id FROM customers WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to find customer: {}", e)))?;

        Ok(row.map(CustomerRow::into_customer))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AppResult<Option<Customer>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, user_id FROM customers WHERE user_id = $1",
        )
        .bind(user_id.0)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to find customer by user: {}", e)))?;

        Ok(row.map(CustomerRow::into_customer))
    }
}

// =============================================================================
// JobRepository 实现
// =============================================================================

#[async_trait]
impl JobRepository for TxJobRepository {
    async fn find_all(&self) -> AppResult<Vec<Job>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let rows = sqlx::query_as::<_, JobRow>("SELECT id, name FROM jobs ORDER BY name")
            .fetch_all(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to list jobs: {}", e)))?;

        Ok(rows.into_iter().map(JobRow::into_job).collect())
    }

    async fn find_by_id(&self, id: &JobId) -> AppResult<Option<Job>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, JobRow>("SELECT id, name FROM jobs WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to find job: {}", e)))?;

        Ok(row.map(JobRow::into_job))
    }
}

// =============================================================================
// ListingRepository 实现
// =============================================================================

#[async_trait]
impl ListingRepository for TxListingRepository {
    async fn find_by_id(&self, id: &ListingId) -> AppResult<Option<Listing>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, worker_id, job_id, price, description, created_at
            FROM worker_jobs
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to find worker job: {}", e)))?;

        Ok(row.map(ListingRow::into_listing))
    }

    async fn find_all(&self) -> AppResult<Vec<Listing>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, worker_id, job_id, price, description, created_at
            FROM worker_jobs
            ORDER BY created_at
            "#,
        )
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to list worker jobs: {}", e)))?;

        Ok(rows.into_iter().map(ListingRow::into_listing).collect())
    }

    async fn find_by_worker_and_job(
        &self,
        worker_id: &WorkerId,
        job_id: &JobId,
    ) -> AppResult<Option<Listing>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, worker_id, job_id, price, description, created_at
            FROM worker_jobs
            WHERE worker_id = $1 AND job_id = $2
            "#,
        )
        .bind(worker_id.0)
        .bind(job_id.0)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to find worker job: {}", e)))?;

        Ok(row.map(ListingRow::into_listing))
    }

    async fn save(&self, listing: &Listing) -> AppResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        sqlx::query(
            r#"
            INSERT INTO worker_jobs (id, worker_id, job_id, price, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(listing.id().0)
        .bind(listing.worker_id().0)
        .bind(listing.job_id().0)
        .bind(listing.price())
        .bind(listing.description())
        .bind(listing.created_at())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to save worker job: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: &ListingId) -> AppResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        sqlx::query("DELETE FROM worker_jobs WHERE id = $1")
            .bind(id.0)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete worker job: {}", e)))?;

        Ok(())
    }
}

// =============================================================================
// OrderRepository 实现
// =============================================================================

#[async_trait]
impl OrderRepository for TxOrderRepository {
    async fn find_by_id(&self, id: &OrderId) -> AppResult<Option<ServiceOrder>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, worker_job_id, date, status, hours, cost, rating, description
            FROM service_orders
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to find service order: {}", e)))?;

        Ok(row.map(OrderRow::into_order))
    }

    async fn find_by_customer(&self, customer_id: &CustomerId) -> AppResult<Vec<ServiceOrder>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, worker_job_id, date, status, hours, cost, rating, description
            FROM service_orders
            WHERE customer_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(customer_id.0)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to list customer orders: {}", e)))?;

        Ok(rows.into_iter().map(OrderRow::into_order).collect())
    }

    async fn find_by_worker(&self, worker_id: &WorkerId) -> AppResult<Vec<ServiceOrder>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT so.id, so.customer_id, so.worker_job_id, so.date, so.status,
                   so.hours, so.cost, so.rating, so.description
            FROM service_orders so
            JOIN worker_jobs wj ON so.worker_job_id = wj.id
            WHERE wj.worker_id = $1
            ORDER BY so.date DESC
            "#,
        )
        .bind(worker_id.0)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to list worker orders: {}", e)))?;

        Ok(rows.into_iter().map(OrderRow::into_order).collect())
    }

    async fn save(&self, order: &ServiceOrder) -> AppResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        sqlx::query(
            r#"
            INSERT INTO service_orders (id, customer_id, worker_job_id, date, status,
                                        hours, cost, rating, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(order.id().0)
        .bind(order.customer_id().0)
        .bind(order.listing_id().0)
        .bind(order.date())
        .bind(order.is_open())
        .bind(order.hours())
        .bind(order.cost())
        .bind(order.rating())
        .bind(order.description())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to save service order: {}", e)))?;

        Ok(())
    }

    async fn update(&self, order: &ServiceOrder) -> AppResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        sqlx::query(
            r#"
            UPDATE service_orders
            SET status = $1, hours = $2, cost = $3, rating = $4, description = $5
            WHERE id = $6
            "#,
        )
        .bind(order.is_open())
        .bind(order.hours())
        .bind(order.cost())
        .bind(order.rating())
        .bind(order.description())
        .bind(order.id().0)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update service order: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: &OrderId) -> AppResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        sqlx::query("DELETE FROM service_orders WHERE id = $1")
            .bind(id.0)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete service order: {}", e)))?;

        Ok(())
    }
}

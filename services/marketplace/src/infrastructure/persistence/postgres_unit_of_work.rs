//! PostgreSQL Unit of Work 实现
//!
//! 使用 SQLx Transaction 提供事务协调能力。

use async_trait::async_trait;
use mande_errors::{AppError, AppResult};
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::repositories::{
    CustomerRepository, JobRepository, ListingRepository, OrderRepository, UserProfileRepository,
    WorkerRepository,
};
use crate::domain::unit_of_work::{UnitOfWork, UnitOfWorkFactory};

use super::tx_repositories::{
    TxCustomerRepository, TxJobRepository, TxListingRepository, TxOrderRepository,
    TxUserProfileRepository, TxWorkerRepository,
};

/// PostgreSQL Unit of Work 工厂
pub struct PostgresUnitOfWorkFactory {
    pool: PgPool,
}

impl PostgresUnitOfWorkFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWorkFactory for PostgresUnitOfWorkFactory {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        Ok(Box::new(PostgresUnitOfWork::new(tx)))
    }
}

/// PostgreSQL Unit of Work 实现
///
/// 持有一个事务和所有相关的 Repository 实例。
/// 所有 Repository 操作都在同一个事务中执行。
pub struct PostgresUnitOfWork {
    /// 使用 Arc<Mutex> 包装 Transaction，使其可以被多个 Repository 共享
    tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,

    // 事务感知的 Repositories
    user_repo: TxUserProfileRepository,
    worker_repo: TxWorkerRepository,
    customer_repo: TxCustomerRepository,
    job_repo: TxJobRepository,
    listing_repo: TxListingRepository,
    order_repo: TxOrderRepository,
}

impl PostgresUnitOfWork {
    fn new(tx: Transaction<'static, Postgres>) -> Self {
        let tx = Arc::new(Mutex::new(Some(tx)));

        Self {
            tx: tx.clone(),
            user_repo: TxUserProfileRepository::new(tx.clone()),
            worker_repo: TxWorkerRepository::new(tx.clone()),
            customer_repo: TxCustomerRepository::new(tx.clone()),
            job_repo: TxJobRepository::new(tx.clone()),
            listing_repo: TxListingRepository::new(tx.clone()),
            order_repo: TxOrderRepository::new(tx.clone()),
        }
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    fn users(&self) -> &dyn UserProfileRepository {
        &self.user_repo
    }

    fn workers(&self) -> &dyn WorkerRepository {
        &self.worker_repo
    }

    fn customers(&self) -> &dyn CustomerRepository {
        &self.customer_repo
    }

    fn jobs(&self) -> &dyn JobRepository {
        &self.job_repo
    }

    fn listings(&self) -> &dyn ListingRepository {
        &self.listing_repo
    }

    fn orders(&self) -> &dyn OrderRepository {
        &self.order_repo
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed"))?;

        tx.rollback()
            .await
            .map_err(|e| AppError::database(format!("Failed to rollback transaction: {}", e)))?;

        Ok(())
    }
}

//! 服务工单命令处理器
//!
//! 下单、评分结单、取消与强制删除。前三者围绕工人可用状态做
//! 检查后写入，必须在单事务内完成：工人行先锁再改，避免两个
//! 并发请求同时占用同一工人。强制删除是管理端的后门，不回滚
//! 任何副作用。

use std::sync::Arc;

use async_trait::async_trait;
use mande_cqrs_core::CommandHandler;
use mande_errors::AppResult;
use tracing::info;

use crate::application::commands::{
    CancelOrderCommand, CreateOrderCommand, DeleteOrderCommand, RateOrderCommand,
};
use crate::application::dto::MutationReceipt;
use crate::domain::entities::ServiceOrder;
use crate::domain::unit_of_work::UnitOfWorkFactory;
use crate::error::MarketplaceError;

/// 创建服务工单处理器
pub struct CreateOrderHandler {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl CreateOrderHandler {
    pub fn new(uow_factory: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow_factory }
    }
}

#[async_trait]
impl CommandHandler<CreateOrderCommand> for CreateOrderHandler {
    async fn handle(&self, command: CreateOrderCommand) -> AppResult<MutationReceipt> {
        let customer_user_id = command.customer_user_id()?;
        let listing_id = command.listing_id()?;
        let hours = command.hours.ok_or(MarketplaceError::HoursMissing)?;
        let description = command
            .description
            .clone()
            .ok_or(MarketplaceError::DescriptionMissing)?;

        info!(
            customer_user_id = %customer_user_id,
            listing_id = %listing_id,
            "Handling CreateOrderCommand"
        );

        let uow = self.uow_factory.begin().await?;

        let listing = uow
            .listings()
            .find_by_id(&listing_id)
            .await?
            .ok_or(MarketplaceError::ListingNotFound(listing_id))?;

        // 行锁住工人，可用性检查到提交之间不允许并发改写
        let mut worker = uow
            .workers()
            .lock_by_id(listing.worker_id())
            .await?
            .ok_or(MarketplaceError::WorkerNotFound(*listing.worker_id()))?;

        let job = uow
            .jobs()
            .find_by_id(listing.job_id())
            .await?
            .ok_or(MarketplaceError::JobNotFound(*listing.job_id()))?;

        let customer = uow
            .customers()
            .find_by_user_id(&customer_user_id)
            .await?
            .ok_or(MarketplaceError::CustomerNotFound(customer_user_id))?;

        worker.book()?;

        let order = ServiceOrder::new(
            *customer.id(),
            *listing.id(),
            listing.price(),
            hours,
            description,
        );

        uow.workers().update(&worker).await?;
        uow.orders().save(&order).await?;
        uow.commit().await?;

        info!(
            order_id = %order.id(),
            worker_id = %worker.id(),
            cost = order.cost(),
            "Service order created"
        );
        Ok(MutationReceipt::new(format!(
            "Service requested by customer {} created, job:{}",
            customer_user_id,
            job.name()
        )))
    }
}

/// 评分结单处理器
///
/// 关单、落评分、折进工人的评分聚合并释放工人，单事务内完成。
pub struct RateOrderHandler {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl RateOrderHandler {
    pub fn new(uow_factory: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow_factory }
    }
}

#[async_trait]
impl CommandHandler<RateOrderCommand> for RateOrderHandler {
    async fn handle(&self, command: RateOrderCommand) -> AppResult<MutationReceipt> {
        let order_id = command.order_id()?;
        let rating = command.rating.ok_or(MarketplaceError::RatingMissing)?;

        info!(order_id = %order_id, rating = rating, "Handling RateOrderCommand");

        let uow = self.uow_factory.begin().await?;

        let mut order = uow
            .orders()
            .find_by_id(&order_id)
            .await?
            .ok_or(MarketplaceError::OrderNotFound(order_id))?;

        order.close_with_rating(rating)?;

        let listing = uow
            .listings()
            .find_by_id(order.listing_id())
            .await?
            .ok_or(MarketplaceError::ListingNotFound(*order.listing_id()))?;

        let mut worker = uow
            .workers()
            .lock_by_id(listing.worker_id())
            .await?
            .ok_or(MarketplaceError::WorkerNotFound(*listing.worker_id()))?;

        worker.record_rating(rating);
        worker.release();

        uow.orders().update(&order).await?;
        uow.workers().update(&worker).await?;
        uow.commit().await?;

        info!(
            order_id = %order_id,
            worker_id = %worker.id(),
            worker_rating = worker.rating().mean(),
            "Service order rated and closed"
        );
        Ok(MutationReceipt::new(format!(
            "Service with id {} updated",
            command.id_service
        )))
    }
}

/// 取消工单处理器
///
/// 无评分关单并释放工人，评分聚合不动。
pub struct CancelOrderHandler {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl CancelOrderHandler {
    pub fn new(uow_factory: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow_factory }
    }
}

#[async_trait]
impl CommandHandler<CancelOrderCommand> for CancelOrderHandler {
    async fn handle(&self, command: CancelOrderCommand) -> AppResult<MutationReceipt> {
        let order_id = command.order_id()?;

        info!(order_id = %order_id, "Handling CancelOrderCommand");

        let uow = self.uow_factory.begin().await?;

        let mut order = uow
            .orders()
            .find_by_id(&order_id)
            .await?
            .ok_or(MarketplaceError::OrderNotFound(order_id))?;

        order.cancel()?;

        let listing = uow
            .listings()
            .find_by_id(order.listing_id())
            .await?
            .ok_or(MarketplaceError::ListingNotFound(*order.listing_id()))?;

        let mut worker = uow
            .workers()
            .lock_by_id(listing.worker_id())
            .await?
            .ok_or(MarketplaceError::WorkerNotFound(*listing.worker_id()))?;

        worker.release();

        uow.orders().update(&order).await?;
        uow.workers().update(&worker).await?;
        uow.commit().await?;

        info!(order_id = %order_id, worker_id = %worker.id(), "Service order cancelled");
        Ok(MutationReceipt::new(format!(
            "Service {} cancelled",
            command.id_service
        )))
    }
}

/// 强制删除工单处理器
///
/// 无条件删除，不释放工人也不调整评分。开着的工单被强删后工人会
/// 停留在不可用状态，这是保留给管理端的既有行为，不在这里修补。
pub struct DeleteOrderHandler {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl DeleteOrderHandler {
    pub fn new(uow_factory: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow_factory }
    }
}

#[async_trait]
impl CommandHandler<DeleteOrderCommand> for DeleteOrderHandler {
    async fn handle(&self, command: DeleteOrderCommand) -> AppResult<MutationReceipt> {
        let order_id = command.order_id()?;

        info!(order_id = %order_id, "Handling DeleteOrderCommand");

        let uow = self.uow_factory.begin().await?;

        let order = uow
            .orders()
            .find_by_id(&order_id)
            .await?
            .ok_or(MarketplaceError::OrderNotFound(order_id))?;

        uow.orders().delete(order.id()).await?;
        uow.commit().await?;

        info!(order_id = %order_id, "Service order force deleted");
        Ok(MutationReceipt::new(format!(
            "Service {} deleted",
            command.id_service
        )))
    }
}

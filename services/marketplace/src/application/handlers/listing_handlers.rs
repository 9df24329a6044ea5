//! 报价命令处理器
//!
//! 两个处理器都在单事务内完成校验与写入。字段取值顺序沿用对外契约的
//! 错误优先级：创建先验用户再验工种，删除则两个 ID 都先到位才查库。

use std::sync::Arc;

use async_trait::async_trait;
use mande_cqrs_core::CommandHandler;
use mande_errors::AppResult;
use tracing::info;

use crate::application::commands::{CreateListingCommand, DeleteListingCommand};
use crate::application::dto::MutationReceipt;
use crate::domain::entities::Listing;
use crate::domain::unit_of_work::UnitOfWorkFactory;
use crate::error::MarketplaceError;

/// 创建报价处理器
pub struct CreateListingHandler {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl CreateListingHandler {
    pub fn new(uow_factory: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow_factory }
    }
}

#[async_trait]
impl CommandHandler<CreateListingCommand> for CreateListingHandler {
    async fn handle(&self, command: CreateListingCommand) -> AppResult<MutationReceipt> {
        let user_id = command.user_id()?;
        info!(user_id = %user_id, "Handling CreateListingCommand");

        let uow = self.uow_factory.begin().await?;

        let user = uow
            .users()
            .find_by_id(&user_id)
            .await?
            .ok_or(MarketplaceError::UserNotFound(user_id))?;

        let worker = uow
            .workers()
            .find_by_user_id(user.id())
            .await?
            .ok_or(MarketplaceError::NotAWorker)?;

        let job_id = command.job_id()?;
        let job = uow
            .jobs()
            .find_by_id(&job_id)
            .await?
            .ok_or(MarketplaceError::JobNotFound(job_id))?;

        if uow
            .listings()
            .find_by_worker_and_job(worker.id(), job.id())
            .await?
            .is_some()
        {
            return Err(MarketplaceError::DuplicateListing.into());
        }

        let price = command.price.ok_or(MarketplaceError::PriceMissing)?;
        let description = command
            .description
            .clone()
            .ok_or(MarketplaceError::DescriptionMissing)?;

        let listing = Listing::new(*worker.id(), *job.id(), price, description);
        uow.listings().save(&listing).await?;
        uow.commit().await?;

        info!(listing_id = %listing.id(), "Listing created");
        Ok(MutationReceipt::new(format!(
            "Job added to worker user with id {}",
            user_id
        )))
    }
}

/// 删除报价处理器
pub struct DeleteListingHandler {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl DeleteListingHandler {
    pub fn new(uow_factory: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow_factory }
    }
}

#[async_trait]
impl CommandHandler<DeleteListingCommand> for DeleteListingHandler {
    async fn handle(&self, command: DeleteListingCommand) -> AppResult<MutationReceipt> {
        // 删除接口的两个 ID 都先于任何查库校验
        let user_id = command.user_id()?;
        let job_id = command.job_id()?;
        info!(user_id = %user_id, job_id = %job_id, "Handling DeleteListingCommand");

        let uow = self.uow_factory.begin().await?;

        let user = uow
            .users()
            .find_by_id(&user_id)
            .await?
            .ok_or(MarketplaceError::UserNotFound(user_id))?;

        let worker = uow
            .workers()
            .find_by_user_id(user.id())
            .await?
            .ok_or(MarketplaceError::NotAWorker)?;

        let job = uow
            .jobs()
            .find_by_id(&job_id)
            .await?
            .ok_or(MarketplaceError::JobNotFound(job_id))?;

        let listing = uow
            .listings()
            .find_by_worker_and_job(worker.id(), job.id())
            .await?
            .ok_or(MarketplaceError::NotRelatedToJob)?;

        uow.listings().delete(listing.id()).await?;
        uow.commit().await?;

        info!(listing_id = %listing.id(), "Listing deleted");
        Ok(MutationReceipt::new(format!(
            "Job deleted from worker user with id {}",
            user_id
        )))
    }
}

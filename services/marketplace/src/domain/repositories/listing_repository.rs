//! 报价仓储接口

use async_trait::async_trait;
use mande_errors::AppResult;

use crate::domain::entities::Listing;
use crate::domain::value_objects::{JobId, ListingId, WorkerId};

/// 报价仓储接口
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// 根据 ID 查找报价
    async fn find_by_id(&self, id: &ListingId) -> AppResult<Option<Listing>>;

    /// 查询全部报价
    async fn find_all(&self) -> AppResult<Vec<Listing>>;

    /// 查找某工人对某工种的报价
    async fn find_by_worker_and_job(
        &self,
        worker_id: &WorkerId,
        job_id: &JobId,
    ) -> AppResult<Option<Listing>>;

    /// 保存报价（新建）
    async fn save(&self, listing: &Listing) -> AppResult<()>;

    /// 删除报价
    async fn delete(&self, id: &ListingId) -> AppResult<()>;
}

//! 工种目录仓储接口

use async_trait::async_trait;
use mande_errors::AppResult;

use crate::domain::entities::Job;
use crate::domain::value_objects::JobId;

/// 工种目录仓储接口
///
/// 目录由种子迁移维护，运行期只读。
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// 查询全部工种
    async fn find_all(&self) -> AppResult<Vec<Job>>;

    /// 根据 ID 查找工种
    async fn find_by_id(&self, id: &JobId) -> AppResult<Option<Job>>;
}

//! 工人仓储接口

use async_trait::async_trait;
use mande_common::UserId;
use mande_errors::AppResult;

use crate::domain::entities::Worker;
use crate::domain::value_objects::WorkerId;

/// 工人仓储接口
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    /// 根据 ID 查找工人
    async fn find_by_id(&self, id: &WorkerId) -> AppResult<Option<Worker>>;

    /// 根据用户 ID 查找工人
    async fn find_by_user_id(&self, user_id: &UserId) -> AppResult<Option<Worker>>;

    /// 根据 ID 查找工人并锁定
    ///
    /// 事务实现持有行锁直到提交，预订与释放经由此方法避免并发改写。
    /// 连接池实现退化为普通查找。
    async fn lock_by_id(&self, id: &WorkerId) -> AppResult<Option<Worker>>;

    /// 更新工人
    async fn update(&self, worker: &Worker) -> AppResult<()>;
}

//! Unit of Work 模式
//!
//! 提供跨多个 Repository 的事务协调能力，确保操作的原子性。

use async_trait::async_trait;
use mande_errors::AppResult;

use crate::domain::repositories::{
    CustomerRepository, JobRepository, ListingRepository, OrderRepository, UserProfileRepository,
    WorkerRepository,
};

/// Unit of Work trait
///
/// 协调多个 Repository 在同一事务中的操作。
///
/// # 使用示例
///
/// ```ignore
/// let uow = uow_factory.begin().await?;
///
/// // 所有操作在同一事务中
/// uow.orders().save(&order).await?;
/// uow.workers().update(&worker).await?;
///
/// // 提交事务
/// uow.commit().await?;
/// ```
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// 获取用户档案 Repository
    fn users(&self) -> &dyn UserProfileRepository;

    /// 获取工人 Repository
    fn workers(&self) -> &dyn WorkerRepository;

    /// 获取客户 Repository
    fn customers(&self) -> &dyn CustomerRepository;

    /// 获取工种 Repository
    fn jobs(&self) -> &dyn JobRepository;

    /// 获取报价 Repository
    fn listings(&self) -> &dyn ListingRepository;

    /// 获取服务工单 Repository
    fn orders(&self) -> &dyn OrderRepository;

    /// 提交事务
    ///
    /// 成功时所有更改将持久化，失败时自动回滚。
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// 回滚事务
    ///
    /// 撤销所有未提交的更改。
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Unit of Work 工厂 trait
///
/// 用于创建新的 UnitOfWork 实例。
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    /// 开始新的事务
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>>;
}

//! 服务工单仓储接口

use async_trait::async_trait;
use mande_errors::AppResult;

use crate::domain::entities::ServiceOrder;
use crate::domain::value_objects::{CustomerId, OrderId, WorkerId};

/// 服务工单仓储接口
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// 根据 ID 查找工单
    async fn find_by_id(&self, id: &OrderId) -> AppResult<Option<ServiceOrder>>;

    /// 查询客户的全部工单
    async fn find_by_customer(&self, customer_id: &CustomerId) -> AppResult<Vec<ServiceOrder>>;

    /// 查询工人的全部工单
    ///
    /// 覆盖该工人名下每一条报价产生的工单，不限于单条报价。
    async fn find_by_worker(&self, worker_id: &WorkerId) -> AppResult<Vec<ServiceOrder>>;

    /// 保存工单（新建）
    async fn save(&self, order: &ServiceOrder) -> AppResult<()>;

    /// 更新工单
    async fn update(&self, order: &ServiceOrder) -> AppResult<()>;

    /// 删除工单
    async fn delete(&self, id: &OrderId) -> AppResult<()>;
}

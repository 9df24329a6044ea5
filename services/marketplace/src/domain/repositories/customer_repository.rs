//! 客户仓储接口

use async_trait::async_trait;
use mande_common::UserId;
use mande_errors::AppResult;

use crate::domain::entities::Customer;
use crate::domain::value_objects::CustomerId;

/// 客户仓储接口
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// 根据 ID 查找客户
    async fn find_by_id(&self, id: &CustomerId) -> AppResult<Option<Customer>>;

    /// 根据用户 ID 查找客户
    async fn find_by_user_id(&self, user_id: &UserId) -> AppResult<Option<Customer>>;
}

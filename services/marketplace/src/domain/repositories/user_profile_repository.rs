//! 用户档案仓储接口

use async_trait::async_trait;
use mande_common::UserId;
use mande_errors::AppResult;

use crate::domain::entities::UserProfile;

/// 用户档案仓储接口
///
/// 用户表由身份子系统写入，本上下文只读。
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// 根据 ID 查找用户档案
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<UserProfile>>;
}

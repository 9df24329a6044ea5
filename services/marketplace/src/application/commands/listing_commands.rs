//! 报价命令
//!
//! 字段保持线上请求的原始形态，缺失与非法值在取值方法里折成领域错误，
//! 处理器按请求字段的消费顺序逐个取值，保证错误优先级稳定。

use mande_common::UserId;
use mande_cqrs_core::Command;
use serde::{Deserialize, Serialize};

use crate::application::dto::MutationReceipt;
use crate::domain::value_objects::JobId;
use crate::error::MarketplaceError;

/// 创建报价命令
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListingCommand {
    /// 工人的用户 ID
    pub id_user: Option<String>,
    /// 工种 ID
    pub id_job: Option<String>,
    /// 单价
    pub price: Option<f64>,
    /// 报价描述
    pub description: Option<String>,
}

impl CreateListingCommand {
    pub fn user_id(&self) -> Result<UserId, MarketplaceError> {
        let raw = self
            .id_user
            .as_deref()
            .ok_or(MarketplaceError::UserIdMissing)?;
        UserId::from_string(raw).map_err(|_| MarketplaceError::InvalidId(raw.to_string()))
    }

    pub fn job_id(&self) -> Result<JobId, MarketplaceError> {
        let raw = self
            .id_job
            .as_deref()
            .ok_or(MarketplaceError::JobIdMissing)?;
        raw.parse()
            .map_err(|_| MarketplaceError::InvalidId(raw.to_string()))
    }
}

impl Command for CreateListingCommand {
    type Result = MutationReceipt;
}

/// 删除报价命令
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteListingCommand {
    /// 工人的用户 ID
    pub id_user: Option<String>,
    /// 工种 ID
    pub id_job: Option<String>,
}

impl DeleteListingCommand {
    pub fn user_id(&self) -> Result<UserId, MarketplaceError> {
        let raw = self
            .id_user
            .as_deref()
            .ok_or(MarketplaceError::DeleteUserIdMissing)?;
        UserId::from_string(raw).map_err(|_| MarketplaceError::InvalidId(raw.to_string()))
    }

    pub fn job_id(&self) -> Result<JobId, MarketplaceError> {
        let raw = self
            .id_job
            .as_deref()
            .ok_or(MarketplaceError::JobIdMissing)?;
        raw.parse()
            .map_err(|_| MarketplaceError::InvalidId(raw.to_string()))
    }
}

impl Command for DeleteListingCommand {
    type Result = MutationReceipt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_listing_requires_user_id() {
        let command = CreateListingCommand {
            id_user: None,
            id_job: Some(JobId::new().to_string()),
            price: Some(20.0),
            description: Some("Pipes".into()),
        };

        assert!(matches!(
            command.user_id(),
            Err(MarketplaceError::UserIdMissing)
        ));
    }

    #[test]
    fn test_create_listing_rejects_malformed_id() {
        let command = CreateListingCommand {
            id_user: Some("not-a-uuid".into()),
            id_job: None,
            price: None,
            description: None,
        };

        assert!(matches!(
            command.user_id(),
            Err(MarketplaceError::InvalidId(_))
        ));
    }

    #[test]
    fn test_delete_listing_uses_its_own_missing_user_message() {
        let command = DeleteListingCommand {
            id_user: None,
            id_job: None,
        };

        let err = command.user_id().unwrap_err();
        assert_eq!(err.to_string(), "No id of user provided");
    }
}

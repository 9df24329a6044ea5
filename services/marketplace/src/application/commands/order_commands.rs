//! 服务工单命令

use mande_common::UserId;
use mande_cqrs_core::Command;
use serde::{Deserialize, Serialize};

use crate::application::dto::MutationReceipt;
use crate::domain::value_objects::{ListingId, OrderId};
use crate::error::MarketplaceError;

/// 创建服务工单命令
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderCommand {
    /// 客户的用户 ID
    pub id_customer: Option<String>,
    /// 报价 ID
    pub id_worker_job: Option<String>,
    /// 预约小时数
    pub hours: Option<f64>,
    /// 需求描述
    pub description: Option<String>,
}

impl CreateOrderCommand {
    pub fn customer_user_id(&self) -> Result<UserId, MarketplaceError> {
        let raw = self
            .id_customer
            .as_deref()
            .ok_or(MarketplaceError::CustomerIdMissing)?;
        UserId::from_string(raw).map_err(|_| MarketplaceError::InvalidId(raw.to_string()))
    }

    pub fn listing_id(&self) -> Result<ListingId, MarketplaceError> {
        let raw = self
            .id_worker_job
            .as_deref()
            .ok_or(MarketplaceError::ListingIdMissing)?;
        raw.parse()
            .map_err(|_| MarketplaceError::InvalidId(raw.to_string()))
    }
}

impl Command for CreateOrderCommand {
    type Result = MutationReceipt;
}

/// 评分结单命令
///
/// 工单 ID 来自路径参数，这里一定有值，只剩解析失败一种错误。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateOrderCommand {
    /// 工单 ID
    pub id_service: String,
    /// 客户评分
    pub rating: Option<f64>,
}

impl RateOrderCommand {
    pub fn order_id(&self) -> Result<OrderId, MarketplaceError> {
        self.id_service
            .parse()
            .map_err(|_| MarketplaceError::InvalidId(self.id_service.clone()))
    }
}

impl Command for RateOrderCommand {
    type Result = MutationReceipt;
}

/// 取消工单命令
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOrderCommand {
    /// 工单 ID
    pub id_service: String,
}

impl CancelOrderCommand {
    pub fn order_id(&self) -> Result<OrderId, MarketplaceError> {
        self.id_service
            .parse()
            .map_err(|_| MarketplaceError::InvalidId(self.id_service.clone()))
    }
}

impl Command for CancelOrderCommand {
    type Result = MutationReceipt;
}

/// 删除工单命令
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOrderCommand {
    /// 工单 ID
    pub id_service: String,
}

impl DeleteOrderCommand {
    pub fn order_id(&self) -> Result<OrderId, MarketplaceError> {
        self.id_service
            .parse()
            .map_err(|_| MarketplaceError::InvalidId(self.id_service.clone()))
    }
}

impl Command for DeleteOrderCommand {
    type Result = MutationReceipt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_requires_customer_id() {
        let command = CreateOrderCommand {
            id_customer: None,
            id_worker_job: Some(ListingId::new().to_string()),
            hours: Some(2.0),
            description: Some("Leaking tap".into()),
        };

        let err = command.customer_user_id().unwrap_err();
        assert_eq!(err.to_string(), "No id of customer provided");
    }

    #[test]
    fn test_rate_order_rejects_malformed_path_id() {
        let command = RateOrderCommand {
            id_service: "42".into(),
            rating: Some(5.0),
        };

        assert!(matches!(
            command.order_id(),
            Err(MarketplaceError::InvalidId(_))
        ));
    }
}

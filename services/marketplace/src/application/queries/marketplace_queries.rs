//! 市场查询

use mande_common::UserId;
use mande_cqrs_core::Query;
use serde::{Deserialize, Serialize};

use crate::application::dto::{JobRecord, ListingRecord, OrderRecord};
use crate::error::MarketplaceError;

/// 工种目录查询
#[derive(Debug, Clone, Default)]
pub struct ListJobsQuery;

impl Query for ListJobsQuery {
    type Result = Vec<JobRecord>;
}

/// 报价列表查询
///
/// 视角用户决定每条报价的距离参照点。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListListingsQuery {
    /// 视角用户 ID
    pub id_user: Option<String>,
}

impl ListListingsQuery {
    pub fn viewer_id(&self) -> Result<UserId, MarketplaceError> {
        let raw = self
            .id_user
            .as_deref()
            .ok_or(MarketplaceError::UserIdMissing)?;
        UserId::from_string(raw).map_err(|_| MarketplaceError::InvalidId(raw.to_string()))
    }
}

impl Query for ListListingsQuery {
    type Result = Vec<ListingRecord>;
}

/// 查询方的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRole {
    Customer,
    Worker,
}

/// 服务工单列表查询
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOrdersQuery {
    /// customer 或 worker
    pub role: Option<String>,
    /// 查询方的用户 ID
    pub id_user: Option<String>,
}

impl ListOrdersQuery {
    pub fn role(&self) -> Result<OrderRole, MarketplaceError> {
        let raw = self.role.as_deref().ok_or(MarketplaceError::RoleMissing)?;
        match raw {
            "customer" => Ok(OrderRole::Customer),
            "worker" => Ok(OrderRole::Worker),
            other => Err(MarketplaceError::UnknownRole(other.to_string())),
        }
    }

    pub fn user_id(&self) -> Result<UserId, MarketplaceError> {
        let raw = self
            .id_user
            .as_deref()
            .ok_or(MarketplaceError::UserIdMissing)?;
        UserId::from_string(raw).map_err(|_| MarketplaceError::InvalidId(raw.to_string()))
    }
}

impl Query for ListOrdersQuery {
    type Result = Vec<OrderRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        let query = ListOrdersQuery {
            role: Some("customer".into()),
            id_user: Some(UserId::new().to_string()),
        };
        assert_eq!(query.role().unwrap(), OrderRole::Customer);

        let query = ListOrdersQuery {
            role: Some("worker".into()),
            id_user: None,
        };
        assert_eq!(query.role().unwrap(), OrderRole::Worker);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let query = ListOrdersQuery {
            role: Some("admin".into()),
            id_user: None,
        };

        let err = query.role().unwrap_err();
        assert_eq!(err.to_string(), "Unknown role: admin");
    }

    #[test]
    fn test_missing_role_is_rejected() {
        let query = ListOrdersQuery {
            role: None,
            id_user: None,
        };

        assert!(matches!(query.role(), Err(MarketplaceError::RoleMissing)));
    }
}

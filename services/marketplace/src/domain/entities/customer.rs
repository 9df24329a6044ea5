//! 客户聚合

use mande_common::UserId;
use mande_domain_core::Entity;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CustomerId;

/// 客户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    user_id: UserId,
}

impl Customer {
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: CustomerId::new(),
            user_id,
        }
    }

    /// 从数据库行重建
    pub fn from_parts(id: CustomerId, user_id: UserId) -> Self {
        Self { id, user_id }
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

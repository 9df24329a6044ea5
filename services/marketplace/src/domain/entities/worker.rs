//! 工人聚合
//!
//! 每个工人对应一个用户档案，持有可用标志和评分聚合。
//! 预订与释放是工单生命周期的两端：下单占用工人，结单或取消释放工人。

use mande_common::UserId;
use mande_domain_core::Entity;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{RatingAggregate, WorkerId};
use crate::error::MarketplaceError;

/// 工人
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    id: WorkerId,
    user_id: UserId,
    is_available: bool,
    rating: RatingAggregate,
}

impl Worker {
    /// 新工人默认可用，评分聚合为空
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: WorkerId::new(),
            user_id,
            is_available: true,
            rating: RatingAggregate::default(),
        }
    }

    /// 从数据库行重建
    pub fn from_parts(
        id: WorkerId,
        user_id: UserId,
        is_available: bool,
        rating: RatingAggregate,
    ) -> Self {
        Self {
            id,
            user_id,
            is_available,
            rating,
        }
    }

    pub fn id(&self) -> &WorkerId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    pub fn rating(&self) -> RatingAggregate {
        self.rating
    }

    /// 预订工人，不可用时拒绝
    pub fn book(&mut self) -> Result<(), MarketplaceError> {
        if !self.is_available {
            return Err(MarketplaceError::WorkerUnavailable);
        }
        self.is_available = false;
        Ok(())
    }

    /// 释放工人，幂等
    pub fn release(&mut self) {
        self.is_available = true;
    }

    /// 记录一次客户评分
    pub fn record_rating(&mut self, rating: f64) {
        self.rating.fold(rating);
    }
}

impl Entity for Worker {
    type Id = WorkerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

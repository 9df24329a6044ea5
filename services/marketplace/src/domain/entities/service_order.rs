//! 服务工单聚合
//!
//! 客户对某条报价下的订单。创建即开启，费用按报价单价乘小时数一次算定。
//! 结单有两条路径：带评分关单，或无评分取消。两条路径都只允许一次。

use chrono::{DateTime, Utc};
use mande_domain_core::Entity;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CustomerId, ListingId, OrderId};
use crate::error::MarketplaceError;

/// 服务工单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOrder {
    id: OrderId,
    customer_id: CustomerId,
    listing_id: ListingId,
    date: DateTime<Utc>,
    status: bool,
    hours: f64,
    cost: f64,
    rating: Option<f64>,
    description: String,
}

impl ServiceOrder {
    /// 创建开启状态的工单，费用在此一次算定
    pub fn new(
        customer_id: CustomerId,
        listing_id: ListingId,
        price: f64,
        hours: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            customer_id,
            listing_id,
            date: Utc::now(),
            status: true,
            hours,
            cost: price * hours,
            rating: None,
            description: description.into(),
        }
    }

    /// 从数据库行重建
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: OrderId,
        customer_id: CustomerId,
        listing_id: ListingId,
        date: DateTime<Utc>,
        status: bool,
        hours: f64,
        cost: f64,
        rating: Option<f64>,
        description: String,
    ) -> Self {
        Self {
            id,
            customer_id,
            listing_id,
            date,
            status,
            hours,
            cost,
            rating,
            description,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn listing_id(&self) -> &ListingId {
        &self.listing_id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn is_open(&self) -> bool {
        self.status
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 带评分关单，已结束的工单拒绝
    pub fn close_with_rating(&mut self, rating: f64) -> Result<(), MarketplaceError> {
        if !self.status {
            return Err(MarketplaceError::OrderAlreadyEnded);
        }
        self.status = false;
        self.rating = Some(rating);
        Ok(())
    }

    /// 无评分取消，已结束的工单拒绝
    pub fn cancel(&mut self) -> Result<(), MarketplaceError> {
        if !self.status {
            return Err(MarketplaceError::OrderAlreadyEnded);
        }
        self.status = false;
        Ok(())
    }
}

impl Entity for ServiceOrder {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_order() -> ServiceOrder {
        ServiceOrder::new(
            CustomerId::new(),
            ListingId::new(),
            25.0,
            3.0,
            "Fix kitchen sink",
        )
    }

    #[test]
    fn test_new_order_is_open_with_computed_cost() {
        let order = open_order();

        assert!(order.is_open());
        assert!((order.cost() - 75.0).abs() < f64::EPSILON);
        assert_eq!(order.rating(), None);
    }

    #[test]
    fn test_close_with_rating_ends_order() {
        let mut order = open_order();

        order.close_with_rating(4.5).unwrap();

        assert!(!order.is_open());
        assert_eq!(order.rating(), Some(4.5));
    }

    #[test]
    fn test_close_twice_is_rejected() {
        let mut order = open_order();
        order.close_with_rating(4.5).unwrap();

        let result = order.close_with_rating(3.0);

        assert!(matches!(result, Err(MarketplaceError::OrderAlreadyEnded)));
        assert_eq!(order.rating(), Some(4.5));
    }

    #[test]
    fn test_cancel_ends_order_without_rating() {
        let mut order = open_order();

        order.cancel().unwrap();

        assert!(!order.is_open());
        assert_eq!(order.rating(), None);
    }

    #[test]
    fn test_cancel_after_close_is_rejected() {
        let mut order = open_order();
        order.close_with_rating(5.0).unwrap();

        let result = order.cancel();

        assert!(matches!(result, Err(MarketplaceError::OrderAlreadyEnded)));
    }
}

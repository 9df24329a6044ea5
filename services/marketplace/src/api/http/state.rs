//! HTTP 层共享状态

use std::sync::Arc;

use mande_bootstrap::{HealthChecker, MetricsRecorder};

use crate::application::handlers::{
    CancelOrderHandler, CreateListingHandler, CreateOrderHandler, DeleteListingHandler,
    DeleteOrderHandler, ListJobsHandler, ListListingsHandler, ListOrdersHandler, RateOrderHandler,
};

/// 业务路由状态，持有全部应用层处理器
#[derive(Clone)]
pub struct AppState {
    pub list_jobs: Arc<ListJobsHandler>,
    pub list_listings: Arc<ListListingsHandler>,
    pub create_listing: Arc<CreateListingHandler>,
    pub delete_listing: Arc<DeleteListingHandler>,
    pub list_orders: Arc<ListOrdersHandler>,
    pub create_order: Arc<CreateOrderHandler>,
    pub rate_order: Arc<RateOrderHandler>,
    pub cancel_order: Arc<CancelOrderHandler>,
    pub delete_order: Arc<DeleteOrderHandler>,
}

/// 运维路由状态
#[derive(Clone)]
pub struct OpsState {
    pub health: Arc<HealthChecker>,
    pub metrics: Arc<MetricsRecorder>,
}

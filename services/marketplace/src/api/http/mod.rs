//! HTTP 接口模块

mod routes;
mod state;

pub use routes::{api_router, ops_router, ApiResponse, RateOrderBody};
pub use state::{AppState, OpsState};

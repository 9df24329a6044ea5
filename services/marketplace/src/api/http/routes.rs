//! HTTP 路由与端点处理函数
//!
//! 端点函数只做三件事：取参、分发到应用层处理器、套统一信封。
//! 成功一律 `200 {"status":"success","data":...}`，
//! 失败由 `AppError` 的 `IntoResponse` 序列化为 RFC 7807 问题文档。

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, patch, post};
use axum::Router;
use mande_cqrs_core::{CommandHandler, QueryHandler};
use mande_errors::AppResult;
use serde::{Deserialize, Serialize};

use crate::application::commands::{
    CancelOrderCommand, CreateListingCommand, CreateOrderCommand, DeleteListingCommand,
    DeleteOrderCommand, RateOrderCommand,
};
use crate::application::dto::{JobRecord, ListingRecord, MutationReceipt, OrderRecord};
use crate::application::queries::{ListJobsQuery, ListListingsQuery, ListOrdersQuery};

use super::state::{AppState, OpsState};

/// 统一成功信封
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            status: "success".to_string(),
            data,
        })
    }
}

/// 评分请求体，工单 ID 走路径参数
#[derive(Debug, Deserialize)]
pub struct RateOrderBody {
    pub rating: Option<f64>,
}

/// 业务路由
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/jobs", get(list_jobs))
        .route(
            "/api/listings",
            get(list_listings).post(create_listing).delete(delete_listing),
        )
        .route("/api/services", get(list_orders).post(create_order))
        .route(
            "/api/services/{id}",
            patch(rate_order).delete(delete_order),
        )
        .route("/api/services/{id}/cancel", post(cancel_order))
        .with_state(state)
}

/// 运维路由：健康检查与指标导出
pub fn ops_router(state: OpsState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn list_jobs(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<JobRecord>>>> {
    let jobs = state.list_jobs.handle(ListJobsQuery).await?;
    Ok(ApiResponse::success(jobs))
}

async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListListingsQuery>,
) -> AppResult<Json<ApiResponse<Vec<ListingRecord>>>> {
    let listings = state.list_listings.handle(query).await?;
    Ok(ApiResponse::success(listings))
}

async fn create_listing(
    State(state): State<AppState>,
    Json(command): Json<CreateListingCommand>,
) -> AppResult<Json<ApiResponse<MutationReceipt>>> {
    let receipt = state.create_listing.handle(command).await?;
    Ok(ApiResponse::success(receipt))
}

async fn delete_listing(
    State(state): State<AppState>,
    Json(command): Json<DeleteListingCommand>,
) -> AppResult<Json<ApiResponse<MutationReceipt>>> {
    let receipt = state.delete_listing.handle(command).await?;
    Ok(ApiResponse::success(receipt))
}

async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<ApiResponse<Vec<OrderRecord>>>> {
    let orders = state.list_orders.handle(query).await?;
    Ok(ApiResponse::success(orders))
}

async fn create_order(
    State(state): State<AppState>,
    Json(command): Json<CreateOrderCommand>,
) -> AppResult<Json<ApiResponse<MutationReceipt>>> {
    let receipt = state.create_order.handle(command).await?;
    Ok(ApiResponse::success(receipt))
}

async fn rate_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RateOrderBody>,
) -> AppResult<Json<ApiResponse<MutationReceipt>>> {
    let command = RateOrderCommand {
        id_service: id,
        rating: body.rating,
    };
    let receipt = state.rate_order.handle(command).await?;
    Ok(ApiResponse::success(receipt))
}

async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MutationReceipt>>> {
    let command = CancelOrderCommand { id_service: id };
    let receipt = state.cancel_order.handle(command).await?;
    Ok(ApiResponse::success(receipt))
}

async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MutationReceipt>>> {
    let command = DeleteOrderCommand { id_service: id };
    let receipt = state.delete_order.handle(command).await?;
    Ok(ApiResponse::success(receipt))
}

async fn liveness(State(state): State<OpsState>) -> Response {
    let status = state.health.liveness().await;
    Json(status).into_response()
}

async fn readiness(State(state): State<OpsState>) -> Response {
    let status = state.health.readiness().await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status)).into_response()
}

async fn metrics(State(state): State<OpsState>) -> String {
    state.metrics.render()
}

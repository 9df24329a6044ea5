//! Mande 市场服务入口
//!
//! 装配顺序：配置 → 运行时 → 指标 → 基础设施 → 迁移 → 仓储与处理器 → HTTP

use std::sync::Arc;

use axum::Router;
use mande_adapter_postgres::MigrationManager;
use mande_bootstrap::{
    HealthChecker, Infrastructure, MetricsRecorder, PoolMetricsCollector, init_runtime,
    shutdown_signal,
};
use mande_config::AppConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use marketplace::api::http::{AppState, OpsState, api_router, ops_router};
use marketplace::application::handlers::{
    CancelOrderHandler, CreateListingHandler, CreateOrderHandler, DeleteListingHandler,
    DeleteOrderHandler, ListJobsHandler, ListListingsHandler, ListOrdersHandler, RateOrderHandler,
};
use marketplace::domain::repositories::{
    CustomerRepository, JobRepository, ListingRepository, OrderRepository, UserProfileRepository,
    WorkerRepository,
};
use marketplace::domain::unit_of_work::UnitOfWorkFactory;
use marketplace::infrastructure::migrations::migrations;
use marketplace::infrastructure::persistence::{
    PostgresCustomerRepository, PostgresJobRepository, PostgresListingRepository,
    PostgresOrderRepository, PostgresUnitOfWorkFactory, PostgresUserProfileRepository,
    PostgresWorkerRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load("config")?;
    init_runtime(&config);

    // Prometheus 记录器要在任何指标产生之前装好
    let metrics = Arc::new(MetricsRecorder::new());

    let infra = Infrastructure::from_config(config.clone()).await?;
    let pool = infra.postgres_pool();

    // 先迁移，失败则拒绝启动
    let migration_result = MigrationManager::new(pool.clone())
        .migrate(&migrations())
        .await?;
    if !migration_result.is_success() {
        for err in &migration_result.errors {
            tracing::error!(
                version = err.version,
                name = %err.name,
                error = %err.error,
                "Migration failed"
            );
        }
        return Err("Database migration failed".into());
    }
    info!(
        applied = migration_result.applied_count(),
        skipped = migration_result.skipped.len(),
        "Migrations up to date"
    );

    // 组装 Repositories（依赖 domain trait）
    let user_repo: Arc<dyn UserProfileRepository> =
        Arc::new(PostgresUserProfileRepository::new(pool.clone()));
    let worker_repo: Arc<dyn WorkerRepository> =
        Arc::new(PostgresWorkerRepository::new(pool.clone()));
    let customer_repo: Arc<dyn CustomerRepository> =
        Arc::new(PostgresCustomerRepository::new(pool.clone()));
    let job_repo: Arc<dyn JobRepository> = Arc::new(PostgresJobRepository::new(pool.clone()));
    let listing_repo: Arc<dyn ListingRepository> =
        Arc::new(PostgresListingRepository::new(pool.clone()));
    let order_repo: Arc<dyn OrderRepository> = Arc::new(PostgresOrderRepository::new(pool.clone()));
    let uow_factory: Arc<dyn UnitOfWorkFactory> =
        Arc::new(PostgresUnitOfWorkFactory::new(pool.clone()));

    // 组装应用层处理器
    let state = AppState {
        list_jobs: Arc::new(ListJobsHandler::new(job_repo.clone())),
        list_listings: Arc::new(ListListingsHandler::new(
            listing_repo.clone(),
            worker_repo.clone(),
            user_repo.clone(),
            job_repo.clone(),
            infra.geocoder(),
        )),
        create_listing: Arc::new(CreateListingHandler::new(uow_factory.clone())),
        delete_listing: Arc::new(DeleteListingHandler::new(uow_factory.clone())),
        list_orders: Arc::new(ListOrdersHandler::new(
            order_repo.clone(),
            customer_repo.clone(),
            worker_repo.clone(),
            listing_repo.clone(),
            job_repo.clone(),
            user_repo.clone(),
        )),
        create_order: Arc::new(CreateOrderHandler::new(uow_factory.clone())),
        rate_order: Arc::new(RateOrderHandler::new(uow_factory.clone())),
        cancel_order: Arc::new(CancelOrderHandler::new(uow_factory.clone())),
        delete_order: Arc::new(DeleteOrderHandler::new(uow_factory.clone())),
    };

    // 可观测性
    let ops_state = OpsState {
        health: Arc::new(HealthChecker::new(infra.clone())),
        metrics,
    };
    let _pool_metrics = PoolMetricsCollector::new(infra.clone()).start();

    let app = Router::new()
        .merge(api_router(state))
        .merge(ops_router(ops_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Marketplace service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

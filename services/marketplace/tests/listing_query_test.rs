//! 列表查询测试
//!
//! 报价列表的距离标注（存档坐标、地址兜底、地理编码失败时的降级）、
//! 工种目录排序，以及按角色检索工单的连接装配。

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::TestBackend;
use mande_adapter_geocode::{GeocodedLocation, Geocoder, StaticGeocoder};
use mande_cqrs_core::QueryHandler;
use mande_domain_core::Coordinate;
use mande_errors::{AppError, AppResult};

use marketplace::application::handlers::{ListJobsHandler, ListListingsHandler, ListOrdersHandler};
use marketplace::application::queries::{ListJobsQuery, ListListingsQuery, ListOrdersQuery};
use marketplace::domain::entities::{Listing, ServiceOrder, UserProfile, Worker};
use marketplace::domain::value_objects::{RatingAggregate, WorkerId};
use mande_common::UserId;

/// 总是失败的地理编码器，验证查询的降级路径
struct FailingGeocoder;

#[async_trait]
impl Geocoder for FailingGeocoder {
    async fn geocode(&self, _address: &str) -> AppResult<Option<GeocodedLocation>> {
        Err(AppError::external_service("geocoder offline"))
    }
}

fn listings_handler(backend: &TestBackend, geocoder: Arc<dyn Geocoder>) -> ListListingsHandler {
    ListListingsHandler::new(
        backend.listing_repo(),
        backend.worker_repo(),
        backend.user_repo(),
        backend.job_repo(),
        geocoder,
    )
}

fn orders_handler(backend: &TestBackend) -> ListOrdersHandler {
    ListOrdersHandler::new(
        backend.order_repo(),
        backend.customer_repo(),
        backend.worker_repo(),
        backend.listing_repo(),
        backend.job_repo(),
        backend.user_repo(),
    )
}

fn bogota() -> Coordinate {
    Coordinate::new(4.711, -74.0721).unwrap()
}

fn medellin() -> Coordinate {
    Coordinate::new(6.2442, -75.5812).unwrap()
}

/// 带坐标的工人和一条报价
async fn seed_medellin_worker(backend: &TestBackend) -> (UserProfile, Worker, Listing) {
    let user = backend
        .insert_user(
            UserProfile::new("Pedro", "Gomez", "pedro.gomez@example.com", "3001234567")
                .with_coordinate(medellin()),
        )
        .await;
    let worker = backend.seed_worker(&user).await;
    let job = backend.seed_job("Plomería").await;
    let listing = backend
        .seed_listing(&worker, &job, 50.0, "Reparación de tuberías")
        .await;
    (user, worker, listing)
}

/// 工种目录按名称排序返回
#[tokio::test]
async fn test_jobs_catalog_is_sorted_by_name() {
    let backend = TestBackend::new();
    backend.seed_job("Plomería").await;
    backend.seed_job("Carpintería").await;
    backend.seed_job("Electricidad").await;

    let handler = ListJobsHandler::new(backend.job_repo());
    let jobs = handler.handle(ListJobsQuery).await.unwrap();

    let names: Vec<&str> = jobs.iter().map(|job| job.name.as_str()).collect();
    assert_eq!(names, vec!["Carpintería", "Electricidad", "Plomería"]);
}

/// 查看者与工人都有存档坐标时标注大圆距离
#[tokio::test]
async fn test_distance_between_stored_coordinates() {
    let backend = TestBackend::new();
    let (_, worker, _) = seed_medellin_worker(&backend).await;
    let viewer = backend
        .insert_user(
            UserProfile::new("Laura", "Diaz", "laura.diaz@example.com", "3017654321")
                .with_coordinate(bogota()),
        )
        .await;

    let handler = listings_handler(&backend, Arc::new(StaticGeocoder::new()));
    let records = handler
        .handle(ListListingsQuery {
            id_user: Some(viewer.id().to_string()),
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id_worker, worker.id().to_string());

    // 波哥大与麦德林的直线距离约 239 公里
    let distance = records[0].distance.expect("distance should be annotated");
    assert!((235.0..243.0).contains(&distance), "got {}", distance);
}

/// 工人没有存档坐标时该行距离为空，查询照常返回
#[tokio::test]
async fn test_distance_missing_when_worker_has_no_coordinate() {
    let backend = TestBackend::new();
    let worker_user = backend.seed_user("Pedro", "Gomez").await;
    let worker = backend.seed_worker(&worker_user).await;
    let job = backend.seed_job("Plomería").await;
    backend
        .seed_listing(&worker, &job, 50.0, "Reparación de tuberías")
        .await;
    let viewer = backend
        .insert_user(
            UserProfile::new("Laura", "Diaz", "laura.diaz@example.com", "3017654321")
                .with_coordinate(bogota()),
        )
        .await;

    let handler = listings_handler(&backend, Arc::new(StaticGeocoder::new()));
    let records = handler
        .handle(ListListingsQuery {
            id_user: Some(viewer.id().to_string()),
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].distance, None);
    assert_eq!(records[0].job, "Plomería");
}

/// 查看者缺坐标时用地址做一次地理编码兜底
#[tokio::test]
async fn test_viewer_address_falls_back_to_geocoder() {
    let backend = TestBackend::new();
    seed_medellin_worker(&backend).await;
    let viewer = backend
        .insert_user(
            UserProfile::new("Laura", "Diaz", "laura.diaz@example.com", "3017654321")
                .with_address("Bogotá, Colombia"),
        )
        .await;

    let geocoder = StaticGeocoder::new().with_location("Bogotá, Colombia", 4.711, -74.0721);
    let handler = listings_handler(&backend, Arc::new(geocoder));
    let records = handler
        .handle(ListListingsQuery {
            id_user: Some(viewer.id().to_string()),
        })
        .await
        .unwrap();

    let distance = records[0].distance.expect("distance should be annotated");
    assert!((235.0..243.0).contains(&distance), "got {}", distance);
}

/// 地理编码失败只丢距离，不拖垮整个查询
#[tokio::test]
async fn test_geocoder_failure_degrades_to_missing_distance() {
    let backend = TestBackend::new();
    seed_medellin_worker(&backend).await;
    let viewer = backend
        .insert_user(
            UserProfile::new("Laura", "Diaz", "laura.diaz@example.com", "3017654321")
                .with_address("Bogotá, Colombia"),
        )
        .await;

    let handler = listings_handler(&backend, Arc::new(FailingGeocoder));
    let records = handler
        .handle(ListListingsQuery {
            id_user: Some(viewer.id().to_string()),
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].distance, None);
}

/// 报价行携带工人档案、可用状态、均值评分与照片
#[tokio::test]
async fn test_listing_record_carries_worker_profile() {
    let backend = TestBackend::new();
    let worker_user = backend
        .insert_user(
            UserProfile::new("Pedro", "Gomez", "pedro.gomez@example.com", "3001234567")
                .with_photo("https://cdn.mande.app/photos/pedro.jpg"),
        )
        .await;
    let worker = backend
        .insert_worker(Worker::from_parts(
            WorkerId::new(),
            *worker_user.id(),
            true,
            RatingAggregate::new(9.0, 2),
        ))
        .await;
    let job = backend.seed_job("Plomería").await;
    backend
        .seed_listing(&worker, &job, 50.0, "Reparación de tuberías")
        .await;
    let viewer = backend.seed_user("Laura", "Diaz").await;

    let handler = listings_handler(&backend, Arc::new(StaticGeocoder::new()));
    let records = handler
        .handle(ListListingsQuery {
            id_user: Some(viewer.id().to_string()),
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id_worker, worker.id().to_string());
    assert_eq!(record.first_name, "Pedro");
    assert_eq!(record.last_name, "Gomez");
    assert_eq!(record.email, "pedro.gomez@example.com");
    assert_eq!(record.phone, "3001234567");
    assert!(record.worker_available);
    assert_eq!(record.job, "Plomería");
    assert_eq!(record.price, 50.0);
    assert_eq!(record.description, "Reparación de tuberías");
    assert_eq!(record.rating, 4.5);
    assert_eq!(
        record.photo.as_deref(),
        Some("https://cdn.mande.app/photos/pedro.jpg")
    );
}

/// 未知的查看者返回 404
#[tokio::test]
async fn test_unknown_viewer_is_not_found() {
    let backend = TestBackend::new();
    seed_medellin_worker(&backend).await;

    let handler = listings_handler(&backend, Arc::new(StaticGeocoder::new()));
    let err = handler
        .handle(ListListingsQuery {
            id_user: Some(UserId::new().to_string()),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 404);
}

/// 缺查看者 ID 返回历史错误文案
#[tokio::test]
async fn test_missing_viewer_id_is_rejected() {
    let backend = TestBackend::new();

    let handler = listings_handler(&backend, Arc::new(StaticGeocoder::new()));
    let err = handler
        .handle(ListListingsQuery { id_user: None })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(err.message(), "No id provided");
}

/// 按客户角色查询，装配两侧用户档案与费用字段
#[tokio::test]
async fn test_orders_for_customer_role() {
    let backend = TestBackend::new();
    let (_, _, listing) = seed_medellin_worker(&backend).await;
    let customer_user = backend.seed_user("Laura", "Diaz").await;
    let customer = backend.seed_customer(&customer_user).await;

    backend
        .insert_order(ServiceOrder::new(
            *customer.id(),
            *listing.id(),
            listing.price(),
            2.0,
            "Fuga en la cocina",
        ))
        .await;

    let handler = orders_handler(&backend);
    let records = handler
        .handle(ListOrdersQuery {
            role: Some("customer".to_string()),
            id_user: Some(customer_user.id().to_string()),
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.customer_name, "Laura");
    assert_eq!(record.worker_name, "Pedro");
    assert_eq!(record.job, "Plomería");
    assert_eq!(record.price, 50.0);
    assert_eq!(record.hours, 2.0);
    assert_eq!(record.cost, 100.0);
    assert!(record.status);
    assert_eq!(record.description, "Fuga en la cocina");
}

/// 工人视角覆盖其全部报价下的工单
#[tokio::test]
async fn test_orders_for_worker_cover_all_listings() {
    let backend = TestBackend::new();
    let worker_user = backend.seed_user("Pedro", "Gomez").await;
    let worker = backend.seed_worker(&worker_user).await;
    let plumbing = backend.seed_job("Plomería").await;
    let electricity = backend.seed_job("Electricidad").await;
    let first = backend
        .seed_listing(&worker, &plumbing, 50.0, "Reparación de tuberías")
        .await;
    let second = backend
        .seed_listing(&worker, &electricity, 35.0, "Instalaciones eléctricas")
        .await;

    let customer_user = backend.seed_user("Laura", "Diaz").await;
    let customer = backend.seed_customer(&customer_user).await;

    let mut closed = ServiceOrder::new(*customer.id(), *first.id(), 50.0, 2.0, "Fuga");
    closed.close_with_rating(5.0).unwrap();
    backend.insert_order(closed).await;
    backend
        .insert_order(ServiceOrder::new(
            *customer.id(),
            *second.id(),
            35.0,
            1.0,
            "Enchufe nuevo",
        ))
        .await;

    let handler = orders_handler(&backend);
    let records = handler
        .handle(ListOrdersQuery {
            role: Some("worker".to_string()),
            id_user: Some(worker_user.id().to_string()),
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    let mut jobs: Vec<&str> = records.iter().map(|record| record.job.as_str()).collect();
    jobs.sort();
    assert_eq!(jobs, vec!["Electricidad", "Plomería"]);
}

/// 工人角色查询查不到工人行时报 404
#[tokio::test]
async fn test_worker_role_with_unknown_user_is_not_found() {
    let backend = TestBackend::new();

    let handler = orders_handler(&backend);
    let err = handler
        .handle(ListOrdersQuery {
            role: Some("worker".to_string()),
            id_user: Some(UserId::new().to_string()),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 404);
}

/// 未知角色被拒
#[tokio::test]
async fn test_unknown_role_is_rejected() {
    let backend = TestBackend::new();

    let handler = orders_handler(&backend);
    let err = handler
        .handle(ListOrdersQuery {
            role: Some("admin".to_string()),
            id_user: Some(UserId::new().to_string()),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(err.message(), "Unknown role: admin");
}

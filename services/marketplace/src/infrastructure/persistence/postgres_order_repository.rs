//! PostgreSQL 服务工单 Repository 实现

use async_trait::async_trait;
use mande_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::entities::ServiceOrder;
use crate::domain::repositories::OrderRepository;
use crate::domain::value_objects::{CustomerId, OrderId, WorkerId};

use super::rows::OrderRow;

pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn find_by_id(&self, id: &OrderId) -> AppResult<Option<ServiceOrder>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, worker_job_id, date, status, hours, cost, rating, description
            FROM service_orders
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find service order: {}", e)))?;

        Ok(row.map(OrderRow::into_order))
    }

    async fn find_by_customer(&self, customer_id: &CustomerId) -> AppResult<Vec<ServiceOrder>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, worker_job_id, date, status, hours, cost, rating, description
            FROM service_orders
            WHERE customer_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(customer_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list customer orders: {}", e)))?;

        Ok(rows.into_iter().map(OrderRow::into_order).collect())
    }

    async fn find_by_worker(&self, worker_id: &WorkerId) -> AppResult<Vec<ServiceOrder>> {
        // 工人与工单之间隔着报价表，按报价归属聚合
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT so.id, so.customer_id, so.worker_job_id, so.date, so.status,
                   so.hours, so.cost, so.rating, so.description
            FROM service_orders so
            JOIN worker_jobs wj ON so.worker_job_id = wj.id
            WHERE wj.worker_id = $1
            ORDER BY so.date DESC
            "#,
        )
        .bind(worker_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list worker orders: {}", e)))?;

        Ok(rows.into_iter().map(OrderRow::into_order).collect())
    }

    async fn save(&self, order: &ServiceOrder) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO service_orders (id, customer_id, worker_job_id, date, status,
                                        hours, cost, rating, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(order.id().0)
        .bind(order.customer_id().0)
        .bind(order.listing_id().0)
        .bind(order.date())
        .bind(order.is_open())
        .bind(order.hours())
        .bind(order.cost())
        .bind(order.rating())
        .bind(order.description())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save service order: {}", e)))?;

        Ok(())
    }

    async fn update(&self, order: &ServiceOrder) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE service_orders
            SET status = $1, hours = $2, cost = $3, rating = $4, description = $5
            WHERE id = $6
            "#,
        )
        .bind(order.is_open())
        .bind(order.hours())
        .bind(order.cost())
        .bind(order.rating())
        .bind(order.description())
        .bind(order.id().0)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update service order: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: &OrderId) -> AppResult<()> {
        sqlx::query("DELETE FROM service_orders WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete service order: {}", e)))?;

        Ok(())
    }
}

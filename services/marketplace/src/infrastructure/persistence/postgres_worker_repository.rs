//! PostgreSQL 工人 Repository 实现

use async_trait::async_trait;
use mande_common::UserId;
use mande_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::entities::Worker;
use crate::domain::repositories::WorkerRepository;
use crate::domain::value_objects::WorkerId;

use super::rows::WorkerRow;

pub struct PostgresWorkerRepository {
    pool: PgPool,
}

impl PostgresWorkerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkerRepository for PostgresWorkerRepository {
    async fn find_by_id(&self, id: &WorkerId) -> AppResult<Option<Worker>> {
        let row = sqlx::query_as::<_, WorkerRow>(
            "SELECT id, user_id, is_available, rating_sum, rating_count FROM workers WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find worker: {}", e)))?;

        Ok(row.map(WorkerRow::into_worker))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AppResult<Option<Worker>> {
        let row = sqlx::query_as::<_, WorkerRow>(
            r#"
            SELECT id, user_id, is_available, rating_sum, rating_count
            FROM workers
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find worker by user: {}", e)))?;

        Ok(row.map(WorkerRow::into_worker))
    }

    /// 连接池上没有可持有的事务，退化为普通查找
    async fn lock_by_id(&self, id: &WorkerId) -> AppResult<Option<Worker>> {
        self.find_by_id(id).await
    }

    async fn update(&self, worker: &Worker) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE workers
            SET is_available = $1, rating_sum = $2, rating_count = $3
            WHERE id = $4
            "#,
        )
        .bind(worker.is_available())
        .bind(worker.rating().sum())
        .bind(worker.rating().count())
        .bind(worker.id().0)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update worker: {}", e)))?;

        Ok(())
    }
}

//! PostgreSQL 工种目录 Repository 实现

use async_trait::async_trait;
use mande_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::entities::Job;
use crate::domain::repositories::JobRepository;
use crate::domain::value_objects::JobId;

use super::rows::JobRow;

pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn find_all(&self) -> AppResult<Vec<Job>> {
        let rows = sqlx::query_as::<_, JobRow>("SELECT id, name FROM jobs ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list jobs: {}", e)))?;

        Ok(rows.into_iter().map(JobRow::into_job).collect())
    }

    async fn find_by_id(&self, id: &JobId) -> AppResult<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>("SELECT id, name FROM jobs WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find job: {}", e)))?;

        Ok(row.map(JobRow::into_job))
    }
}

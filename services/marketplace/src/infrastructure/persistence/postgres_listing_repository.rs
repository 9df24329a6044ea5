//! PostgreSQL 报价 Repository 实现

use async_trait::async_trait;
use mande_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::entities::Listing;
use crate::domain::repositories::ListingRepository;
use crate::domain::value_objects::{JobId, ListingId, WorkerId};

use super::rows::ListingRow;

pub struct PostgresListingRepository {
    pool: PgPool,
}

impl PostgresListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PostgresListingRepository {
    async fn find_by_id(&self, id: &ListingId) -> AppResult<Option<Listing>> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, worker_id, job_id, price, description, created_at
            FROM worker_jobs
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find worker job: {}", e)))?;

        Ok(row.map(ListingRow::into_listing))
    }

    async fn find_all(&self) -> AppResult<Vec<Listing>> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, worker_id, job_id, price, description, created_at
            FROM worker_jobs
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list worker jobs: {}", e)))?;

        Ok(rows.into_iter().map(ListingRow::into_listing).collect())
    }

    async fn find_by_worker_and_job(
        &self,
        worker_id: &WorkerId,
        job_id: &JobId,
    ) -> AppResult<Option<Listing>> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, worker_id, job_id, price, description, created_at
            FROM worker_jobs
            WHERE worker_id = $1 AND job_id = $2
            "#,
        )
        .bind(worker_id.0)
        .bind(job_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find worker job: {}", e)))?;

        Ok(row.map(ListingRow::into_listing))
    }

    async fn save(&self, listing: &Listing) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO worker_jobs (id, worker_id, job_id, price, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(listing.id().0)
        .bind(listing.worker_id().0)
        .bind(listing.job_id().0)
        .bind(listing.price())
        .bind(listing.description())
        .bind(listing.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save worker job: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: &ListingId) -> AppResult<()> {
        sqlx::query("DELETE FROM worker_jobs WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete worker job: {}", e)))?;

        Ok(())
    }
}

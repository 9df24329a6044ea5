//! PostgreSQL 用户档案 Repository 实现

use async_trait::async_trait;
use mande_common::UserId;
use mande_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::entities::UserProfile;
use crate::domain::repositories::UserProfileRepository;

use super::rows::UserProfileRow;

pub struct PostgresUserProfileRepository {
    pool: PgPool,
}

impl PostgresUserProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserProfileRepository for PostgresUserProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(
            r#"
            SELECT id, first_name, last_name, email, phone, photo, address,
                   latitude, longitude, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        match row {
            Some(r) => Ok(Some(r.into_profile().map_err(AppError::database)?)),
            None => Ok(None),
        }
    }
}

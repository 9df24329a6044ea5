//! PostgreSQL 客户 Repository 实现

use async_trait::async_trait;
use mande_common::UserId;
use mande_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::entities::Customer;
use crate::domain::repositories::CustomerRepository;
use crate::domain::value_objects::CustomerId;

use super::rows::CustomerRow;

pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> AppResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, user_id FROM customers WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find customer: {}", e)))?;

        Ok(row.map(CustomerRow::into_customer))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AppResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, user_id FROM customers WHERE user_id = $1",
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find customer by user: {}", e)))?;

        Ok(row.map(CustomerRow::into_customer))
    }
}

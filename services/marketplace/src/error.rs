//! 服务错误定义
//!
//! 领域层与应用层共享的失败词汇表，在边界处统一映射为 `AppError`。

use mande_common::UserId;
use mande_errors::AppError;
use thiserror::Error;

use crate::domain::value_objects::{JobId, ListingId, OrderId, WorkerId};

#[derive(Debug, Error)]
pub enum MarketplaceError {
    // ============ 缺失参数 ============
    #[error("No id provided")]
    UserIdMissing,

    #[error("No id of user provided")]
    DeleteUserIdMissing,

    #[error("No id of job provided")]
    JobIdMissing,

    #[error("No id of customer provided")]
    CustomerIdMissing,

    #[error("No id of worker job provided")]
    ListingIdMissing,

    #[error("No price provided")]
    PriceMissing,

    #[error("No hours provided")]
    HoursMissing,

    #[error("No rating provided")]
    RatingMissing,

    #[error("No description provided")]
    DescriptionMissing,

    #[error("No role provided")]
    RoleMissing,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    // ============ 角色与前置条件 ============
    #[error("User is not a worker")]
    NotAWorker,

    #[error("Job is already added")]
    DuplicateListing,

    #[error("Worker is not related to the job")]
    NotRelatedToJob,

    #[error("Worker is not available")]
    WorkerUnavailable,

    #[error("Service already ended")]
    OrderAlreadyEnded,

    // ============ 资源不存在 ============
    #[error("User {0} not found")]
    UserNotFound(UserId),

    #[error("Customer not found for user {0}")]
    CustomerNotFound(UserId),

    #[error("Worker not found for user {0}")]
    WorkerNotFoundForUser(UserId),

    #[error("Worker {0} not found")]
    WorkerNotFound(WorkerId),

    #[error("Job {0} not found")]
    JobNotFound(JobId),

    #[error("Worker job {0} not found")]
    ListingNotFound(ListingId),

    #[error("Service {0} not found")]
    OrderNotFound(OrderId),
}

impl From<MarketplaceError> for AppError {
    fn from(err: MarketplaceError) -> Self {
        use MarketplaceError::*;

        match err {
            UserIdMissing | DeleteUserIdMissing | JobIdMissing | CustomerIdMissing
            | ListingIdMissing | PriceMissing | HoursMissing | RatingMissing
            | DescriptionMissing | RoleMissing | UnknownRole(_) | InvalidId(_) => {
                AppError::validation(err.to_string())
            }

            NotAWorker => AppError::forbidden(err.to_string()),

            DuplicateListing | WorkerUnavailable | OrderAlreadyEnded => {
                AppError::conflict(err.to_string())
            }

            NotRelatedToJob | UserNotFound(_) | CustomerNotFound(_) | WorkerNotFoundForUser(_)
            | WorkerNotFound(_) | JobNotFound(_) | ListingNotFound(_) | OrderNotFound(_) => {
                AppError::not_found(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (MarketplaceError::UserIdMissing, 400),
            (MarketplaceError::NotAWorker, 403),
            (MarketplaceError::DuplicateListing, 409),
            (MarketplaceError::WorkerUnavailable, 409),
            (MarketplaceError::OrderAlreadyEnded, 409),
            (MarketplaceError::NotRelatedToJob, 404),
            (MarketplaceError::UserNotFound(UserId::new()), 404),
        ];

        for (err, expected) in cases {
            let app_err: AppError = err.into();
            assert_eq!(app_err.status_code(), expected);
        }
    }

    #[test]
    fn test_messages_match_client_contract() {
        assert_eq!(MarketplaceError::UserIdMissing.to_string(), "No id provided");
        assert_eq!(
            MarketplaceError::DeleteUserIdMissing.to_string(),
            "No id of user provided"
        );
        assert_eq!(
            MarketplaceError::JobIdMissing.to_string(),
            "No id of job provided"
        );
        assert_eq!(MarketplaceError::NotAWorker.to_string(), "User is not a worker");
        assert_eq!(
            MarketplaceError::DuplicateListing.to_string(),
            "Job is already added"
        );
        assert_eq!(
            MarketplaceError::NotRelatedToJob.to_string(),
            "Worker is not related to the job"
        );
        assert_eq!(
            MarketplaceError::WorkerUnavailable.to_string(),
            "Worker is not available"
        );
        assert_eq!(
            MarketplaceError::OrderAlreadyEnded.to_string(),
            "Service already ended"
        );
    }
}

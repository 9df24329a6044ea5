//! 仓储接口模块

mod customer_repository;
mod job_repository;
mod listing_repository;
mod order_repository;
mod user_profile_repository;
mod worker_repository;

pub use customer_repository::CustomerRepository;
pub use job_repository::JobRepository;
pub use listing_repository::ListingRepository;
pub use order_repository::OrderRepository;
pub use user_profile_repository::UserProfileRepository;
pub use worker_repository::WorkerRepository;

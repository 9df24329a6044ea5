//! 持久化实现模块

mod postgres_customer_repository;
mod postgres_job_repository;
mod postgres_listing_repository;
mod postgres_order_repository;
mod postgres_unit_of_work;
mod postgres_user_profile_repository;
mod postgres_worker_repository;
mod rows;
mod tx_repositories;

pub use postgres_customer_repository::PostgresCustomerRepository;
pub use postgres_job_repository::PostgresJobRepository;
pub use postgres_listing_repository::PostgresListingRepository;
pub use postgres_order_repository::PostgresOrderRepository;
pub use postgres_unit_of_work::{PostgresUnitOfWork, PostgresUnitOfWorkFactory};
pub use postgres_user_profile_repository::PostgresUserProfileRepository;
pub use postgres_worker_repository::PostgresWorkerRepository;

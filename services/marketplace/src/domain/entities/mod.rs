//! 领域实体

pub mod customer;
pub mod job;
pub mod listing;
pub mod service_order;
pub mod user_profile;
pub mod worker;

pub use customer::Customer;
pub use job::Job;
pub use listing::Listing;
pub use service_order::ServiceOrder;
pub use user_profile::UserProfile;
pub use worker::Worker;

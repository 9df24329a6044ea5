//! 命令与查询处理器

pub mod listing_handlers;
pub mod order_handlers;
pub mod query_handlers;

pub use listing_handlers::{CreateListingHandler, DeleteListingHandler};
pub use order_handlers::{
    CancelOrderHandler, CreateOrderHandler, DeleteOrderHandler, RateOrderHandler,
};
pub use query_handlers::{ListJobsHandler, ListListingsHandler, ListOrdersHandler};

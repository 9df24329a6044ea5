//! 命令定义

pub mod listing_commands;
pub mod order_commands;

pub use listing_commands::*;
pub use order_commands::*;

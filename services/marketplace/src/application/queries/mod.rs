//! 查询定义

pub mod marketplace_queries;

pub use marketplace_queries::*;

//! domain-core - 跨 context 的领域核心类型
//!
//! 包含极少数需要跨 bounded context 共享的值对象

mod entity;
mod geo;

pub use entity::*;
pub use geo::*;

// Re-export common types
pub use mande_common::UserId;

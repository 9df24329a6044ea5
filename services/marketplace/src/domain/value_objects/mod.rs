//! 值对象

pub mod ids;
pub mod rating;

pub use ids::*;
pub use rating::*;

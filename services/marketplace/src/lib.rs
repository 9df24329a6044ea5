//! Mande 市场服务
//!
//! 撮合顾客与提供有偿服务的工人：
//! - 工种目录（只读）
//! - 工人报价列表（创建、查看、删除），可选按查看者距离标注
//! - 服务订单生命周期（创建、评分、取消、强制删除），
//!   并维护工人可用状态与评分聚合

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

//! 应用层
//!
//! 包含命令、查询、处理器和 DTO

pub mod commands;
pub mod dto;
pub mod handlers;
pub mod queries;

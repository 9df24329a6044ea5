//! 应用层 DTO
//!
//! 列表查询的行记录与变更操作的回执。字段名是对外 JSON 契约的一部分，
//! 客户端按键取值，空值也要原样序列化，不得省略。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 工种记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub name: String,
}

/// 报价记录
///
/// 视角用户没有坐标或工人地址无法定位时 distance 为空。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id_worker: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub worker_available: bool,
    pub job: String,
    pub price: f64,
    pub description: String,
    pub distance: Option<f64>,
    pub rating: f64,
    pub photo: Option<String>,
}

/// 服务工单记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub customer_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub worker_name: String,
    pub worker_last_name: String,
    pub worker_email: String,
    pub worker_phone: String,
    pub job: String,
    pub price: f64,
    pub hours: f64,
    pub cost: f64,
    pub status: bool,
    pub date: DateTime<Utc>,
    pub description: String,
}

/// 变更回执
///
/// 面向客户端的一句话结果，正文与历史行为保持逐字一致。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationReceipt {
    pub message: String,
}

impl MutationReceipt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

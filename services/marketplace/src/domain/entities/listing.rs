//! 报价聚合
//!
//! 一个工人对一个工种的报价。同一工人同一工种最多一条，重复由仓储约束与
//! 创建流程共同保证。

use chrono::{DateTime, Utc};
use mande_domain_core::Entity;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{JobId, ListingId, WorkerId};

/// 工人报价
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    id: ListingId,
    worker_id: WorkerId,
    job_id: JobId,
    price: f64,
    description: String,
    created_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(
        worker_id: WorkerId,
        job_id: JobId,
        price: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ListingId::new(),
            worker_id,
            job_id,
            price,
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    /// 从数据库行重建
    pub fn from_parts(
        id: ListingId,
        worker_id: WorkerId,
        job_id: JobId,
        price: f64,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            worker_id,
            job_id,
            price,
            description,
            created_at,
        }
    }

    pub fn id(&self) -> &ListingId {
        &self.id
    }

    pub fn worker_id(&self) -> &WorkerId {
        &self.worker_id
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Listing {
    type Id = ListingId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

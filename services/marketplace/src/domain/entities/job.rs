//! 工种目录条目
//!
//! 不可变的参照数据，生命周期由管理端（外部）拥有。

use mande_domain_core::Entity;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::JobId;

/// 工种
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    name: String,
}

impl Job {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            name: name.into(),
        }
    }

    /// 从数据库行重建
    pub fn from_parts(id: JobId, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Job {
    type Id = JobId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

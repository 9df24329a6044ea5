//! 用户档案读模型
//!
//! 身份子系统拥有的用户行在本上下文中的只读投影。
//! 坐标可能缺失；缺失时报价列表查询会尝试用地址做地理编码兜底。

use chrono::{DateTime, Utc};
use mande_common::UserId;
use mande_domain_core::{Coordinate, Entity};
use serde::{Deserialize, Serialize};

/// 用户档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    photo: Option<String>,
    address: Option<String>,
    coordinate: Option<Coordinate>,
    created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            photo: None,
            address: None,
            coordinate: None,
            created_at: Utc::now(),
        }
    }

    /// 从数据库行重建
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: UserId,
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        photo: Option<String>,
        address: Option<String>,
        coordinate: Option<Coordinate>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            phone,
            photo,
            address,
            coordinate,
            created_at,
        }
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for UserProfile {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

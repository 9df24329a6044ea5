//! Geocode 适配器
//!
//! 提供地址到经纬度的解析功能，支持：
//! - Nominatim (OpenStreetMap) 正向地理编码
//! - 请求节流（公共实例要求两次请求间隔至少 1 秒）
//! - 静态表实现，用于测试和离线环境

mod client;

pub use client::{NominatimGeocoder, StaticGeocoder};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    "mandeAPI".to_string()
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            min_delay_ms: default_min_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

use mande_errors::AppResult;

/// 解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// 地理编码接口
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// 将自由文本地址解析为坐标，无结果时返回 None
    async fn geocode(&self, address: &str) -> AppResult<Option<GeocodedLocation>>;
}

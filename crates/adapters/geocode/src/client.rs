//! 地理编码客户端实现

use crate::{GeocodeConfig, GeocodedLocation, Geocoder};
use mande_common::retry::{RetryConfig, is_retryable_error, with_conditional_retry};
use mande_errors::{AppError, AppResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Nominatim /search 响应条目
///
/// 公共 API 将经纬度编码为字符串
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// Nominatim 地理编码器
pub struct NominatimGeocoder {
    config: GeocodeConfig,
    client: reqwest::Client,
    retry: RetryConfig,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocoder {
    /// 创建新的地理编码器
    pub fn new(config: GeocodeConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            retry: RetryConfig::default(),
            last_request: Mutex::new(None),
        })
    }

    /// 请求节流，保证两次请求间隔不低于 min_delay_ms
    async fn throttle(&self) {
        let min_delay = Duration::from_millis(self.config.min_delay_ms);
        let mut last = self.last_request.lock().await;

        if let Some(instant) = *last {
            let elapsed = instant.elapsed();
            if elapsed < min_delay {
                tokio::time::sleep(min_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn fetch(&self, address: &str) -> AppResult<Vec<NominatimPlace>> {
        self.throttle().await;

        let url = format!("{}/search", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Geocoding service returned status {}",
                response.status()
            )));
        }

        response
            .json::<Vec<NominatimPlace>>()
            .await
            .map_err(|e| AppError::external_service(format!("Invalid geocoding response: {}", e)))
    }
}

#[async_trait::async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> AppResult<Option<GeocodedLocation>> {
        if address.trim().is_empty() {
            return Ok(None);
        }

        let places = with_conditional_retry(
            &self.retry,
            "Nominatim geocode",
            || self.fetch(address),
            |e| is_retryable_error(&e.to_string()),
        )
        .await?;

        let Some(place) = places.into_iter().next() else {
            debug!(address = %address, "Address not found by geocoder");
            return Ok(None);
        };

        let latitude = place.lat.parse::<f64>().map_err(|e| {
            AppError::external_service(format!("Invalid latitude in response: {}", e))
        })?;
        let longitude = place.lon.parse::<f64>().map_err(|e| {
            AppError::external_service(format!("Invalid longitude in response: {}", e))
        })?;

        debug!(
            address = %address,
            latitude = latitude,
            longitude = longitude,
            "Address geocoded"
        );

        Ok(Some(GeocodedLocation {
            latitude,
            longitude,
            display_name: place.display_name,
        }))
    }
}

/// 静态地理编码器
///
/// 从固定的地址表解析坐标，用于测试和离线环境
#[derive(Default)]
pub struct StaticGeocoder {
    entries: HashMap<String, GeocodedLocation>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(
        mut self,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let address = address.into();
        self.entries.insert(
            address.clone(),
            GeocodedLocation {
                latitude,
                longitude,
                display_name: address,
            },
        );
        self
    }
}

#[async_trait::async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, address: &str) -> AppResult<Option<GeocodedLocation>> {
        Ok(self.entries.get(address).cloned())
    }
}

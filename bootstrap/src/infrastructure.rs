//! 基础设施资源管理
//!
//! 统一管理服务共享的基础设施资源

use std::sync::Arc;

use mande_adapter_geocode::{GeocodeConfig, Geocoder, NominatimGeocoder};
use mande_adapter_postgres::{PoolStatus, PostgresConfig, create_pool, pool_status};
use mande_common::retry::{RetryConfig, with_retry};
use mande_config::AppConfig;
use mande_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// 基础设施资源容器
///
/// 包含服务共享的基础设施资源，由 bootstrap 统一初始化
#[derive(Clone)]
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// PostgreSQL 连接池
    postgres_pool: PgPool,
    /// 地理编码器
    geocoder: Arc<dyn Geocoder>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        // 1. 创建 PostgreSQL 连接池（必需，带重试）
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);
        let postgres_pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            "PostgreSQL connection pool created (max_connections: {})",
            config.database.max_connections
        );

        // 2. 创建地理编码器
        let geocode_config = GeocodeConfig {
            base_url: config.geocoding.base_url.clone(),
            user_agent: config.geocoding.user_agent.clone(),
            min_delay_ms: config.geocoding.min_delay_ms,
            timeout_secs: config.geocoding.timeout_secs,
        };
        let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimGeocoder::new(geocode_config)?);
        info!(
            base_url = %config.geocoding.base_url,
            user_agent = %config.geocoding.user_agent,
            "Geocoder initialized"
        );

        Ok(Self {
            config,
            postgres_pool,
            geocoder,
        })
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 获取服务器配置
    pub fn server_config(&self) -> &mande_config::ServerConfig {
        &self.config.server
    }

    /// 获取地理编码器
    pub fn geocoder(&self) -> Arc<dyn Geocoder> {
        self.geocoder.clone()
    }

    /// 获取 PostgreSQL 连接池状态
    pub fn postgres_pool_status(&self) -> PoolStatus {
        pool_status(&self.postgres_pool)
    }
}

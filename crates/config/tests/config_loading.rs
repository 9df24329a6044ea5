use mande_config::AppConfig;
use secrecy::ExposeSecret;

#[test]
fn test_load_config_from_toml_files() {
    dotenvy::dotenv().ok();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(
        dir.path().join("default.toml"),
        r#"
app_name = "marketplace"
app_env = "development"

[database]
url = "postgres://localhost:5432/mande"
max_connections = 5

[server]
host = "0.0.0.0"
port = 8080

[telemetry]
log_level = "debug"
"#,
    )
    .expect("Failed to write default.toml");

    // 环境覆盖文件优先于 default.toml
    std::fs::write(
        dir.path().join("development.toml"),
        r#"
[server]
port = 8081
"#,
    )
    .expect("Failed to write development.toml");

    let config =
        AppConfig::load(dir.path().to_str().expect("temp dir path")).expect("Failed to load config");

    assert_eq!(config.app_name, "marketplace");
    assert!(config.is_development());
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.database.max_connections, 5);
    assert!(config.database.url.expose_secret().starts_with("postgres://"));
    assert_eq!(config.telemetry.log_level, "debug");
    // 未显式配置时回落到 Nominatim 默认值
    assert_eq!(config.geocoding.user_agent, "mandeAPI");
    assert_eq!(config.geocoding.min_delay_ms, 1000);
}

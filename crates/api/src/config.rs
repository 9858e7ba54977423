use domain::models::location::ListOrder;
use domain::services::LocationSettings;
use persistence::db::DatabaseConfig;
use serde::{Deserialize, Serialize};
use std::net::{AddrParseError, SocketAddr};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    /// Snapshot link settings
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub locations: LocationsConfig,
    /// Map defaults handed to clients
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origins; empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default)]
    pub hsts_enabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareConfig {
    /// Base of shareable snapshot links. When empty the request host is used.
    #[serde(default)]
    pub public_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationsConfig {
    #[serde(default = "default_radius_meters")]
    pub default_radius_meters: i32,

    #[serde(default)]
    pub list_order: ListOrder,
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            default_radius_meters: default_radius_meters(),
            list_order: ListOrder::default(),
        }
    }
}

impl LocationsConfig {
    pub fn settings(&self) -> LocationSettings {
        LocationSettings {
            default_radius_meters: self.default_radius_meters,
            list_order: self.list_order,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapBounds {
    #[serde(alias = "south_west")]
    pub south_west: MapPoint,
    #[serde(alias = "north_east")]
    pub north_east: MapPoint,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_map_center")]
    pub center: MapPoint,

    #[serde(default = "default_map_bounds")]
    pub bounds: MapBounds,

    #[serde(default = "default_map_zoom")]
    pub default_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_map_center(),
            bounds: default_map_bounds(),
            default_zoom: default_map_zoom(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_size() -> usize {
    1_048_576 // 1MB
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_radius_meters() -> i32 {
    100
}

// Diriyah
fn default_map_center() -> MapPoint {
    MapPoint {
        latitude: 24.7423,
        longitude: 46.5733,
    }
}

fn default_map_bounds() -> MapBounds {
    MapBounds {
        south_west: MapPoint {
            latitude: 24.7328,
            longitude: 46.5598,
        },
        north_east: MapPoint {
            latitude: 24.7512,
            longitude: 46.5864,
        },
    }
}

fn default_map_zoom() -> f64 {
    14.8
}

const TLS_MODES: [&str; 6] = [
    "disable",
    "allow",
    "prefer",
    "require",
    "verify-ca",
    "verify-full",
];

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with SM__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("SM")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("security.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides, without
    /// touching the filesystem.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30
            max_body_size = 1048576

            [database]
            url = ""
            max_connections = 20
            min_connections = 1

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []

            [share]
            public_base_url = ""

            [locations]
            default_radius_meters = 100
            list_order = "newest_first"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.database.is_configured() {
            return Err(ConfigValidationError::MissingRequired(
                "SM__DATABASE__URL or SM__DATABASE__HOST and SM__DATABASE__NAME must be set"
                    .to_string(),
            ));
        }

        if let Some(mode) = &self.database.tls_mode {
            if !TLS_MODES.contains(&mode.as_str()) {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "database.tls_mode must be one of {}",
                    TLS_MODES.join(", ")
                )));
            }
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if self.locations.default_radius_meters <= 0 {
            return Err(ConfigValidationError::InvalidValue(
                "locations.default_radius_meters must be positive".to_string(),
            ));
        }

        let base = self.share.public_base_url.trim();
        if !base.is_empty() {
            match url::Url::parse(base) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                _ => {
                    return Err(ConfigValidationError::InvalidValue(format!(
                        "share.public_base_url is not an absolute http(s) URL: {}",
                        base
                    )))
                }
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}

//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub forum: ForumConfig,
    pub storage: StorageConfig,
    pub background: BackgroundConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Forum behaviour knobs
#[derive(Debug, Clone, Deserialize)]
pub struct ForumConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_notification_cap")]
    pub notification_cap: usize,
    /// Delay applied before every session call and submission
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
    pub demo: DemoAccountConfig,
}

impl ForumConfig {
    #[must_use]
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Defaults with no latency and no demo data
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            simulated_latency_ms: 0,
            seed_demo_data: false,
            ..Self::default()
        }
    }
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            notification_cap: default_notification_cap(),
            simulated_latency_ms: default_simulated_latency_ms(),
            seed_demo_data: true,
            demo: DemoAccountConfig::default(),
        }
    }
}

/// Credential seeded at startup so the demo can be signed into
#[derive(Debug, Clone, Deserialize)]
pub struct DemoAccountConfig {
    #[serde(default = "default_demo_name")]
    pub name: String,
    #[serde(default = "default_demo_email")]
    pub email: String,
    #[serde(default = "default_demo_password")]
    pub password: String,
}

impl Default for DemoAccountConfig {
    fn default() -> Self {
        Self {
            name: default_demo_name(),
            email: default_demo_email(),
            password: default_demo_password(),
        }
    }
}

/// Where the viewer record is kept between runs
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// `None` keeps the record in memory only
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from(default_storage_path())),
        }
    }
}

/// Demo notification injector
#[derive(Debug, Clone, Deserialize)]
pub struct BackgroundConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Chance per tick that a notification is produced
    #[serde(default = "default_background_probability")]
    pub probability: f64,
    #[serde(default = "default_background_interval_secs")]
    pub interval_secs: u64,
}

impl BackgroundConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            probability: default_background_probability(),
            interval_secs: default_background_interval_secs(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "qa-forum".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_page_size() -> usize {
    6
}

fn default_notification_cap() -> usize {
    10
}

fn default_simulated_latency_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_demo_name() -> String {
    "demo".to_string()
}

fn default_demo_email() -> String {
    "demo@example.com".to_string()
}

fn default_demo_password() -> String {
    "password".to_string()
}

fn default_storage_path() -> String {
    "./forum-storage.json".to_string()
}

fn default_background_probability() -> f64 {
    0.1
}

fn default_background_interval_secs() -> u64 {
    30
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(key) {
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue(key, raw)),
        },
        None => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    ///
    /// # Errors
    /// Returns an error if required keys are missing or malformed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let page_size = parse_or(&lookup, "FORUM_PAGE_SIZE", default_page_size())?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue("FORUM_PAGE_SIZE", "0".to_string()));
        }

        let notification_cap = parse_or(&lookup, "FORUM_NOTIFICATION_CAP", default_notification_cap())?;
        if notification_cap == 0 {
            return Err(ConfigError::InvalidValue(
                "FORUM_NOTIFICATION_CAP",
                "0".to_string(),
            ));
        }

        let probability: f64 = parse_or(
            &lookup,
            "FORUM_BACKGROUND_PROBABILITY",
            default_background_probability(),
        )?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::InvalidValue(
                "FORUM_BACKGROUND_PROBABILITY",
                probability.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: lookup("API_PORT")
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: parse_or(&lookup, "WORKER_ID", 0)?,
            },
            forum: ForumConfig {
                page_size,
                notification_cap,
                simulated_latency_ms: parse_or(
                    &lookup,
                    "FORUM_SIMULATED_LATENCY_MS",
                    default_simulated_latency_ms(),
                )?,
                seed_demo_data: parse_bool(&lookup, "FORUM_SEED_DEMO_DATA", true)?,
                demo: DemoAccountConfig {
                    name: lookup("FORUM_DEMO_NAME").unwrap_or_else(default_demo_name),
                    email: lookup("FORUM_DEMO_EMAIL").unwrap_or_else(default_demo_email),
                    password: lookup("FORUM_DEMO_PASSWORD").unwrap_or_else(default_demo_password),
                },
            },
            storage: StorageConfig {
                path: match lookup("FORUM_STORAGE_PATH") {
                    Some(p) if p.trim().is_empty() || p.trim() == ":memory:" => None,
                    Some(p) => Some(PathBuf::from(p)),
                    None => Some(PathBuf::from(default_storage_path())),
                },
            },
            background: BackgroundConfig {
                enabled: parse_bool(&lookup, "FORUM_BACKGROUND_NOTIFICATIONS", false)?,
                probability,
                interval_secs: parse_or(
                    &lookup,
                    "FORUM_BACKGROUND_INTERVAL_SECS",
                    default_background_interval_secs(),
                )?,
            },
        })
    }

    /// In-memory configuration listening on `port`, without latency or demo data
    #[must_use]
    pub fn for_tests(port: u16) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            api: ServerConfig {
                host: default_host(),
                port,
            },
            cors: CorsConfig::default(),
            snowflake: SnowflakeConfig::default(),
            forum: ForumConfig::for_tests(),
            storage: StorageConfig { path: None },
            background: BackgroundConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

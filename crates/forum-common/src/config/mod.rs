//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BackgroundConfig, ConfigError, CorsConfig, DemoAccountConfig,
    Environment, ForumConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};

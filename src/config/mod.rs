//! Application configuration

mod app_config;

pub use app_config::{AppConfig, ExchangeConfig, LogFormat, LoggingConfig, ServerConfig};

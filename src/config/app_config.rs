use serde::Deserialize;

use crate::domain::AssignmentStrategy;
use crate::infrastructure::observability::MetricsConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub exchange: ExchangeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allow any origin, as the browser admin UI is served separately
    pub cors_permissive: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Gift exchange settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Prefix of every issued redemption code
    pub code_prefix: String,
    /// Rules text used when a team is created without any
    pub default_rules: String,
    pub default_participant_count: usize,
    pub min_participants: usize,
    pub max_participants: usize,
    pub assignment_strategy: AssignmentStrategy,
    /// Fixed RNG seed for reproducible draws; entropy when unset
    pub random_seed: Option<u64>,
    /// Seed a demo team with fixed codes on startup
    pub seed_sample_team: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_permissive: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            code_prefix: "MVT".to_string(),
            default_rules: "No rules specified".to_string(),
            default_participant_count: 5,
            min_participants: 2,
            max_participants: 50,
            assignment_strategy: AssignmentStrategy::default(),
            random_seed: None,
            seed_sample_team: false,
        }
    }
}

impl ExchangeConfig {
    /// Whether a requested participant count is within the allowed range
    pub fn allows_participant_count(&self, count: usize) -> bool {
        (self.min_participants..=self.max_participants).contains(&count)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("SANTA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

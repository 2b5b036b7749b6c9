use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CONTENT_PILOT__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Cost-per-follower target used when a campaign has none of its own.
    #[serde(default = "default_target_cpf")]
    pub default_target_cpf: f64,
    /// Upper bound of the marginal band, as a multiple of the target.
    #[serde(default = "default_marginal_multiplier")]
    pub marginal_multiplier: f64,
    /// One of `day`, `week`, `month`.
    #[serde(default = "default_granularity")]
    pub default_granularity: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

// Default functions
fn default_target_cpf() -> f64 {
    0.50
}
fn default_marginal_multiplier() -> f64 {
    1.5
}
fn default_granularity() -> String {
    "day".to_string()
}
fn default_max_entries() -> usize {
    10_000
}
fn default_log_filter() -> String {
    "content_pilot=info,pilot_cache=info".to_string()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_target_cpf: default_target_cpf(),
            marginal_multiplier: default_marginal_multiplier(),
            default_granularity: default_granularity(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analytics: AnalyticsConfig::default(),
            cache: CacheConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CONTENT_PILOT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

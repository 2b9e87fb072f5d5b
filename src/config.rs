use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::ScoringRules;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub tables: TableSettings,
    #[serde(default)]
    pub admin: AdminSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub widgets: WidgetSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub recommendations: RecommendationSettings,
    #[serde(default)]
    pub scoring: ScoringRules,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Hosted backend (data API + auth API)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub url: String,
    /// Privileged key used for data API calls
    #[serde(default)]
    pub service_key: String,
    /// Public key used for auth API calls
    #[serde(default)]
    pub anon_key: String,
    /// HS256 secret the auth API signs access tokens with
    #[serde(default)]
    pub jwt_secret: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_destinations_table")]
    pub destinations: String,
    #[serde(default = "default_preferences_table")]
    pub user_preferences: String,
    #[serde(default = "default_posts_table")]
    pub posts: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            destinations: default_destinations_table(),
            user_preferences: default_preferences_table(),
            posts: default_posts_table(),
        }
    }
}

fn default_destinations_table() -> String { "destinations".to_string() }
fn default_preferences_table() -> String { "user_preferences".to_string() }
fn default_posts_table() -> String { "posts".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSettings {
    /// Shared secret expected in `x-admin-secret`; admin writes are open when unset
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WidgetSettings {
    pub weather_api_key: Option<String>,
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_weather_ttl")]
    pub weather_ttl_secs: u64,
    #[serde(default = "default_currency_url")]
    pub currency_url: String,
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    #[serde(default = "default_fallback_rate")]
    pub fallback_rate: f64,
    #[serde(default = "default_currency_ttl")]
    pub currency_ttl_secs: u64,
    pub timeout_secs: Option<u64>,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            weather_url: default_weather_url(),
            cities: default_cities(),
            country: default_country(),
            weather_ttl_secs: default_weather_ttl(),
            currency_url: default_currency_url(),
            currency_code: default_currency_code(),
            fallback_rate: default_fallback_rate(),
            currency_ttl_secs: default_currency_ttl(),
            timeout_secs: None,
        }
    }
}

fn default_weather_url() -> String { "https://api.openweathermap.org/data/2.5/weather".to_string() }
fn default_cities() -> Vec<String> {
    vec!["Phnom Penh".to_string(), "Siem Reap".to_string(), "Kampot".to_string()]
}
fn default_country() -> String { "KH".to_string() }
fn default_weather_ttl() -> u64 { 1800 }
fn default_currency_url() -> String { "https://api.exchangerate-api.com/v4/latest/USD".to_string() }
fn default_currency_code() -> String { "KHR".to_string() }
fn default_fallback_rate() -> f64 { 4100.0 }
fn default_currency_ttl() -> u64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Shared L2 cache; widgets are cached in-process only when unset
    pub redis_url: Option<String>,
    #[serde(default = "default_l1_size")]
    pub l1_cache_size: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            redis_url: None,
            l1_cache_size: default_l1_size(),
        }
    }
}

fn default_l1_size() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

fn default_suggestion_limit() -> usize { 20 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GUIDE__)
    /// 5. Well-known backend variables (SUPABASE_URL, ADMIN_SECRET, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GUIDE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("GUIDE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("GUIDE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.scoring
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid scoring rules: {}", e)))?;

        if self.recommendations.suggestion_limit == 0 {
            return Err(ConfigError::Message(
                "recommendations.suggestion_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Variables the hosted backend tooling exports under fixed names
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SUPABASE_URL", "backend.url"),
    ("SUPABASE_SERVICE_ROLE_KEY", "backend.service_key"),
    ("SUPABASE_ANON_KEY", "backend.anon_key"),
    ("SUPABASE_JWT_SECRET", "backend.jwt_secret"),
    ("ADMIN_SECRET", "admin.secret"),
    ("OPENWEATHER_API_KEY", "widgets.weather_api_key"),
    ("REDIS_URL", "cache.redis_url"),
];

/// Apply well-known unprefixed environment variables on top of the layered config
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    for (var, key) in ENV_OVERRIDES {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                builder = builder.set_override(*key, value)?;
            }
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let settings: Settings = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.tables.destinations, "destinations");
        assert_eq!(settings.widgets.cities.len(), 3);
        assert_eq!(settings.widgets.fallback_rate, 4100.0);
        assert_eq!(settings.recommendations.suggestion_limit, 20);
        assert_eq!(settings.scoring, ScoringRules::default());
        assert!(settings.admin.secret.is_none());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "compact");
    }

    #[test]
    fn test_scoring_tables_from_toml_source() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [backend]
                url = "https://project.example.co"

                [scoring]
                budget_bonus = 50.0
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.backend.url, "https://project.example.co");
        assert_eq!(settings.scoring.budget_bonus, 50.0);
        assert_eq!(settings.scoring.interest_bonus, 10.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_negative_bonus_rejected() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "[scoring]\ninterest_bonus = -1.0\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(settings.validate().is_err());
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

/// Defaults for summary query parameters the client leaves out
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SummaryConfig {
    #[serde(default = "default_last_n_days")]
    pub last_n_days: u32,
}

fn default_last_n_days() -> u32 {
    30
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            last_n_days: default_last_n_days(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub database: DatabaseConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
}

impl ServerConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default settings
            .set_default("database.url", "postgres://localhost/station")?
            .set_default("http.host", "0.0.0.0")?
            .set_default("http.port", 3000)?
            // Shared settings, e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. STATION__HTTP__PORT=8080)
            .add_source(Environment::with_prefix("STATION").separator("__"))
            // The conventional DATABASE_URL wins over everything else
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_files() {
        let config = ServerConfig::load("no-such-config-dir").unwrap();
        assert!(!config.database.url.is_empty());
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.summary.last_n_days, 30);
    }
}

//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Interest accrual configuration.
    #[serde(default)]
    pub accrual: AccrualConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Interest accrual configuration.
///
/// The expense and payable GLs receive the balanced two-leg entry that
/// every daily accrual posts.
#[derive(Debug, Clone, Deserialize)]
pub struct AccrualConfig {
    /// Interest expense GL number (debit leg).
    #[serde(default = "default_expense_gl")]
    pub interest_expense_gl: String,
    /// Interest payable GL number (credit leg).
    #[serde(default = "default_payable_gl")]
    pub interest_payable_gl: String,
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self {
            interest_expense_gl: default_expense_gl(),
            interest_payable_gl: default_payable_gl(),
        }
    }
}

fn default_expense_gl() -> String {
    "610101001".to_string()
}

fn default_payable_gl() -> String {
    "260101001".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COREBANK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accrual_config_defaults() {
        let accrual = AccrualConfig::default();
        assert_eq!(accrual.interest_expense_gl, "610101001");
        assert_eq!(accrual.interest_payable_gl, "260101001");
    }
}

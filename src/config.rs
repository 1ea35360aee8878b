use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub vestaboard: VestaboardConfig,
    pub quotes: QuoteConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VestaboardConfig {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Quote feature settings. `database` is only present when the feature is on.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteConfig {
    pub enabled: bool,
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| lookup(key).with_context(|| format!("{} must be set", key));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let vestaboard = VestaboardConfig {
            api_key: required("VESTABOARD_API_KEY")?,
            api_secret: required("VESTABOARD_API_SECRET")?,
            base_url: or_default("VESTABOARD_API_URL", "https://platform.vestaboard.com"),
            timeout_secs: or_default("VESTABOARD_TIMEOUT_SECS", "20")
                .parse()
                .context("VESTABOARD_TIMEOUT_SECS must be a number")?,
        };

        let enabled = parse_flag(&or_default("SAYING_DB_ENABLE", "0"));
        let database = if enabled {
            Some(DatabaseConfig {
                host: required("SAYING_DB_HOST")?,
                port: or_default("SAYING_DB_PORT", "3306")
                    .parse()
                    .context("SAYING_DB_PORT must be a number")?,
                user: required("SAYING_DB_USER")?,
                password: required("SAYING_DB_PASS")?,
                name: required("SAYING_DB_NAME")?,
                max_connections: or_default("SAYING_DB_MAX_CONNECTIONS", "5")
                    .parse()
                    .context("SAYING_DB_MAX_CONNECTIONS must be a number")?,
            })
        } else {
            None
        };

        let server = ServerConfig {
            host: or_default("HOST", "0.0.0.0"),
            port: or_default("PORT", "8000")
                .parse()
                .context("PORT must be a number")?,
        };

        Ok(Config {
            vestaboard,
            quotes: QuoteConfig { enabled, database },
            server,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Accepts the usual spellings of "on"
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

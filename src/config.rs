//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and then passed
//! explicitly to the components that need it.
//!
//! ```bash
//! export DATABASE_URL="sqlite://geolocation.db?mode=rwc"
//! export IPSTACK_ACCESS_KEY="your-access-key"
//! ```
//!
//! ## Required Variables
//!
//! - `IPSTACK_ACCESS_KEY` - ipstack API access key
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite database (default: `sqlite://geolocation.db?mode=rwc`)
//! - `IPSTACK_BASE_URL` - Provider endpoint (default: `http://api.ipstack.com`)
//! - `PROVIDER_TIMEOUT_SECONDS` - Provider request timeout (default: 10)
//! - `RESOLVER_TIMEOUT_SECONDS` - Hostname resolution timeout (default: 5)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `RATE_LIMIT_PER_SECOND` / `RATE_LIMIT_BURST` - Per-client limits on `/geo` (default: 5 / 50)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://geolocation.db?mode=rwc";
const DEFAULT_IPSTACK_BASE_URL: &str = "http://api.ipstack.com";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Access key sent to ipstack with every lookup. Never logged.
    pub ipstack_access_key: String,
    pub ipstack_base_url: String,
    pub provider_timeout_seconds: u64,
    /// Upper bound on a single hostname resolution; exceeding it counts as unresolvable.
    pub resolver_timeout_seconds: u64,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `IPSTACK_ACCESS_KEY` is missing.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let ipstack_access_key =
            env::var("IPSTACK_ACCESS_KEY").context("IPSTACK_ACCESS_KEY must be set")?;
        let ipstack_base_url =
            env::var("IPSTACK_BASE_URL").unwrap_or_else(|_| DEFAULT_IPSTACK_BASE_URL.to_string());

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            database_url,
            ipstack_access_key,
            ipstack_base_url,
            provider_timeout_seconds: parse_var("PROVIDER_TIMEOUT_SECONDS", 10),
            resolver_timeout_seconds: parse_var("RESOLVER_TIMEOUT_SECONDS", 5),
            listen_addr,
            log_level,
            log_format,
            rate_limit_per_second: parse_var("RATE_LIMIT_PER_SECOND", 5),
            rate_limit_burst: parse_var("RATE_LIMIT_BURST", 50),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5),
            db_connect_timeout: parse_var("DB_CONNECT_TIMEOUT", 30),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `ipstack_access_key` is empty
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a SQLite URL
    /// - any timeout, rate or pool size is zero
    pub fn validate(&self) -> Result<()> {
        if self.ipstack_access_key.trim().is_empty() {
            anyhow::bail!("IPSTACK_ACCESS_KEY must not be empty");
        }

        if !self.ipstack_base_url.starts_with("http://")
            && !self.ipstack_base_url.starts_with("https://")
        {
            anyhow::bail!(
                "IPSTACK_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.ipstack_base_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.provider_timeout_seconds == 0 {
            anyhow::bail!("PROVIDER_TIMEOUT_SECONDS must be greater than 0");
        }
        if self.resolver_timeout_seconds == 0 {
            anyhow::bail!("RESOLVER_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.rate_limit_per_second == 0 || self.rate_limit_burst == 0 {
            anyhow::bail!("RATE_LIMIT_PER_SECOND and RATE_LIMIT_BURST must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_seconds)
    }

    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_secs(self.resolver_timeout_seconds)
    }

    pub fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Provider: {}", self.ipstack_base_url);
        tracing::info!(
            "  Provider access key: {}",
            mask_secret(&self.ipstack_access_key)
        );
        tracing::info!(
            "  Timeouts: provider {}s, resolver {}s",
            self.provider_timeout_seconds,
            self.resolver_timeout_seconds
        );
        tracing::info!(
            "  Rate limit: {}/s, burst {}",
            self.rate_limit_per_second,
            self.rate_limit_burst
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads and parses an optional variable, falling back to `default` when it is
/// unset or unparsable.
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Masks a secret for logging, keeping only its last four characters.
///
/// - `abcdef123456` → `********3456`
/// - `abc` → `***`
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

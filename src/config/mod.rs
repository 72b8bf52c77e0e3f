/// Configuration management for the leadline server
///
/// Everything comes from environment variables with sensible defaults so the
/// binary runs unconfigured in development and is tuned per container in
/// deployment.

use anyhow::{Context, Result};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub host: String,
    pub port: u16,
}

/// Storage layout for the tenant directory and tenant databases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Base directory (default: "data")
    /// Creates: tenants.db, {slug}/crm.db
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of a login session
    pub session_ttl_minutes: i64,
    /// Shared secret for `POST /api/tenants`; tenant creation is disabled
    /// when unset
    #[serde(skip_serializing)]
    pub bootstrap_token: Option<String>,
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3004;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;
/// One year
pub const MAX_SESSION_TTL_MINUTES: i64 = 365 * 24 * 60;

fn var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Default for Config {
    /// Defaults with ENV_VAR overrides; malformed numbers fall back silently.
    /// Use `from_env` to reject them instead.
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: var("LEADLINE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: var("LEADLINE_PORT")
                    .and_then(|port| port.parse().ok())
                    .unwrap_or(DEFAULT_PORT),
            },
            database: DatabaseConfig {
                data_dir: var("LEADLINE_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            },
            auth: AuthConfig {
                session_ttl_minutes: var("LEADLINE_SESSION_TTL_MINUTES")
                    .and_then(|ttl| parse_session_ttl(&ttl).ok())
                    .unwrap_or(DEFAULT_SESSION_TTL_MINUTES),
                bootstrap_token: var("LEADLINE_BOOTSTRAP_TOKEN"),
            },
        }
    }
}

impl Config {
    /// Read the environment, failing on values that do not parse
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = var("LEADLINE_PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("LEADLINE_PORT must be a port number, got {port:?}"))?;
        }

        if let Some(ttl) = var("LEADLINE_SESSION_TTL_MINUTES") {
            config.auth.session_ttl_minutes = parse_session_ttl(&ttl)?;
        }

        Ok(config)
    }

    /// Configuration rooted at `data_dir`, ignoring the environment
    pub fn for_data_dir(data_dir: impl Into<String>) -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            database: DatabaseConfig {
                data_dir: data_dir.into(),
            },
            auth: AuthConfig {
                session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
                bootstrap_token: None,
            },
        }
    }

    /// Session lifetime; out-of-range values fall back to the default
    pub fn session_ttl(&self) -> TimeDelta {
        Some(self.auth.session_ttl_minutes)
            .filter(|minutes| (1..=MAX_SESSION_TTL_MINUTES).contains(minutes))
            .and_then(TimeDelta::try_minutes)
            .unwrap_or(TimeDelta::hours(8))
    }
}

fn parse_session_ttl(raw: &str) -> Result<i64> {
    let minutes: i64 = raw.parse().with_context(|| {
        format!("LEADLINE_SESSION_TTL_MINUTES must be an integer, got {raw:?}")
    })?;
    anyhow::ensure!(
        (1..=MAX_SESSION_TTL_MINUTES).contains(&minutes),
        "LEADLINE_SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {minutes}"
    );
    TimeDelta::try_minutes(minutes)
        .with_context(|| format!("LEADLINE_SESSION_TTL_MINUTES is out of range: {minutes}"))?;
    Ok(minutes)
}

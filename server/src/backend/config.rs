use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Result};
use axum::http::HeaderValue;
use tracing::info;

pub const DATABASE_URL_VAR: &str = "HEALTH_JOURNAL_DATABASE_URL";
pub const ADDR_VAR: &str = "HEALTH_JOURNAL_ADDR";
pub const CORS_ORIGIN_VAR: &str = "HEALTH_JOURNAL_CORS_ORIGIN";
pub const STATIC_DIR_VAR: &str = "HEALTH_JOURNAL_STATIC_DIR";

/// Server settings read from the environment at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Built frontend to serve for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            database_url: try_load(&lookup, DATABASE_URL_VAR, "sqlite:health_journal.db")?,
            addr: try_load(&lookup, ADDR_VAR, "127.0.0.1:3000")?,
            cors_origin: try_load(&lookup, CORS_ORIGIN_VAR, "http://localhost:8080")?,
            static_dir: lookup(STATIC_DIR_VAR)
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:health_journal.db".to_string(),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origin: HeaderValue::from_static("http://localhost:8080"),
            static_dir: None,
        }
    }
}

fn try_load<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow!("Invalid {key} value {raw:?}: {e}"))
}

// src/config.rs
use std::net::SocketAddr;

use crate::error::ConfigError;

pub const ENV_NEWSAPI_KEY: &str = "NEWSAPI_KEY";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Process configuration, read once at startup. A missing API key is the
/// one fatal condition: the structured source cannot run without it, so
/// aggregation must not start at all.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub newsapi_key: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let newsapi_key = std::env::var(ENV_NEWSAPI_KEY)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingEnv(ENV_NEWSAPI_KEY))?;

        let bind_raw =
            std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            name: ENV_BIND_ADDR,
            value: bind_raw,
        })?;

        Ok(Self {
            newsapi_key,
            bind_addr,
        })
    }
}

// src/error.rs
// Typed failures at the source and configuration seams. Source failures are
// values, never panics: the aggregator logs them and keeps going.

use std::time::Duration;
use thiserror::Error;

/// A single source's failure. `Transport`, `Status` and `Timeout` cover the
/// source-unavailable cases; `Parse` covers malformed payloads.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed payload: {0}")]
    Parse(String),

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// Fatal startup-time configuration problems. Aggregation must not start
/// when one of these is raised.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

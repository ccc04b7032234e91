// src/lib.rs
// Public library surface for the binary and the integration tests.

pub mod aggregator;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod ingest;
pub mod sentiment;

// ---- Re-exports for stable public API ----
pub use crate::aggregator::Aggregator;
pub use crate::api::{router, AppState};
pub use crate::cache::{AggregationCache, Clock, SystemClock};
pub use crate::config::AppConfig;
pub use crate::error::{ConfigError, SourceError};
pub use crate::ingest::types::{
    NewsRecord, RawHeadline, SourceProvider, SourceQuery, NO_DESCRIPTION,
};
pub use crate::sentiment::{SentimentAnalyzer, SentimentScore};

// src/ingest/types.rs
use crate::error::SourceError;
use crate::sentiment::SentimentScore;

/// Description shown for records whose origin carries no excerpt
/// (scraped listing pages in particular).
pub const NO_DESCRIPTION: &str = "No description available.";

/// One row as a source hands it over, before normalization and scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeadline {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
}

/// The canonical record. Produced once by normalization, never mutated.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NewsRecord {
    pub title: String,
    pub description: String,
    pub url: String,
    pub sentiment: SentimentScore,
}

/// The query configuration, fixed at call time. Also the cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    /// Search keywords for the structured source.
    pub keywords: String,
    /// Allowed domains for the structured source; empty means unrestricted.
    pub domains: Vec<String>,
    pub language: String,
    pub sort_by: String,
    /// How far back the structured source may reach.
    pub lookback: chrono::Duration,
    /// Per-source cap for scraped listing pages.
    pub scrape_limit: usize,
}

impl SourceQuery {
    /// Stable string key for the cache. Two queries with equal fields map
    /// to the same key.
    pub fn cache_key(&self) -> String {
        format!(
            "q={}|domains={}|lang={}|sort={}|lookback_s={}|limit={}",
            self.keywords,
            self.domains.join(","),
            self.language,
            self.sort_by,
            self.lookback.num_seconds(),
            self.scrape_limit,
        )
    }
}

impl Default for SourceQuery {
    /// The fixed production query: recent English stock news, relevancy order.
    fn default() -> Self {
        Self {
            keywords: "stocks".to_string(),
            domains: Vec::new(),
            language: "en".to_string(),
            sort_by: "relevancy".to_string(),
            lookback: chrono::Duration::days(7),
            scrape_limit: 10,
        }
    }
}

/// One origin of raw headlines. Implementations must return every failure
/// as a `SourceError` value; nothing may panic past this boundary.
#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawHeadline>, SourceError>;
    fn name(&self) -> &'static str;
}

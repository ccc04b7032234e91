// src/aggregator.rs
//! The pipeline orchestrator: run every source, normalize and score what
//! came back, merge in fixed source order, and serve from the cache inside
//! its window. No source failure escapes past `aggregate`.

use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;

use crate::cache::AggregationCache;
use crate::error::SourceError;
use crate::ingest::normalize_record;
use crate::ingest::types::{NewsRecord, SourceProvider, SourceQuery};
use crate::sentiment::SentimentAnalyzer;

/// Hard bound on one source call. A hung connection counts as a failed
/// source, not a stalled run.
pub const PER_SOURCE_TIMEOUT: Duration = Duration::from_secs(12);

/// How many trailing records of the last known result set the fallback
/// path serves (three per source).
pub const FALLBACK_LIMIT: usize = 9;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("aggregate_runs_total", "Total aggregate calls.");
        describe_counter!(
            "aggregate_cache_hits_total",
            "Aggregate calls served from the cache."
        );
        describe_counter!(
            "aggregate_records_total",
            "Records merged across all sources."
        );
        describe_counter!("source_errors_total", "Source fetch/parse failures.");
        describe_counter!(
            "aggregate_fallback_total",
            "Runs where every source came back empty."
        );
        describe_gauge!(
            "aggregate_last_run_ts",
            "Unix ts of the last full (non-cached) aggregation."
        );
    });
}

pub struct Aggregator {
    providers: Vec<Box<dyn SourceProvider>>,
    analyzer: Arc<SentimentAnalyzer>,
    cache: AggregationCache,
}

impl Aggregator {
    /// Provider order is load-bearing: the merged sequence is the
    /// concatenation of contributions in exactly this order.
    pub fn new(
        providers: Vec<Box<dyn SourceProvider>>,
        analyzer: Arc<SentimentAnalyzer>,
        cache: AggregationCache,
    ) -> Self {
        Self {
            providers,
            analyzer,
            cache,
        }
    }

    /// Produce the ordered record set for `query`. Never fails: source
    /// failures contribute nothing, and an entirely empty run falls back
    /// to the last known result set when one exists.
    pub async fn aggregate(&self, query: &SourceQuery) -> Vec<NewsRecord> {
        ensure_metrics_described();
        counter!("aggregate_runs_total").increment(1);

        let key = query.cache_key();
        if let Some(records) = self.cache.get(&key) {
            counter!("aggregate_cache_hits_total").increment(1);
            tracing::debug!(count = records.len(), "serving aggregation from cache");
            return records;
        }

        // Sources run concurrently; join_all keeps declaration order, which
        // fixes the concatenation order below.
        let fetches = self.providers.iter().map(|p| async move {
            match tokio::time::timeout(PER_SOURCE_TIMEOUT, p.fetch(query)).await {
                Ok(res) => res,
                Err(_) => Err(SourceError::Timeout(PER_SOURCE_TIMEOUT)),
            }
        });
        let results = futures::future::join_all(fetches).await;

        let mut merged: Vec<NewsRecord> = Vec::new();
        for (provider, result) in self.providers.iter().zip(results) {
            match result {
                Ok(raw) => {
                    tracing::debug!(
                        source = provider.name(),
                        count = raw.len(),
                        "source contributed"
                    );
                    merged.extend(
                        raw.into_iter()
                            .filter_map(|r| normalize_record(r, &self.analyzer)),
                    );
                }
                Err(e) => {
                    tracing::warn!(source = provider.name(), error = %e, "source failed");
                    counter!("source_errors_total", "source" => provider.name()).increment(1);
                }
            }
        }

        if merged.is_empty() {
            counter!("aggregate_fallback_total").increment(1);
            // Empty runs are never cached: the next call re-attempts, and
            // the last complete result set stays available for fallback.
            if let Some(prev) = self.cache.last_known(&key) {
                let start = prev.len().saturating_sub(FALLBACK_LIMIT);
                tracing::warn!(
                    served = prev.len() - start,
                    "all sources empty; serving last known records"
                );
                return prev[start..].to_vec();
            }
            tracing::warn!("all sources empty and no prior data; serving empty result");
            return Vec::new();
        }

        counter!("aggregate_records_total").increment(merged.len() as u64);
        gauge!("aggregate_last_run_ts").set(chrono::Utc::now().timestamp() as f64);
        tracing::info!(count = merged.len(), "aggregation complete");

        self.cache.put(&key, merged.clone());
        merged
    }
}

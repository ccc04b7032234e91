// tests/cache_ttl.rs
// Cache behavior through the aggregator: idempotence inside the window,
// re-fetch after expiry, and the stale-fallback path, all on a fake clock.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use stock_news_aggregator::aggregator::{Aggregator, FALLBACK_LIMIT};
use stock_news_aggregator::cache::{AggregationCache, Clock, CACHE_TTL_SECS};
use stock_news_aggregator::error::SourceError;
use stock_news_aggregator::ingest::types::{RawHeadline, SourceProvider, SourceQuery};
use stock_news_aggregator::sentiment::SentimentAnalyzer;

struct FakeClock(AtomicU64);

impl FakeClock {
    fn advance(&self, secs: u64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now_unix(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

struct ScriptedProvider {
    rows: Arc<Mutex<Vec<RawHeadline>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    fn with_titles(titles: &[&str]) -> (Self, Arc<Mutex<Vec<RawHeadline>>>, Arc<AtomicUsize>) {
        let rows: Vec<RawHeadline> = titles
            .iter()
            .map(|t| RawHeadline {
                title: (*t).to_string(),
                description: None,
                url: format!("https://example.com/{}", t.replace(' ', "-")),
            })
            .collect();
        let rows = Arc::new(Mutex::new(rows));
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                rows: rows.clone(),
                calls: calls.clone(),
            },
            rows,
            calls,
        )
    }
}

#[async_trait::async_trait]
impl SourceProvider for ScriptedProvider {
    async fn fetch(&self, _query: &SourceQuery) -> Result<Vec<RawHeadline>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn build(
    provider: ScriptedProvider,
    clock: Arc<FakeClock>,
) -> Aggregator {
    Aggregator::new(
        vec![Box::new(provider)],
        Arc::new(SentimentAnalyzer::new()),
        AggregationCache::new(clock),
    )
}

#[tokio::test]
async fn second_call_inside_the_ttl_issues_no_fetches() {
    let clock = Arc::new(FakeClock(AtomicU64::new(1_000_000)));
    let (provider, _, calls) = ScriptedProvider::with_titles(&["one", "two"]);
    let agg = build(provider, clock);

    let q = SourceQuery::default();
    let first = agg.aggregate(&q).await;
    let second = agg.aggregate(&q).await;

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1, "cache hit must be a pure read");
}

#[tokio::test]
async fn crossing_the_ttl_triggers_a_fresh_fetch() {
    let clock = Arc::new(FakeClock(AtomicU64::new(1_000_000)));
    let (provider, rows, calls) = ScriptedProvider::with_titles(&["stale headline"]);
    let agg = build(provider, clock.clone());

    let q = SourceQuery::default();
    agg.aggregate(&q).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    clock.advance(CACHE_TTL_SECS);
    rows.lock().unwrap()[0].title = "fresh headline".into();

    let out = agg.aggregate(&q).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(out[0].title, "fresh headline");
}

#[tokio::test]
async fn distinct_queries_do_not_share_entries() {
    let clock = Arc::new(FakeClock(AtomicU64::new(1_000_000)));
    let (provider, _, calls) = ScriptedProvider::with_titles(&["one"]);
    let agg = build(provider, clock);

    let q1 = SourceQuery::default();
    let mut q2 = SourceQuery::default();
    q2.keywords = "bonds".into();

    agg.aggregate(&q1).await;
    agg.aggregate(&q2).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_refetch_falls_back_to_the_trailing_slice_of_the_stale_set() {
    let clock = Arc::new(FakeClock(AtomicU64::new(1_000_000)));
    let many: Vec<String> = (1..=12).map(|i| format!("headline {i}")).collect();
    let many_refs: Vec<&str> = many.iter().map(String::as_str).collect();
    let (provider, rows, calls) = ScriptedProvider::with_titles(&many_refs);
    let agg = build(provider, clock.clone());

    let q = SourceQuery::default();
    let full = agg.aggregate(&q).await;
    assert_eq!(full.len(), 12);

    // Past the window, the source dries up entirely.
    clock.advance(CACHE_TTL_SECS + 1);
    rows.lock().unwrap().clear();

    let degraded = agg.aggregate(&q).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(degraded.len(), FALLBACK_LIMIT);
    assert_eq!(degraded[0].title, "headline 4");
    assert_eq!(degraded.last().unwrap().title, "headline 12");

    // The fallback serve did not refresh the cache entry: the next call
    // still re-attempts the sources.
    agg.aggregate(&q).await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

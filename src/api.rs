// src/api.rs
// Presentation shell over the aggregation core: one JSON endpoint that
// serves the ordered record set partitioned by compound score, plus
// health and metrics. Kept thin on purpose; all policy lives in the core.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;

use crate::aggregator::Aggregator;
use crate::ingest::types::{NewsRecord, SourceQuery};

/// Records with a compound score above this land in the positive partition.
pub const POSITIVE_CUTOFF: f32 = 0.5;
/// Records with a compound score below this land in the negative partition.
pub const NEGATIVE_CUTOFF: f32 = -0.5;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub query: SourceQuery,
    pub prometheus: Option<PrometheusHandle>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/news", get(news))
        .route("/metrics", get(metrics_text))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct NewsResponse {
    pub all: Vec<NewsRecord>,
    pub positive: Vec<NewsRecord>,
    pub negative: Vec<NewsRecord>,
}

/// Split a record sequence into its strongly-positive and strongly-negative
/// subsets. Records between the cutoffs appear in neither.
pub fn partition(records: &[NewsRecord]) -> (Vec<NewsRecord>, Vec<NewsRecord>) {
    let positive = records
        .iter()
        .filter(|r| r.sentiment.compound > POSITIVE_CUTOFF)
        .cloned()
        .collect();
    let negative = records
        .iter()
        .filter(|r| r.sentiment.compound < NEGATIVE_CUTOFF)
        .cloned()
        .collect();
    (positive, negative)
}

async fn news(State(state): State<AppState>) -> Json<NewsResponse> {
    let all = state.aggregator.aggregate(&state.query).await;
    let (positive, negative) = partition(&all);
    Json(NewsResponse {
        all,
        positive,
        negative,
    })
}

async fn metrics_text(State(state): State<AppState>) -> String {
    match &state.prometheus {
        Some(handle) => handle.render(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentScore;

    fn record(title: &str, compound: f32) -> NewsRecord {
        NewsRecord {
            title: title.into(),
            description: "d".into(),
            url: "https://example.com".into(),
            sentiment: SentimentScore {
                positive: 0.0,
                neutral: 1.0,
                negative: 0.0,
                compound,
            },
        }
    }

    #[test]
    fn partition_respects_both_cutoffs() {
        let records = vec![
            record("up", 0.8),
            record("flat", 0.0),
            record("down", -0.7),
            record("barely up", 0.5),
        ];
        let (positive, negative) = partition(&records);
        assert_eq!(positive.len(), 1);
        assert_eq!(positive[0].title, "up");
        assert_eq!(negative.len(), 1);
        assert_eq!(negative[0].title, "down");
    }
}

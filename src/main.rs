//! Stock News Aggregator — Binary Entrypoint
//! Boots the Axum HTTP server around the aggregation core: config, the
//! shared sentiment analyzer, the three source providers, cache, routes.

use std::sync::Arc;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stock_news_aggregator::aggregator::Aggregator;
use stock_news_aggregator::api::{self, AppState};
use stock_news_aggregator::cache::{AggregationCache, SystemClock};
use stock_news_aggregator::config::AppConfig;
use stock_news_aggregator::ingest::providers::{
    self, FinvizProvider, MarketWatchProvider, NewsApiProvider,
};
use stock_news_aggregator::ingest::types::{SourceProvider, SourceQuery};
use stock_news_aggregator::sentiment::SentimentAnalyzer;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stock_news_aggregator=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Configuration problems are fatal here, before any source exists.
    let config = AppConfig::from_env().context("loading configuration")?;

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("installing metrics recorder")?;

    let client = providers::default_client().context("building http client")?;

    // Declaration order fixes the merged record order.
    let sources: Vec<Box<dyn SourceProvider>> = vec![
        Box::new(NewsApiProvider::new(
            client.clone(),
            config.newsapi_key.clone(),
        )),
        Box::new(FinvizProvider::new(client.clone())),
        Box::new(MarketWatchProvider::new(client)),
    ];

    let aggregator = Aggregator::new(
        sources,
        Arc::new(SentimentAnalyzer::new()),
        AggregationCache::new(Arc::new(SystemClock)),
    );

    let state = AppState {
        aggregator: Arc::new(aggregator),
        query: SourceQuery::default(),
        prometheus: Some(prometheus),
    };
    let router = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, router).await.context("serving http")?;

    Ok(())
}

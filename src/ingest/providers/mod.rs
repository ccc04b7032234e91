// src/ingest/providers/mod.rs
pub mod finviz;
pub mod marketwatch;
pub mod newsapi;

pub use finviz::FinvizProvider;
pub use marketwatch::MarketWatchProvider;
pub use newsapi::NewsApiProvider;

use std::time::Duration;

/// Browser-like UA; the listing sites reject default-identified clients.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Per-request ceiling inside the client itself. The aggregator wraps each
/// provider call in its own bound as well, so a hung connection can never
/// stall a run.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The shared outbound client. Built once at startup and handed to every
/// provider by clone (reqwest clients are cheap handles over one pool).
pub fn default_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

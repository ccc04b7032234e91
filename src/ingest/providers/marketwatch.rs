// src/ingest/providers/marketwatch.rs
//! Scraped source: the MarketWatch latest-news listing. Same best-effort
//! contract as the Finviz adapter.

use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use crate::error::SourceError;
use crate::ingest::types::{RawHeadline, SourceProvider, SourceQuery};

pub const MARKETWATCH_NEWS_URL: &str = "https://www.marketwatch.com/latest-news";
const BASE_ORIGIN: &str = "https://www.marketwatch.com/";
const HEADLINE_SELECTOR: &str = "div.article__content h3.article__headline a.link";

pub struct MarketWatchProvider {
    client: reqwest::Client,
}

impl MarketWatchProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Extract at most `limit` headline anchors, document order preserved.
pub fn parse_latest_news(body: &str, limit: usize) -> Vec<RawHeadline> {
    let document = Html::parse_document(body);
    let selector = Selector::parse(HEADLINE_SELECTOR).expect("static selector");
    let base = Url::parse(BASE_ORIGIN).expect("static origin");

    let mut out = Vec::new();
    for element in document.select(&selector) {
        if out.len() >= limit {
            break;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let title = element.text().collect::<Vec<_>>().join(" ").trim().to_string();
        if title.is_empty() {
            continue;
        }
        let Ok(url) = base.join(href) else {
            continue;
        };
        out.push(RawHeadline {
            title,
            description: None,
            url: url.to_string(),
        });
    }
    out
}

#[async_trait]
impl SourceProvider for MarketWatchProvider {
    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawHeadline>, SourceError> {
        let resp = self.client.get(MARKETWATCH_NEWS_URL).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }
        let body = resp.text().await?;
        Ok(parse_latest_news(&body, query.scrape_limit))
    }

    fn name(&self) -> &'static str {
        "marketwatch"
    }
}

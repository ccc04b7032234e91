// src/ingest/providers/newsapi.rs
//! Structured source: the NewsAPI `everything` search endpoint.
//! <https://newsapi.org/docs/endpoints/everything>

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use crate::error::SourceError;
use crate::ingest::types::{RawHeadline, SourceProvider, SourceQuery};

pub const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

pub struct NewsApiProvider {
    client: reqwest::Client,
    api_key: String,
}

impl NewsApiProvider {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

/// Parse an `everything` response body. Articles lacking a title or url
/// are skipped rather than failing the whole page.
pub fn parse_articles(body: &str) -> Result<Vec<RawHeadline>, SourceError> {
    let resp: EverythingResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;
    Ok(resp
        .articles
        .into_iter()
        .filter_map(|a| {
            let title = a.title?;
            let url = a.url?;
            Some(RawHeadline {
                title,
                description: a.description,
                url,
            })
        })
        .collect())
}

#[async_trait]
impl SourceProvider for NewsApiProvider {
    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawHeadline>, SourceError> {
        let from = (Utc::now() - query.lookback).format("%Y-%m-%d").to_string();

        let mut params = vec![
            ("q", query.keywords.clone()),
            ("language", query.language.clone()),
            ("sortBy", query.sort_by.clone()),
            ("from", from),
            ("apiKey", self.api_key.clone()),
        ];
        if !query.domains.is_empty() {
            params.push(("domains", query.domains.join(",")));
        }

        let resp = self
            .client
            .get(NEWS_API_URL)
            .query(&params)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body = resp.text().await?;
        parse_articles(&body)
    }

    fn name(&self) -> &'static str {
        "newsapi"
    }
}

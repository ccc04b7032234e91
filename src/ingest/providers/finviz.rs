// src/ingest/providers/finviz.rs
//! Scraped source: the Finviz news listing. Best effort only; a site
//! redesign shows up as an empty contribution, not a crash.

use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use crate::error::SourceError;
use crate::ingest::types::{RawHeadline, SourceProvider, SourceQuery};

pub const FINVIZ_NEWS_URL: &str = "https://finviz.com/news.ashx";
const BASE_ORIGIN: &str = "https://finviz.com/";
const HEADLINE_SELECTOR: &str = "table.styled-table-new tr.news_table-row a.nn-tab-link";

pub struct FinvizProvider {
    client: reqwest::Client,
}

impl FinvizProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Extract at most `limit` headline anchors from the listing document.
/// The href is resolved against the site origin because Finviz links its
/// own stories with relative paths. The HTML parser is error-recovering,
/// so an unexpected document simply selects nothing.
pub fn parse_news_page(body: &str, limit: usize) -> Vec<RawHeadline> {
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
impl SourceProvider for FinvizProvider {
    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<RawHeadline>, SourceError> {
        let resp = self.client.get(FINVIZ_NEWS_URL).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }
        let body = resp.text().await?;
        Ok(parse_news_page(&body, query.scrape_limit))
    }

    fn name(&self) -> &'static str {
        "finviz"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrelated_document_selects_nothing() {
        let rows = parse_news_page("<html><body><p>maintenance</p></body></html>", 10);
        assert!(rows.is_empty());
    }

    #[test]
    fn relative_links_resolve_against_the_origin() {
        let html = r#"<table class="styled-table-new"><tr class="news_table-row"><td>
            <a class="nn-tab-link" href="/news/12345/some-story">Story one</a>
        </td></tr></table>"#;
        let rows = parse_news_page(html, 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].url, "https://finviz.com/news/12345/some-story");
    }

    #[test]
    fn anchors_outside_the_news_table_are_ignored() {
        let html = r#"
            <a class="nn-tab-link" href="/elsewhere">Navigation</a>
            <table class="styled-table-new"><tr class="news_table-row"><td>
              <a class="nn-tab-link" href="/news/1/story">Story</a>
            </td></tr></table>"#;
        let rows = parse_news_page(html, 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Story");
    }
}

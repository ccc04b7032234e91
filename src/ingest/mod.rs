// src/ingest/mod.rs
pub mod providers;
pub mod types;

use crate::sentiment::SentimentAnalyzer;
use types::{NewsRecord, RawHeadline, NO_DESCRIPTION};

/// Normalize text: decode entities, strip tags, collapse whitespace, trim.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize curly and guillemet quotes to ASCII
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out = out.trim().to_string();

    // 5) Length cap: 500 chars (headlines and short excerpts only)
    if out.chars().count() > 500 {
        out = out.chars().take(500).collect();
    }

    out
}

/// Turn one raw row into the canonical record. Sentiment is computed from
/// the cleaned title only, for every source alike. Rows whose title
/// normalizes to empty are dropped. The url passes through unchanged.
pub fn normalize_record(raw: RawHeadline, analyzer: &SentimentAnalyzer) -> Option<NewsRecord> {
    let title = normalize_text(&raw.title);
    if title.is_empty() {
        return None;
    }
    let description = raw
        .description
        .map(|d| normalize_text(&d))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    let sentiment = analyzer.polarity_scores(&title);
    Some(NewsRecord {
        title,
        description,
        url: raw.url,
        sentiment,
    })
}

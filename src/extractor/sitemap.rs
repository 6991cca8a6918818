//! Sitemap retrieval and parsing.
//!
//! Handles both XML (`<loc>`) and plain-text URL-per-line sitemaps,
//! tolerating junk content in either.

use anyhow::{Context, Result};
use quick_xml::events::Event;
use rquest::Client;
use tracing::warn;
use url::Url;

pub const SITE_MAP_PATH: &str = "sitemap.xml";

#[derive(Debug, Clone)]
pub enum SitemapFormat {
    Xml,
    PlainText,
}

impl SitemapFormat {
    fn detect(text: &str) -> Self {
        match text.contains("<loc>") {
            true => SitemapFormat::Xml,
            false => SitemapFormat::PlainText,
        }
    }

    fn extract_urls(&self, text: &str) -> Vec<String> {
        match self {
            SitemapFormat::Xml => Self::extract_from_xml(text),
            SitemapFormat::PlainText => Self::extract_from_plain_text(text),
        }
    }

    fn extract_from_xml(text: &str) -> Vec<String> {
        let mut reader = quick_xml::Reader::from_str(text);
        let mut urls = Vec::new();
        let mut buf = Vec::new();
        let mut in_loc_tag = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"loc" => {
                    in_loc_tag = true;
                }
                Ok(Event::Text(e)) if in_loc_tag => {
                    match e.decode() {
                        Ok(txt) => urls.push(txt.trim().to_string()),
                        Err(e) => {
                            warn!("Invalid URL text at {:?}: {}", reader.buffer_position(), e);
                        }
                    }
                    in_loc_tag = false;
                }
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
            buf.clear();
        }
        urls
    }

    fn extract_from_plain_text(text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter_map(|token| Url::parse(token).ok())
            .map(|url| url.to_string())
            .collect()
    }
}

/// Fetch and parse `sitemap.xml` with the caller's client.
pub async fn fetch_sitemap_urls(client: &Client, base_url: &Url) -> Result<Vec<String>> {
    let sitemap_url = base_url
        .join(SITE_MAP_PATH)
        .context("Unable to join sitemap path onto base URL")?;

    let response = client
        .get(sitemap_url.as_str())
        .send()
        .await
        .context("Unable to send request for sitemap")?;

    if !response.status().is_success() {
        return Ok(Vec::new());
    }

    let text = response.text().await.context("Unable to get sitemap text")?;
    Ok(extract_urls_from_sitemap(&text))
}

fn extract_urls_from_sitemap(text: &str) -> Vec<String> {
    SitemapFormat::detect(text).extract_urls(text)
}

//! Site crawler - the upstream collaborator that feeds the scoring engine.
//!
//! Fetches the root page over HTTP and optionally discovers internal
//! subpages from the sitemap and same-host anchors. No JS rendering:
//! the trade-off is the same as a light HTTP audit (fast, no SPA
//! routes). Per-page failures are collected, never aborting the crawl.

use crate::domain::models::PageData;
use crate::error::{AppError, Result};
use crate::extractor::page_extractor::PageExtractor;
use crate::extractor::sitemap;
use crate::service::http::{create_client, decode_body, ClientType};
use regex::Regex;
use rquest::Client;
use scraper::Html;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Hard cap on subpage count regardless of what the caller asks for.
pub const MAX_SUBPAGES_CAP: usize = 50;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub include_subpages: bool,
    pub max_subpages: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            include_subpages: false,
            max_subpages: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlError {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct CrawlResult {
    pub pages: Vec<PageData>,
    pub errors: Vec<CrawlError>,
}

/// Accept only parseable http/https URLs.
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|_| AppError::invalid_url(format!("'{url}' is not a parseable URL")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(AppError::invalid_url(format!(
            "only http/https URLs are supported, got '{scheme}'"
        ))),
    }
}

/// HTTP crawler with caller-owned lifecycle. Construct one per crawl
/// session and drop it when done; it holds no global state.
pub struct SiteCrawler {
    client: Client,
}

impl SiteCrawler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_client(ClientType::HeavyEmulation)?,
        })
    }

    pub async fn crawl_site(&self, url: &str, options: &CrawlOptions) -> Result<CrawlResult> {
        let base = validate_url(url)?;
        info!("[CRAWLER] Starting crawl: {url}");

        let mut pages: Vec<PageData> = Vec::new();
        let mut errors: Vec<CrawlError> = Vec::new();

        match self.fetch_page(url).await {
            Ok(page) => pages.push(page),
            Err(err) => {
                warn!("[CRAWLER] Root fetch failed for {url}: {err:#}");
                errors.push(CrawlError {
                    url: url.to_string(),
                    error: err.to_string(),
                });
            }
        }

        let sub_links = if options.include_subpages && !pages.is_empty() {
            let max_subpages = options.max_subpages.min(MAX_SUBPAGES_CAP);

            let sitemap_links = match sitemap::fetch_sitemap_urls(&self.client, &base).await {
                Ok(urls) => urls,
                Err(err) => {
                    debug!("[CRAWLER] Sitemap fetch failed: {err:#}");
                    Vec::new()
                }
            };

            let anchor_links = {
                let document = Html::parse_document(&pages[0].html);
                PageExtractor::extract_internal_links(&document, &base)
            };

            let selected = select_subpages(&base, sitemap_links, anchor_links, max_subpages);
            info!(
                "[CRAWLER] Discovered {} subpages (sitemap + anchors, cap {max_subpages})",
                selected.len()
            );
            selected
        } else {
            Vec::new()
        };

        for sub_url in sub_links {
            match self.fetch_page(sub_url.as_str()).await {
                Ok(page) => pages.push(page),
                Err(err) => {
                    debug!("[CRAWLER] Subpage fetch failed for {sub_url}: {err:#}");
                    errors.push(CrawlError {
                        url: sub_url.to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            "[CRAWLER] Crawl complete - {} pages, {} errors",
            pages.len(),
            errors.len()
        );
        Ok(CrawlResult { pages, errors })
    }

    async fn fetch_page(&self, url: &str) -> anyhow::Result<PageData> {
        let started = Instant::now();

        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(rquest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        let load_time = started.elapsed().as_secs_f64() * 1000.0;

        let html = decode_body(&bytes, content_type.as_deref());
        let title = {
            let document = Html::parse_document(&html);
            PageExtractor::extract_title(&document).unwrap_or_default()
        };

        debug!(
            "[CRAWLER] Fetched {url} - status: {status_code}, size: {} bytes, load: {load_time:.0}ms",
            bytes.len()
        );

        Ok(PageData {
            url: url.to_string(),
            html,
            title,
            load_time,
            status_code,
        })
    }
}

/// Merge sitemap and anchor candidates in that order, dropping asset
/// URLs, the root page itself, cross-host entries and duplicates, then
/// cap the list.
fn select_subpages(
    base: &Url,
    sitemap_links: Vec<String>,
    anchor_links: Vec<Url>,
    max_subpages: usize,
) -> Vec<Url> {
    static ASSET_PATTERN: OnceLock<Regex> = OnceLock::new();
    let asset_pattern = ASSET_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\.(pdf|jpg|jpeg|png|gif|svg|css|js|ico|woff|woff2)$").unwrap()
    });

    let base_str = base.as_str().trim_end_matches('/').to_string();

    let candidates = sitemap_links
        .into_iter()
        .filter_map(|raw| Url::parse(&raw).ok())
        .chain(anchor_links)
        .map(|mut link| {
            link.set_fragment(None);
            link
        });

    let mut seen = HashSet::new();
    let mut selected = Vec::new();

    for link in candidates {
        if selected.len() >= max_subpages {
            break;
        }
        if link.host_str() != base.host_str() {
            continue;
        }
        if asset_pattern.is_match(link.as_str()) {
            continue;
        }
        if link.as_str().trim_end_matches('/') == base_str {
            continue;
        }
        if seen.insert(link.as_str().to_string()) {
            selected.push(link);
        }
    }

    selected
}

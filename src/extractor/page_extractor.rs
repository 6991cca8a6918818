//! Page-level HTML extraction shared by the crawler.

use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

pub struct PageExtractor;

impl PageExtractor {
    pub fn extract_title(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("title").unwrap());
        html.select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Extract same-host anchor links, resolved against the base URL with
    /// fragments stripped. Non-navigational schemes are skipped.
    pub fn extract_internal_links(html: &Html, base_url: &Url) -> Vec<Url> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap());

        let base_host = base_url.host_str();
        let base_port = base_url.port();

        html.select(selector)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| {
                !href.is_empty()
                    && !href.starts_with('#')
                    && !href.starts_with("javascript:")
                    && !href.starts_with("mailto:")
                    && !href.starts_with("tel:")
            })
            .filter_map(|href| base_url.join(href).ok())
            .map(|mut link| {
                link.set_fragment(None);
                link
            })
            .filter(|link| link.host_str() == base_host && link.port() == base_port)
            .collect()
    }
}

pub mod crawler;
pub mod http;

pub use crawler::{validate_url, CrawlOptions, CrawlResult, SiteCrawler};
pub use http::{create_client, decode_body, ClientType};

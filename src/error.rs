//! Error types for the GEO score analyzer.
//!
//! Only the crawler and CLI layers produce errors; the scoring engine
//! itself absorbs malformed input with zero/neutral scores and never
//! returns `Err` for well-typed input.

use thiserror::Error;

/// Domain-specific errors for crawl and report operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The crawl finished without a single successfully fetched page
    #[error("No pages could be crawled from {0}")]
    NoPagesCrawled(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create an invalid-URL error
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

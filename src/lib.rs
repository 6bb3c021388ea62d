//! ycrawler: an incremental front-page crawler for a news aggregator
//!
//! Every pass fetches the front page, works out which stories are new since
//! the previous pass, downloads each new story and its discussion thread,
//! follows the links posted in top-level comments and stores the raw pages
//! under a per-story directory tree.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use bytes::Bytes;
use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Body already attached for {url}")]
    AlreadyAttached { url: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Failure of a single GET issued through a [`crawler::Transport`]
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16, body: Bytes },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// The URL the failed request was issued for
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Timeout { url } | Self::Http { url, .. } => url,
        }
    }

    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            Self::Timeout { .. } => None,
        }
    }
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, Scheduler};
pub use model::{CommentThread, Story};
pub use state::{PageBody, SeenSet};

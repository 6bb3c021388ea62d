use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for ycrawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// The crawled site
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Prefix for relative story links and discussion URLs, e.g. `https://news.ycombinator.com`
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl SiteConfig {
    /// Base URL without trailing slashes
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Where fetched pages are written
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root of the persisted file tree
    pub root: PathBuf,
}

/// Timing of the repeating crawl loop
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds to wait between the end of one pass and the start of the next
    #[serde(rename = "pause-secs", default = "default_pause_secs")]
    pub pause_secs: u64,
}

impl ScheduleConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_secs(self.pause_secs)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            pause_secs: default_pause_secs(),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Skip TLS certificate validation
    #[serde(rename = "accept-invalid-certs", default)]
    pub accept_invalid_certs: bool,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            accept_invalid_certs: false,
        }
    }
}

fn default_pause_secs() -> u64 {
    60
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("ycrawler/{}", env!("CARGO_PKG_VERSION"))
}

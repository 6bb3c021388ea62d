//! Crawler module: fetching, extraction and pass orchestration
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching, single and batched
//! - Front page and discussion page extraction
//! - The coordinator running one pass
//! - The scheduler repeating passes with a pause in between

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_once, Coordinator};
pub use fetcher::{
    build_http_client, fetch_batch, FetchOutcome, HttpTransport, Transport, SUCCESS_STATUSES,
};
pub use parser::{parse_comment_page, parse_front_page, HnExtractor, PageExtractor};
pub use scheduler::{ScheduleSummary, Scheduler, StopHandle};

use crate::config::Config;
use crate::Result;

/// Builds the production coordinator and runs passes until stopped
///
/// This is the main entry point for a long-running crawl. The returned
/// scheduler is not started; call [`Scheduler::run`] on it.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Scheduler)` - Ready to run
/// * `Err(CrawlError)` - The HTTP client could not be built
pub fn build_scheduler(config: Config) -> Result<Scheduler> {
    let pause = config.schedule.pause();
    let coordinator = Coordinator::from_config(config)?;
    Ok(Scheduler::new(coordinator, pause))
}

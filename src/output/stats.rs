//! Per-pass crawl statistics

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Counters collected while running one pass
#[derive(Debug, Clone)]
pub struct PassStats {
    pub started_at: DateTime<Utc>,
    pub duration: Duration,

    /// Stories found on the front page
    pub discovered: usize,
    /// Stories not seen by any earlier pass
    pub new_stories: usize,

    pub stories_saved: usize,
    pub stories_failed: usize,
    /// New stories whose URL yields no on-disk identifier
    pub stories_unstorable: usize,

    pub discussions_failed: usize,

    pub sub_links_found: usize,
    pub sub_links_saved: usize,
    pub sub_links_failed: usize,
}

impl PassStats {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            duration: Duration::ZERO,
            discovered: 0,
            new_stories: 0,
            stories_saved: 0,
            stories_failed: 0,
            stories_unstorable: 0,
            discussions_failed: 0,
            sub_links_found: 0,
            sub_links_saved: 0,
            sub_links_failed: 0,
        }
    }

    /// Files written during the pass
    pub fn files_written(&self) -> usize {
        self.stories_saved + self.sub_links_saved
    }

    /// Fetches that ended in a transport failure
    pub fn fetch_failures(&self) -> usize {
        self.stories_failed + self.discussions_failed + self.sub_links_failed
    }

    pub fn log_summary(&self) {
        tracing::info!(
            "Pass finished in {:.2}s: {} discovered, {} new, {} files written, {} fetch failures",
            self.duration.as_secs_f64(),
            self.discovered,
            self.new_stories,
            self.files_written(),
            self.fetch_failures()
        );
    }
}

/// Prints pass statistics to stdout in a formatted manner
pub fn print_statistics(stats: &PassStats) {
    println!("=== Crawl Pass ===\n");

    println!("Started: {}", stats.started_at.to_rfc3339());
    println!("Duration: {:.2}s", stats.duration.as_secs_f64());
    println!();

    println!("Front page:");
    println!("  Stories discovered: {}", stats.discovered);
    println!("  New stories: {}", stats.new_stories);
    println!();

    println!("Story pages:");
    println!("  Saved: {}", stats.stories_saved);
    println!("  Failed: {}", stats.stories_failed);
    if stats.stories_unstorable > 0 {
        println!("  No identifier: {}", stats.stories_unstorable);
    }
    println!();

    println!("Discussions:");
    println!("  Failed: {}", stats.discussions_failed);
    println!("  Comment links found: {}", stats.sub_links_found);
    println!("  Comment links saved: {}", stats.sub_links_saved);
    println!("  Comment links failed: {}", stats.sub_links_failed);
}

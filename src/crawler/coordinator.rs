//! Crawler coordinator - one crawl pass
//!
//! A pass runs these steps strictly in order, each step fully resolving
//! before the next starts:
//!
//! 1. Fetch the front page and extract stories (a failure here aborts the pass)
//! 2. Keep only stories not seen by an earlier pass, then mark all as seen
//! 3. Fetch the new story pages concurrently
//! 4. Persist every story page that was fetched
//! 5. Fetch the discussion pages concurrently
//! 6. Extract links from top-level comments
//! 7. Fetch each story's comment links as one concurrent batch, story by story
//! 8. Persist every comment link that was fetched
//!
//! Failed fetches in steps 3, 5 and 7 are captured per page and skipped.
//! Write failures are not caught and abort the pass.

use crate::config::Config;
use crate::crawler::fetcher::{fetch_batch, FetchOutcome, HttpTransport, Transport};
use crate::crawler::parser::{HnExtractor, PageExtractor};
use crate::model::Story;
use crate::output::PassStats;
use crate::state::SeenSet;
use crate::storage::{story_dir, sub_link_dir, FsSink, PageSink};
use crate::Result;
use chrono::Utc;
use std::time::Instant;

/// Fetch results for the comment links of one story
struct SubLinkBatch {
    identifier: String,
    outcomes: Vec<FetchOutcome>,
}

/// Main crawler coordinator structure
///
/// Owns the seen set for the lifetime of the process and rebuilds all
/// stories from scratch on every pass.
pub struct Coordinator {
    config: Config,
    transport: Box<dyn Transport>,
    extractor: Box<dyn PageExtractor>,
    sink: Box<dyn PageSink>,
    seen: SeenSet,
}

impl Coordinator {
    /// Creates a coordinator from explicit collaborators
    pub fn new(
        config: Config,
        transport: Box<dyn Transport>,
        extractor: Box<dyn PageExtractor>,
        sink: Box<dyn PageSink>,
    ) -> Self {
        Self {
            config,
            transport,
            extractor,
            sink,
            seen: SeenSet::new(),
        }
    }

    /// Creates a coordinator using HTTP, the site markup rules and the local filesystem
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run passes
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn from_config(config: Config) -> Result<Self> {
        let transport = HttpTransport::from_config(&config.fetch)?;
        let extractor = HnExtractor::new(config.site.trimmed_base_url());

        Ok(Self::new(
            config,
            Box::new(transport),
            Box::new(extractor),
            Box::new(FsSink::new()),
        ))
    }

    /// Number of story URLs observed so far
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// Runs one complete pass
    ///
    /// # Returns
    ///
    /// * `Ok(PassStats)` - All steps completed
    /// * `Err(CrawlError)` - The front page could not be fetched, or a write failed
    pub async fn run_pass(&mut self) -> Result<PassStats> {
        let mut stats = PassStats::new(Utc::now());
        let start_time = Instant::now();

        let stories = self.discover_index().await?;
        stats.discovered = stories.len();

        let mut stories = self.dedupe(stories);
        stats.new_stories = stories.len();
        tracing::info!("Found {} new stories", stories.len());

        if !stories.is_empty() {
            self.fetch_story_pages(&mut stories).await?;
            self.persist_story_pages(&stories, &mut stats).await?;
            self.fetch_discussion_pages(&mut stories).await?;
            self.extract_sub_links(&mut stories, &mut stats)?;
            let batches = self.fetch_sub_links(&stories).await;
            self.persist_sub_links(batches, &mut stats).await?;
        }

        stats.duration = start_time.elapsed();
        Ok(stats)
    }

    async fn discover_index(&self) -> Result<Vec<Story>> {
        let index_url = format!("{}/", self.config.site.trimmed_base_url());
        let html = self.transport.get(&index_url).await?;

        let stories = self.extractor.extract_stories(&html);
        tracing::debug!("Front page lists {} stories", stories.len());
        Ok(stories)
    }

    fn dedupe(&mut self, stories: Vec<Story>) -> Vec<Story> {
        let mask = self.seen.admit(stories.iter().map(Story::url));

        stories
            .into_iter()
            .zip(mask)
            .filter_map(|(story, is_new)| is_new.then_some(story))
            .collect()
    }

    async fn fetch_story_pages(&self, stories: &mut [Story]) -> Result<()> {
        let urls: Vec<&str> = stories.iter().map(Story::url).collect();
        let outcomes = fetch_batch(self.transport.as_ref(), &urls).await;

        for (story, outcome) in stories.iter_mut().zip(outcomes) {
            story.attach_body(outcome)?;
        }
        Ok(())
    }

    async fn persist_story_pages(&self, stories: &[Story], stats: &mut PassStats) -> Result<()> {
        let root = &self.config.storage.root;

        for story in stories {
            if let Some(error) = story.body().error() {
                tracing::warn!("Skipping story {}: {}", story.url(), error);
                stats.stories_failed += 1;
                continue;
            }

            let Some(bytes) = story.body().bytes() else {
                continue;
            };

            let Some(identifier) = story.identifier() else {
                tracing::warn!("Cannot derive identifier for {}, not saving", story.url());
                stats.stories_unstorable += 1;
                continue;
            };

            self.sink
                .write(bytes, &story_dir(root, &identifier), &identifier)
                .await?;
            stats.stories_saved += 1;
        }

        Ok(())
    }

    async fn fetch_discussion_pages(&self, stories: &mut [Story]) -> Result<()> {
        let urls: Vec<&str> = stories
            .iter()
            .map(|story| story.comment_thread().url())
            .collect();
        let outcomes = fetch_batch(self.transport.as_ref(), &urls).await;

        for (story, outcome) in stories.iter_mut().zip(outcomes) {
            story.comment_thread_mut().attach_body(outcome)?;
        }
        Ok(())
    }

    fn extract_sub_links(&self, stories: &mut [Story], stats: &mut PassStats) -> Result<()> {
        for story in stories.iter_mut() {
            let thread = story.comment_thread_mut();

            if let Some(error) = thread.body().error() {
                tracing::warn!("Skipping discussion {}: {}", thread.url(), error);
                stats.discussions_failed += 1;
                continue;
            }
            if !thread.body().is_fetched() {
                continue;
            }

            let links = self.extractor.extract_top_level_comment_links(thread.body());
            tracing::debug!("{} comment links on {}", links.len(), thread.url());
            stats.sub_links_found += links.len();
            thread.attach_sub_links(links)?;
        }
        Ok(())
    }

    /// One batch per story, stories strictly one after another
    async fn fetch_sub_links(&self, stories: &[Story]) -> Vec<SubLinkBatch> {
        let mut batches = Vec::new();

        for story in stories {
            let Some(links) = story.comment_thread().sub_links() else {
                continue;
            };
            if links.is_empty() {
                continue;
            }
            // Nothing fetched for this story could be written anywhere.
            let Some(identifier) = story.identifier() else {
                continue;
            };

            let outcomes = fetch_batch(self.transport.as_ref(), links).await;
            batches.push(SubLinkBatch {
                identifier,
                outcomes,
            });
        }

        batches
    }

    async fn persist_sub_links(
        &self,
        batches: Vec<SubLinkBatch>,
        stats: &mut PassStats,
    ) -> Result<()> {
        let root = &self.config.storage.root;

        for batch in batches {
            for (index, outcome) in batch.outcomes.iter().enumerate() {
                match outcome {
                    Ok(bytes) => {
                        let stem = index.to_string();
                        self.sink
                            .write(bytes, &sub_link_dir(root, &batch.identifier, index), &stem)
                            .await?;
                        stats.sub_links_saved += 1;
                    }
                    Err(error) => {
                        tracing::warn!("Skipping comment link {}: {}", error.url(), error);
                        stats.sub_links_failed += 1;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Runs a single pass with the production collaborators
///
/// # Example
///
/// ```no_run
/// use ycrawler::config::load_config;
/// use ycrawler::crawler::run_once;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("ycrawler.toml"))?;
/// let stats = run_once(config).await?;
/// stats.log_summary();
/// # Ok(())
/// # }
/// ```
pub async fn run_once(config: Config) -> Result<PassStats> {
    let mut coordinator = Coordinator::from_config(config)?;
    coordinator.run_pass().await
}

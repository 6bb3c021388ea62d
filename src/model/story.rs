use crate::crawler::FetchOutcome;
use crate::model::CommentThread;
use crate::state::PageBody;
use crate::url::story_identifier;
use crate::{CrawlError, Result};

/// One front-page entry
#[derive(Debug)]
pub struct Story {
    url: String,
    comment_thread: CommentThread,
    body: PageBody,
}

impl Story {
    /// Creates a story with its discussion thread; nothing is fetched yet
    pub fn new(url: impl Into<String>, discussion_url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            comment_thread: CommentThread::new(discussion_url),
            body: PageBody::NotFetched,
        }
    }

    /// Absolute URL of the story target
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Directory and file stem used when persisting this story
    ///
    /// `None` if the URL yields no identifier, in which case the story
    /// cannot be written to disk.
    pub fn identifier(&self) -> Option<String> {
        story_identifier(&self.url)
    }

    pub fn comment_thread(&self) -> &CommentThread {
        &self.comment_thread
    }

    pub fn comment_thread_mut(&mut self) -> &mut CommentThread {
        &mut self.comment_thread
    }

    pub fn body(&self) -> &PageBody {
        &self.body
    }

    /// Attaches the outcome of fetching the story page
    ///
    /// Fails with [`CrawlError::AlreadyAttached`] if an outcome is already present.
    pub fn attach_body(&mut self, outcome: FetchOutcome) -> Result<()> {
        if !self.body.is_pending() {
            return Err(CrawlError::AlreadyAttached {
                url: self.url.clone(),
            });
        }
        self.body = PageBody::from(outcome);
        Ok(())
    }
}

use crate::crawler::FetchOutcome;
use crate::state::PageBody;
use crate::{CrawlError, Result};

/// Discussion page of a story
#[derive(Debug)]
pub struct CommentThread {
    url: String,
    body: PageBody,
    sub_links: Option<Vec<String>>,
}

impl CommentThread {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: PageBody::NotFetched,
            sub_links: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> &PageBody {
        &self.body
    }

    /// Links found in top-level comments, in page order
    ///
    /// `None` until extraction has run for this thread.
    pub fn sub_links(&self) -> Option<&[String]> {
        self.sub_links.as_deref()
    }

    /// Attaches the outcome of fetching the discussion page
    pub fn attach_body(&mut self, outcome: FetchOutcome) -> Result<()> {
        if !self.body.is_pending() {
            return Err(CrawlError::AlreadyAttached {
                url: self.url.clone(),
            });
        }
        self.body = PageBody::from(outcome);
        Ok(())
    }

    /// Records the extracted sub-links; allowed once per thread
    pub fn attach_sub_links(&mut self, links: Vec<String>) -> Result<()> {
        if self.sub_links.is_some() {
            return Err(CrawlError::AlreadyAttached {
                url: self.url.clone(),
            });
        }
        self.sub_links = Some(links);
        Ok(())
    }
}

//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageBody`: fetch state of a single page (not fetched, fetched, failed)
//! - `SeenSet`: story URLs observed by earlier passes, used to pick out new stories

mod page_body;
mod seen_set;

pub use page_body::PageBody;
pub use seen_set::SeenSet;

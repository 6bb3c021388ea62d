//! Storage module for persisting fetched pages
//!
//! Pages are written as raw bytes into a per-story tree:
//!
//! ```text
//! {root}/{story}/{story}.html   story page
//! {root}/{story}/{n}/{n}.html   n-th link from the story's top-level comments
//! ```

mod fs;
mod traits;

pub use fs::FsSink;
pub use traits::{PageSink, StorageError, StorageResult};

use std::path::{Path, PathBuf};

/// Directory holding a story page and its sub-link directories
pub fn story_dir(root: &Path, identifier: &str) -> PathBuf {
    root.join(identifier)
}

/// Directory holding the `index`-th sub-link of a story
pub fn sub_link_dir(root: &Path, identifier: &str, index: usize) -> PathBuf {
    story_dir(root, identifier).join(index.to_string())
}

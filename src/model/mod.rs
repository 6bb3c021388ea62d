//! Entity model for one crawl pass
//!
//! A [`Story`] is one front-page entry and exclusively owns the
//! [`CommentThread`] holding its discussion. Both are built with their
//! identity fields only; fetched bodies and extracted links are attached
//! afterwards, each at most once.

mod story;
mod thread;

pub use story::Story;
pub use thread::CommentThread;

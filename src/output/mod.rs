//! Output module for crawl pass summaries
//!
//! Every pass produces a [`PassStats`] record. The scheduler logs it and the
//! one-shot CLI mode prints it.

pub mod stats;

pub use stats::{print_statistics, PassStats};

//! URL handling module for ycrawler
//!
//! Story links on the front page may be relative; this module decides when a
//! link is absolute, joins relative links onto the site base URL, and derives
//! the on-disk identifier of a story from its URL.

mod domain;
mod identifier;

pub use domain::extract_domain;
pub use identifier::story_identifier;

/// Returns true if `href` already carries an http or https scheme
///
/// # Examples
///
/// ```
/// use ycrawler::url::is_absolute;
///
/// assert!(is_absolute("https://example.com/a"));
/// assert!(is_absolute("HTTP://example.com"));
/// assert!(!is_absolute("item?id=1"));
/// assert!(!is_absolute("/from?site=example.com"));
/// ```
pub fn is_absolute(href: &str) -> bool {
    let lower = href.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves a front-page href against the site base URL
///
/// Absolute links pass through untouched. Anything else is prefixed with
/// `{base_url}/`, with exactly one slash between the two parts.
///
/// # Examples
///
/// ```
/// use ycrawler::url::resolve_against_base;
///
/// let base = "https://news.ycombinator.com";
/// assert_eq!(resolve_against_base(base, "item?id=7"), "https://news.ycombinator.com/item?id=7");
/// assert_eq!(resolve_against_base(base, "https://x.example/a"), "https://x.example/a");
/// ```
pub fn resolve_against_base(base_url: &str, href: &str) -> String {
    let href = href.trim();
    if is_absolute(href) {
        return href.to_string();
    }

    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

/// Builds the discussion page URL for a front-page item id
pub fn discussion_url(base_url: &str, item_id: &str) -> String {
    format!("{}/item?id={}", base_url.trim_end_matches('/'), item_id)
}

//! Page extraction for the aggregator's markup
//!
//! Two pages are parsed:
//! - the front page, turned into [`Story`] records in ranking order
//! - a discussion page, turned into the links posted in top-level comments
//!
//! Extraction never fails. Missing elements, malformed markup or a body that
//! was never fetched all produce an empty result.

use crate::model::Story;
use crate::state::PageBody;
use crate::url::{discussion_url, resolve_against_base};
use scraper::{ElementRef, Html, Selector};

/// Story rows on the front page
const STORY_ROW: &str = "tr.athing";
/// Headline anchor inside a story row
const HEADLINE_ANCHOR: &str = "span.titleline a";
/// One comment row on a discussion page
const COMMENT_ROW: &str = "tr.comtr";
/// Indentation cell of a comment row
const INDENT_CELL: &str = "td.ind";
/// Spacer image sizing the indentation in older markup
const SPACER_IMAGE: &str = "img[width]";
/// Links inside the comment text
const COMMENT_LINK: &str = ".commtext a[href]";

/// Turns raw page bytes into stories and comment links
pub trait PageExtractor: Send + Sync {
    /// Stories listed on the front page, in page order
    fn extract_stories(&self, html: &[u8]) -> Vec<Story>;

    /// Hrefs of anchors inside top-level comments, in document order
    ///
    /// Only a fetched body is parsed; any other state yields no links.
    fn extract_top_level_comment_links(&self, body: &PageBody) -> Vec<String>;
}

/// [`PageExtractor`] for Hacker News style markup
#[derive(Debug, Clone)]
pub struct HnExtractor {
    base_url: String,
}

impl HnExtractor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl PageExtractor for HnExtractor {
    fn extract_stories(&self, html: &[u8]) -> Vec<Story> {
        parse_front_page(&String::from_utf8_lossy(html), &self.base_url)
    }

    fn extract_top_level_comment_links(&self, body: &PageBody) -> Vec<String> {
        match body.bytes() {
            Some(bytes) => parse_comment_page(&String::from_utf8_lossy(bytes)),
            None => Vec::new(),
        }
    }
}

/// Parses the front page into stories
///
/// # Extraction Rules
///
/// For each `tr.athing` row, in page order:
/// - the row `id` is the item id; the discussion URL is `{base}/item?id={id}`
/// - the first anchor in `span.titleline` is the story link; relative links
///   are prefixed with `{base}/`
///
/// Rows missing either piece are skipped.
///
/// # Example
///
/// ```
/// use ycrawler::crawler::parse_front_page;
///
/// let html = r#"<table><tr class="athing" id="123">
///     <td><span class="titleline"><a href="https://x.example/a">A</a></span></td>
/// </tr></table>"#;
/// let stories = parse_front_page(html, "https://news.ycombinator.com");
/// assert_eq!(stories.len(), 1);
/// assert_eq!(stories[0].url(), "https://x.example/a");
/// assert_eq!(stories[0].comment_thread().url(), "https://news.ycombinator.com/item?id=123");
/// ```
pub fn parse_front_page(html: &str, base_url: &str) -> Vec<Story> {
    let (Ok(row_selector), Ok(anchor_selector)) =
        (Selector::parse(STORY_ROW), Selector::parse(HEADLINE_ANCHOR))
    else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut stories = Vec::new();

    for row in document.select(&row_selector) {
        let Some(item_id) = row.value().id().filter(|id| !id.is_empty()) else {
            tracing::debug!("Skipping story row without id");
            continue;
        };

        let Some(href) = row
            .select(&anchor_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
        else {
            tracing::debug!("Skipping story row {} without headline link", item_id);
            continue;
        };

        stories.push(Story::new(
            resolve_against_base(base_url, href),
            discussion_url(base_url, item_id),
        ));
    }

    stories
}

/// Collects links from top-level comments of a discussion page
///
/// A comment row is top-level when its indentation cell says depth zero.
/// Links inside replies are left out. Hrefs are returned as written on the
/// page: no deduplication, no resolution.
///
/// # Example
///
/// ```
/// use ycrawler::crawler::parse_comment_page;
///
/// let html = r#"<table>
///   <tr class="athing comtr"><td class="ind" indent="0"></td>
///     <td><span class="commtext c00"><a href="https://a.example/">a</a></span></td></tr>
///   <tr class="athing comtr"><td class="ind" indent="1"></td>
///     <td><span class="commtext c00"><a href="https://b.example/">b</a></span></td></tr>
/// </table>"#;
/// assert_eq!(parse_comment_page(html), vec!["https://a.example/".to_string()]);
/// ```
pub fn parse_comment_page(html: &str) -> Vec<String> {
    let (Ok(row_selector), Ok(indent_selector), Ok(spacer_selector), Ok(link_selector)) = (
        Selector::parse(COMMENT_ROW),
        Selector::parse(INDENT_CELL),
        Selector::parse(SPACER_IMAGE),
        Selector::parse(COMMENT_LINK),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for row in document.select(&row_selector) {
        if !is_top_level(&row, &indent_selector, &spacer_selector) {
            continue;
        }

        links.extend(
            row.select(&link_selector)
                .filter_map(|anchor| anchor.value().attr("href"))
                .map(str::to_string),
        );
    }

    links
}

/// Depth zero is marked by `indent="0"` on the indentation cell. Older markup
/// sizes a spacer image instead, `width="0"` meaning no indentation.
fn is_top_level(
    row: &ElementRef<'_>,
    indent_selector: &Selector,
    spacer_selector: &Selector,
) -> bool {
    let Some(cell) = row.select(indent_selector).next() else {
        return false;
    };

    if let Some(indent) = cell.value().attr("indent") {
        return indent.trim() == "0";
    }

    cell.select(spacer_selector)
        .next()
        .and_then(|img| img.value().attr("width"))
        .is_some_and(|width| width.trim() == "0")
}

use crate::url::extract_domain;
use sha2::{Digest, Sha256};
use url::Url;

/// Longest identifier we emit; leaves room for the `.html` suffix within
/// common filename limits.
const MAX_IDENTIFIER_LEN: usize = 200;

/// Bytes of the URL digest kept in the identifier suffix (hex doubles this)
const DIGEST_BYTES: usize = 6;

/// Derives the on-disk identifier of a story from its URL
///
/// The identifier is built from the host, the non-empty path segments and the
/// query string, each reduced to `[A-Za-z0-9._-]` and joined with `_`. The
/// slug is lossy, so it is followed by `-` and a short SHA-256 digest of the
/// full URL; distinct URLs get distinct identifiers. It is deterministic and
/// never empty. `None` means the URL cannot be persisted: it does not parse
/// or has no host.
///
/// # Examples
///
/// ```
/// use ycrawler::url::story_identifier;
///
/// let id = story_identifier("https://news.ycombinator.com/item?id=123").unwrap();
/// assert!(id.starts_with("news.ycombinator.com_item_id-123-"));
/// assert_ne!(story_identifier("https://x.example/a"), story_identifier("https://x.example/a/"));
/// assert_eq!(story_identifier("item?id=1"), None);
/// ```
pub fn story_identifier(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let mut parts = vec![sanitize(&extract_domain(&parsed)?)];

    if let Some(segments) = parsed.path_segments() {
        parts.extend(segments.filter(|s| !s.is_empty()).map(sanitize));
    }

    if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
        parts.push(sanitize(query));
    }

    let mut slug = parts.join("_");
    if slug.is_empty() {
        return None;
    }

    let digest = url_digest(url);
    slug.truncate(MAX_IDENTIFIER_LEN - digest.len() - 1);
    Some(format!("{}-{}", slug, digest))
}

fn url_digest(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    hex::encode(&digest[..DIGEST_BYTES])
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

use url::Url;

/// Extracts the lowercase host of a URL, keeping a non-default port
///
/// Two servers on one host but different ports must not share a story
/// directory, so the port is part of the result when present.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use ycrawler::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("127.0.0.1-8080".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    if host.is_empty() {
        return None;
    }

    Some(match url.port() {
        Some(port) => format!("{}-{}", host, port),
        None => host,
    })
}

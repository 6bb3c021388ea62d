use std::collections::HashSet;

/// Story URLs observed by earlier passes
///
/// Lives in memory only and grows monotonically: URLs that drop off the front
/// page stay in the set, so a story is fetched at most once per process.
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    urls: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Marks which of `urls` are new, then records all of them as seen
    ///
    /// New means "not in the set before this call" (plain set difference).
    /// A URL repeated within `urls` is new only at its first position. The
    /// returned mask is aligned with the input.
    pub fn admit<'a, I>(&mut self, urls: I) -> Vec<bool>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut in_batch = HashSet::new();
        let mut mask = Vec::new();

        for url in urls {
            mask.push(!self.urls.contains(url) && in_batch.insert(url));
        }

        self.urls.extend(in_batch.into_iter().map(str::to_string));
        mask
    }
}

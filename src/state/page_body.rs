use crate::crawler::FetchOutcome;
use crate::TransportError;
use bytes::Bytes;
use std::fmt;

/// Fetch state of a page body
///
/// A body starts as `NotFetched` and moves to exactly one of the other two
/// states once the fetch resolves. "Not fetched yet" and "fetched, but empty"
/// are distinct: an empty response is `Fetched` with zero bytes.
#[derive(Debug, Default)]
pub enum PageBody {
    /// No fetch has resolved for this page yet
    #[default]
    NotFetched,

    /// Raw response bytes
    Fetched(Bytes),

    /// The fetch failed; the cause is kept for reporting
    Failed(TransportError),
}

impl PageBody {
    /// Returns true while no fetch outcome is attached
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::NotFetched)
    }

    /// Returns true if the body holds response bytes
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    /// Returns true if the fetch failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The raw bytes, only when the fetch succeeded
    pub fn bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Fetched(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The captured failure, only when the fetch failed
    pub fn error(&self) -> Option<&TransportError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFetched => "not_fetched",
            Self::Fetched(_) => "fetched",
            Self::Failed(_) => "failed",
        }
    }
}

impl From<FetchOutcome> for PageBody {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            Ok(bytes) => Self::Fetched(bytes),
            Err(error) => Self::Failed(error),
        }
    }
}

impl fmt::Display for PageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

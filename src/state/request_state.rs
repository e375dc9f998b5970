/// Request state definitions for tracking one pass through the pipeline
///
/// Every `get` or `view` request walks this machine from `Resolving` to one of
/// the terminal states.
use std::fmt;

/// Represents the current state of a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestState {
    // ===== Active States =====
    /// Alias is being resolved to a canonical site
    Resolving,

    /// Result store is being queried for the full URL
    CacheCheck,

    /// Page is being fetched over the network
    Fetching,

    /// Fetched body is being tokenized and counted
    Parsing,

    /// Formatted counts are being written to the result store
    Storing,

    // ===== Terminal States =====
    /// A stored record answered the request
    HitReturn,

    /// A fresh result was fetched, counted and stored
    FreshReturn,

    /// The fetch failed; nothing was stored
    FetchError,

    /// A view request found no stored record
    NotFound,
}

impl RequestState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::HitReturn | Self::FreshReturn | Self::FetchError | Self::NotFound
        )
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::HitReturn | Self::FreshReturn)
    }

    /// Returns true if moving from `self` to `next` is a legal step
    pub fn can_transition_to(&self, next: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (self, next),
            (Resolving, CacheCheck)
                | (CacheCheck, HitReturn)
                | (CacheCheck, Fetching)
                | (CacheCheck, NotFound)
                | (Fetching, FetchError)
                | (Fetching, Parsing)
                | (Parsing, Storing)
                | (Storing, FreshReturn)
        )
    }

    /// Short lowercase name used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resolving => "resolving",
            Self::CacheCheck => "cache_check",
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Storing => "storing",
            Self::HitReturn => "hit_return",
            Self::FreshReturn => "fresh_return",
            Self::FetchError => "fetch_error",
            Self::NotFound => "not_found",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

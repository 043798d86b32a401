use std::fmt;

/// Errors coming back from a [`Provider`](crate::Provider).
///
/// Messages are opaque to the caller: the UI shows them, nothing interprets
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The backend could not be reached or did not answer usably.
    Unavailable(String),
    /// The backend refused the request (seat taken at submission time,
    /// malformed payload, unknown flight).
    Rejected(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Unavailable(msg) => write!(f, "Backend unavailable: {}", msg),
            ProviderError::Rejected(msg) => write!(f, "Booking rejected: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

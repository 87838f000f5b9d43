//! Fetch error type.

/// Error returned by a single image fetch (transport failure, HTTP error, or storage failure).
/// Recoverable per URL: the caller skips that URL's substitution and carries on.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, TLS, reset, timeout).
    #[error("transport error: {0}")]
    Curl(#[from] curl::Error),
    /// Final response after redirects had a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    /// Writing the image to disk failed (e.g. disk full, permission denied).
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// Another URL in the same batch derives the same local name; fetching both
    /// would race on one file.
    #[error("local name {name} already taken by {href}")]
    NameCollision { name: String, href: String },
    /// The blocking fetch task panicked or was cancelled.
    #[error("fetch task aborted: {0}")]
    Aborted(String),
}

impl FetchError {
    /// HTTP status for `Http` failures.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

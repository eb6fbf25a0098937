//! Fetch error type.

use thiserror::Error;

/// Failure of a stylesheet or font download.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL (or a redirect target) could not be parsed.
    #[error("invalid URL {url:?}")]
    InvalidUrl { url: String },
    /// Curl reported an error (timeout, connection, TLS, DNS, ...).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Final response was neither 200 nor a redirect.
    #[error("GET {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u32 },
    /// Redirect chain longer than the configured limit.
    #[error("GET {url}: more than {limit} redirects")]
    TooManyRedirects { url: String, limit: u32 },
    /// Redirect status without a `Location` header.
    #[error("GET {url} returned HTTP {status} without Location")]
    MissingLocation { url: String, status: u32 },
    /// Stylesheet body is not UTF-8.
    #[error("GET {url}: body is not valid UTF-8")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl FetchError {
    /// HTTP status of the failing response, if the server answered.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::HttpStatus { status, .. } | FetchError::MissingLocation { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// True for network-level failures (no usable HTTP response).
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

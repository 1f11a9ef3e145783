//! Error types for the API client.

/// Maximum number of characters of a response body kept as an error detail.
pub const MAX_DETAIL_CHARS: usize = 500;

/// Errors that can occur when building queries or making API requests.
///
/// The variants form two families. [`Error::Parse`] is a kind of request
/// error and [`Error::RateLimited`] is a kind of API error; use
/// [`Error::is_request_error`] and [`Error::is_api_error`] to match a whole
/// family at once.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Client-side misuse or inability to proceed (bad `limit_total`,
    /// unexpected response shape, network failure).
    #[error("{0}")]
    Request(String),
    /// A success response whose body could not be decoded.
    #[error("{0}")]
    Parse(String),
    /// The service reported a failure.
    #[error("{}", with_details(.message, .details))]
    Api { message: String, details: Vec<String> },
    /// The service answered HTTP 429.
    #[error("{}", with_details(.message, .details))]
    RateLimited { message: String, details: Vec<String> },
    /// A query field violated its contract.
    #[error("{0}")]
    Validation(String),
}

impl Error {
    /// True for [`Error::Request`] and [`Error::Parse`].
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Parse(_))
    }

    /// True for [`Error::Api`] and [`Error::RateLimited`].
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::RateLimited { .. })
    }

    /// Response body excerpts attached to API errors. Empty for other kinds.
    pub fn details(&self) -> &[String] {
        match self {
            Self::Api { details, .. } | Self::RateLimited { details, .. } => details,
            _ => &[],
        }
    }
}

fn with_details(message: &str, details: &[String]) -> String {
    if details.is_empty() {
        message.to_string()
    } else {
        format!("{} (details: {})", message, details.join("; "))
    }
}

/// Trims `body` and keeps at most [`MAX_DETAIL_CHARS`] characters of it.
/// Returns an empty list for a blank body.
pub(crate) fn body_details(body: &str) -> Vec<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.chars().take(MAX_DETAIL_CHARS).collect()]
    }
}

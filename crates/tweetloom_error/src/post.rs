//! Posting API error types.

/// Error kinds for posting API operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PostErrorKind {
    /// Credentials are not configured
    #[display("Missing credentials: {}", _0)]
    MissingCredentials(String),

    /// Transport-level failure
    #[display("HTTP request failed: {}", _0)]
    Http(String),

    /// Non-success response from the API
    #[display("API error ({}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or API error detail
        message: String,
    },

    /// API rejected the request because of its rate limit
    #[display("Rate limited: retry after {}s", _0)]
    RateLimited(u64),

    /// Token rejected
    #[display("Unauthorized: {}", _0)]
    Unauthorized(String),

    /// Response body did not match the expected shape
    #[display("Invalid API response: {}", _0)]
    InvalidResponse(String),
}

impl PostErrorKind {
    /// Whether a later attempt may succeed without operator action.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::MissingCredentials(_) | Self::Unauthorized(_) | Self::InvalidResponse(_) => {
                false
            }
        }
    }
}

/// Posting error with location tracking.
///
/// A failed post is contained within the firing that caused it: it is logged,
/// no history record is written, and the scheduler keeps running.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Post Error: {} at line {} in {}", kind, line, file)]
pub struct PostError {
    /// The error kind
    pub kind: PostErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl PostError {
    /// Create a new PostError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PostErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Check if error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.kind.is_recoverable()
    }
}

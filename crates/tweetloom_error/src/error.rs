//! Top-level error wrapper types.

use crate::{ConfigError, DataLoadError, ExportError, HistoryError, PostError, ValidationError};

/// Every failure class the bot can surface to an operator.
///
/// # Examples
///
/// ```
/// use tweetloom_error::{ConfigError, TweetloomError};
///
/// let err: TweetloomError = ConfigError::new("no positive category weight").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TweetloomErrorKind {
    /// Content data pool could not be loaded
    #[from(DataLoadError)]
    DataLoad(DataLoadError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Posting API error
    #[from(PostError)]
    Post(PostError),
    /// History log error
    #[from(HistoryError)]
    History(HistoryError),
    /// History export error
    #[from(ExportError)]
    Export(ExportError),
    /// Post text failed validation
    #[from(ValidationError)]
    Validation(ValidationError),
}

/// Tweetloom error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tweetloom Error: {}", _0)]
pub struct TweetloomError(Box<TweetloomErrorKind>);

impl TweetloomError {
    /// Create a new error from a kind.
    pub fn new(kind: TweetloomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TweetloomErrorKind {
        &self.0
    }
}

impl<T> From<T> for TweetloomError
where
    T: Into<TweetloomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for tweetloom operations.
pub type TweetloomResult<T> = std::result::Result<T, TweetloomError>;

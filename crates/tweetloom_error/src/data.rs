//! Content data pool error types.

/// Kinds of data pool loading errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DataLoadErrorKind {
    /// Pool file could not be read
    #[display("Failed to read data pool {}: {}", path, message)]
    FileRead {
        /// Path of the pool file
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// Pool file is not valid JSON for its category
    #[display("Failed to parse data pool {}: {}", path, message)]
    Parse {
        /// Path of the pool file
        path: String,
        /// Underlying parser message
        message: String,
    },
    /// A list the generator draws from is empty
    #[display("Data pool '{}' has no entries in '{}'", pool, field)]
    EmptyPool {
        /// Pool name (e.g. "crypto_topics")
        pool: String,
        /// Field that is empty (e.g. "templates")
        field: String,
    },
}

/// Data pool error with location tracking.
///
/// A generator cannot run without its pool, so this is a construction-time
/// failure only. Generation itself never fails.
///
/// # Examples
///
/// ```
/// use tweetloom_error::{DataLoadError, DataLoadErrorKind};
///
/// let err = DataLoadError::new(DataLoadErrorKind::EmptyPool {
///     pool: "crypto_topics".to_string(),
///     field: "topics".to_string(),
/// });
/// assert!(format!("{}", err).contains("no entries in 'topics'"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Data Load Error: {} at line {} in {}", kind, line, file)]
pub struct DataLoadError {
    /// The kind of error that occurred
    pub kind: DataLoadErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DataLoadError {
    /// Create a new data load error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DataLoadErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

//! History export error types.

/// Kinds of export errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExportErrorKind {
    /// Requested format is not json or csv
    #[display("Unsupported export format: {}", _0)]
    UnsupportedFormat(String),
    /// Destination could not be written
    #[display("Failed to write export {}: {}", path, message)]
    Write {
        /// Destination path
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// Records could not be encoded
    #[display("Failed to encode export: {}", _0)]
    Serialize(String),
}

/// Export error with location tracking.
///
/// # Examples
///
/// ```
/// use tweetloom_error::{ExportError, ExportErrorKind};
///
/// let err = ExportError::new(ExportErrorKind::UnsupportedFormat("xml".to_string()));
/// assert!(format!("{}", err).contains("Unsupported export format: xml"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: {} at line {} in {}", kind, line, file)]
pub struct ExportError {
    /// The kind of error that occurred
    pub kind: ExportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExportError {
    /// Create a new export error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

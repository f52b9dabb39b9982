//! History log error types.

/// Kinds of history log errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum HistoryErrorKind {
    /// Failed to read the log file
    #[display("Failed to read history: {}", _0)]
    Read(String),
    /// Failed to write the log file
    #[display("Failed to write history: {}", _0)]
    Write(String),
    /// Failed to encode records
    #[display("Failed to serialize history: {}", _0)]
    Serialize(String),
}

/// History error with location tracking.
///
/// Read paths never surface this error (they degrade to an empty history);
/// write paths return it so callers can log and carry on.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("History Error: {} at line {} in {}", kind, line, file)]
pub struct HistoryError {
    /// The kind of error that occurred
    pub kind: HistoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl HistoryError {
    /// Create a new history error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: HistoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

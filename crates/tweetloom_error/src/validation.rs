//! Content validation error types.

/// Post text rejected by content validation.
///
/// Carries every problem found, so the operator can fix them in one go.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", problems.join("; "), line, file)]
pub struct ValidationError {
    /// Problems that make the text unpostable
    pub problems: Vec<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetloom_error::ValidationError;
    ///
    /// let err = ValidationError::new(vec!["Contains blocked word 'scam'".to_string()]);
    /// assert!(err.to_string().contains("blocked word"));
    /// ```
    #[track_caller]
    pub fn new(problems: Vec<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            problems,
            line: location.line(),
            file: location.file(),
        }
    }
}

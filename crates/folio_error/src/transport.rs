//! Transport error types.

/// Failure reported by an upload or entity collaborator.
///
/// The collaborator's message is kept verbatim so it can be surfaced to the user
/// unchanged.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", message, line, file)]
pub struct TransportError {
    /// The collaborator's error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_error::TransportError;
    ///
    /// let err = TransportError::new("413 Payload Too Large");
    /// assert!(err.message.contains("413"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

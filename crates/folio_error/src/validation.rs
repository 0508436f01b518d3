//! File validation error types.

/// Reasons a selected file is rejected before any handle or network call.
///
/// The display text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// MIME type is outside the accepted classes
    #[display("Please select {}", expected)]
    UnsupportedType {
        /// Human description of what was expected, e.g. "an image or video file"
        expected: String,
    },
    /// File exceeds the size ceiling for its class
    #[display("File must be less than {}MB", limit_mb)]
    TooLarge {
        /// Ceiling in megabytes
        limit_mb: u64,
    },
    /// Text posts carry no primary file
    #[display("Text posts do not take a file")]
    NoFileForText,
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::TooLarge { limit_mb: 50 });
/// assert_eq!(err.kind.to_string(), "File must be less than 50MB");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

//! Submit-time completeness errors.

/// Required content missing when a submission is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum IncompleteErrorKind {
    /// No freshly selected file and no existing remote content
    #[display("Please select a file")]
    MissingFile,
    /// Text post body is empty after trimming
    #[display("Please enter some text")]
    EmptyText,
    /// Project title is empty after trimming
    #[display("Project title is required")]
    MissingTitle,
}

/// Incomplete draft error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Incomplete Error: {} at line {} in {}", kind, line, file)]
pub struct IncompleteError {
    /// The kind of error that occurred
    pub kind: IncompleteErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl IncompleteError {
    /// Create a new incomplete error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: IncompleteErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

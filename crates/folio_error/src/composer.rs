//! Composer state machine errors.

/// Inputs the composer refuses in its current state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ComposerErrorKind {
    /// A submission is in flight
    #[display("Please wait for the current upload to finish")]
    Submitting,
    /// The modal is not open
    #[display("Composer is not open")]
    NotOpen,
    /// Attachment kind cannot be offered for this content
    #[display("A {} attachment is not available for this post", _0)]
    AttachmentUnavailable(String),
    /// An attachment is already present
    #[display("Remove the current attachment first")]
    AttachmentSlotOccupied,
    /// Delete tapped before the affordance was fully revealed
    #[display("Delete button is not revealed")]
    DeleteNotRevealed,
    /// Playback requested without a local audio preview
    #[display("Nothing to play")]
    NoPlayablePreview,
    /// Operation does not apply to the selected content kind
    #[display("Not available for {} posts", _0)]
    WrongKind(String),
}

/// Composer error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{ComposerError, ComposerErrorKind};
///
/// let err = ComposerError::new(ComposerErrorKind::AttachmentSlotOccupied);
/// assert!(err.to_string().contains("Remove the current attachment"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Composer Error: {} at line {} in {}", kind, line, file)]
pub struct ComposerError {
    /// The kind of error that occurred
    pub kind: ComposerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ComposerError {
    /// Create a new composer error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ComposerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

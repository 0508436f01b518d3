//! Top-level error wrapper types.

use crate::{ComposerError, ConfigError, IncompleteError, TransportError, ValidationError};

/// This is the foundation error enum.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioError, TransportError};
///
/// let transport = TransportError::new("Connection failed");
/// let err: FolioError = transport.into();
/// assert!(format!("{}", err).contains("Transport Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FolioErrorKind {
    /// Selected file rejected by type or size
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Required content missing at submit time
    #[from(IncompleteError)]
    Incomplete(IncompleteError),
    /// Upload or entity call failed
    #[from(TransportError)]
    Transport(TransportError),
    /// Input refused by the composer state machine
    #[from(ComposerError)]
    Composer(ComposerError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Folio error with kind discrimination.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioResult, IncompleteError, IncompleteErrorKind};
///
/// fn submit() -> FolioResult<()> {
///     Err(IncompleteError::new(IncompleteErrorKind::EmptyText))?
/// }
///
/// let err = submit().unwrap_err();
/// assert_eq!(err.user_message(), "Please enter some text");
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Folio Error: {}", _0)]
pub struct FolioError(Box<FolioErrorKind>);

impl FolioError {
    /// Create a new error from a kind.
    pub fn new(kind: FolioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FolioErrorKind {
        &self.0
    }

    /// Message suitable for showing to the user.
    ///
    /// Validation, completeness and composer errors render their kind; transport
    /// errors pass the collaborator's message through verbatim.
    pub fn user_message(&self) -> String {
        match self.kind() {
            FolioErrorKind::Validation(e) => e.kind.to_string(),
            FolioErrorKind::Incomplete(e) => e.kind.to_string(),
            FolioErrorKind::Transport(e) => e.message.clone(),
            FolioErrorKind::Composer(e) => e.kind.to_string(),
            FolioErrorKind::Config(e) => e.message.clone(),
        }
    }

    /// True for failures of the upload or entity collaborators.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind(), FolioErrorKind::Transport(_))
    }
}

// Generic From implementation for any type that converts to FolioErrorKind
impl<T> From<T> for FolioError
where
    T: Into<FolioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Folio operations.
pub type FolioResult<T> = std::result::Result<T, FolioError>;

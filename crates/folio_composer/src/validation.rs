//! Per-kind acceptance rules for selected files.
//!
//! | kind    | accepted         | ceiling                |
//! |---------|------------------|------------------------|
//! | Media   | image/*, video/* | 10 MB image / 500 MB video |
//! | Audio   | audio/*          | 50 MB                  |
//! | Pdf     | application/pdf  | 50 MB                  |
//!
//! Validation is synchronous and runs before any preview handle is acquired or any
//! network call is issued.

use crate::LimitsConfig;
use folio_core::{AttachmentKind, LocalFile, MimeClass, ResolvedKind, SelectedKind};
use folio_error::{FolioResult, ValidationError, ValidationErrorKind};
use tracing::{debug, instrument};

/// Checks selected files against the configured limits.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// The limits in force.
    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Validate a primary file for the selected kind.
    ///
    /// On success returns the concrete kind the file resolves to, so a `Media`
    /// selection becomes `Photo` or `Video`.
    ///
    /// # Errors
    ///
    /// Returns a validation error whose kind is the user-facing message when the
    /// MIME class is not accepted, the file is over its ceiling, or the selected
    /// kind is `Text`.
    #[instrument(skip(self, file), fields(name = %file.name(), mime = %file.mime_type(), size = *file.size_bytes()))]
    pub fn validate(&self, kind: SelectedKind, file: &LocalFile) -> FolioResult<ResolvedKind> {
        let class = file.mime_class();
        let (resolved, limit_mb) = match (kind, class) {
            (SelectedKind::Media, MimeClass::Image) => (ResolvedKind::Photo, self.limits.image_max_mb),
            (SelectedKind::Media, MimeClass::Video) => (ResolvedKind::Video, self.limits.video_max_mb),
            (SelectedKind::Media, _) => return Err(unsupported("an image or video file")),
            (SelectedKind::Audio, MimeClass::Audio) => (ResolvedKind::Audio, self.limits.audio_max_mb),
            (SelectedKind::Audio, _) => return Err(unsupported("an audio file")),
            (SelectedKind::Pdf, MimeClass::Pdf) => (ResolvedKind::Pdf, self.limits.pdf_max_mb),
            (SelectedKind::Pdf, _) => return Err(unsupported("a PDF file")),
            (SelectedKind::Text, _) => {
                return Err(ValidationError::new(ValidationErrorKind::NoFileForText).into());
            }
        };

        check_size(file, limit_mb)?;
        debug!(%resolved, "File accepted");
        Ok(resolved)
    }

    /// Validate a file offered as an attachment.
    #[instrument(skip(self, file), fields(name = %file.name(), mime = %file.mime_type(), size = *file.size_bytes()))]
    pub fn validate_attachment(&self, kind: AttachmentKind, file: &LocalFile) -> FolioResult<()> {
        match (kind, file.mime_class()) {
            (AttachmentKind::Audio, MimeClass::Audio) => check_size(file, self.limits.audio_max_mb),
            (AttachmentKind::Audio, _) => Err(unsupported("an audio file")),
            (AttachmentKind::Pdf, MimeClass::Pdf) => check_size(file, self.limits.pdf_max_mb),
            (AttachmentKind::Pdf, _) => Err(unsupported("a PDF file")),
        }
    }

    /// Validate a project cover image.
    pub fn validate_cover(&self, file: &LocalFile) -> FolioResult<()> {
        match file.mime_class() {
            MimeClass::Image => check_size(file, self.limits.cover_max_mb),
            _ => Err(unsupported("an image file")),
        }
    }
}

fn check_size(file: &LocalFile, limit_mb: u64) -> FolioResult<()> {
    if *file.size_bytes() > LimitsConfig::bytes(limit_mb) {
        debug!(limit_mb, "File over size ceiling");
        return Err(ValidationError::new(ValidationErrorKind::TooLarge { limit_mb }).into());
    }
    Ok(())
}

#[track_caller]
fn unsupported(expected: &str) -> folio_error::FolioError {
    ValidationError::new(ValidationErrorKind::UnsupportedType {
        expected: expected.to_string(),
    })
    .into()
}

//! Locally selected files.

use crate::MimeClass;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A file picked by the user and not yet uploaded.
///
/// Only the metadata needed for validation and upload bookkeeping is carried; the
/// bytes stay with the hosting platform and are read by the upload collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct LocalFile {
    /// Original filename
    name: String,
    /// Declared MIME type (e.g., "image/jpeg")
    mime_type: String,
    /// Size in bytes
    size_bytes: u64,
}

impl LocalFile {
    /// Describe a selected file.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    /// Broad MIME class used by validation.
    pub fn mime_class(&self) -> MimeClass {
        MimeClass::from_mime(&self.mime_type)
    }
}

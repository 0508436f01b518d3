//! Content, attachment and upload kinds.

use serde::{Deserialize, Serialize};

/// Kind of primary content the user chose to compose.
///
/// `Media` is an umbrella that resolves to [`ResolvedKind::Photo`] or
/// [`ResolvedKind::Video`] once a file has been validated.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SelectedKind {
    /// Photo or video
    #[default]
    #[display("media")]
    Media,
    /// Audio track
    #[display("audio")]
    Audio,
    /// PDF document
    #[display("pdf")]
    Pdf,
    /// Text note
    #[display("text")]
    Text,
}

impl SelectedKind {
    /// Whether this kind carries a primary file.
    pub fn takes_file(&self) -> bool {
        !matches!(self, SelectedKind::Text)
    }

    /// The attachment kind of the same media class, if any.
    ///
    /// An audio post cannot carry an audio attachment, nor a PDF post a PDF one.
    pub fn same_class_attachment(&self) -> Option<AttachmentKind> {
        match self {
            SelectedKind::Audio => Some(AttachmentKind::Audio),
            SelectedKind::Pdf => Some(AttachmentKind::Pdf),
            SelectedKind::Media | SelectedKind::Text => None,
        }
    }
}

/// Concrete kind of a primary payload, derived after validation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedKind {
    /// Still image
    #[display("photo")]
    Photo,
    /// Video clip
    #[display("video")]
    Video,
    /// Audio track
    #[display("audio")]
    Audio,
    /// PDF document
    #[display("pdf")]
    Pdf,
    /// Text note
    #[display("text")]
    Text,
}

impl ResolvedKind {
    /// Wire string used for `contentType`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedKind::Photo => "photo",
            ResolvedKind::Video => "video",
            ResolvedKind::Audio => "audio",
            ResolvedKind::Pdf => "pdf",
            ResolvedKind::Text => "text",
        }
    }

    /// The user-facing kind this resolves from.
    pub fn selected(&self) -> SelectedKind {
        match self {
            ResolvedKind::Photo | ResolvedKind::Video => SelectedKind::Media,
            ResolvedKind::Audio => SelectedKind::Audio,
            ResolvedKind::Pdf => SelectedKind::Pdf,
            ResolvedKind::Text => SelectedKind::Text,
        }
    }

    /// Declared kind for the upload collaborator, `None` for text.
    pub fn upload_kind(&self) -> Option<UploadKind> {
        match self {
            ResolvedKind::Photo => Some(UploadKind::Photo),
            ResolvedKind::Video => Some(UploadKind::Video),
            ResolvedKind::Audio => Some(UploadKind::Audio),
            ResolvedKind::Pdf => Some(UploadKind::Pdf),
            ResolvedKind::Text => None,
        }
    }
}

impl std::str::FromStr for ResolvedKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(ResolvedKind::Photo),
            "video" => Ok(ResolvedKind::Video),
            "audio" => Ok(ResolvedKind::Audio),
            "pdf" => Ok(ResolvedKind::Pdf),
            "text" => Ok(ResolvedKind::Text),
            _ => Err(format!("Unknown content type: {}", s)),
        }
    }
}

/// Kind of secondary attachment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Audio track
    #[display("audio")]
    Audio,
    /// PDF document
    #[display("pdf")]
    Pdf,
}

impl AttachmentKind {
    /// Wire string used for `attachmentType`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Audio => "audio",
            AttachmentKind::Pdf => "pdf",
        }
    }

    /// Declared kind for the upload collaborator.
    pub fn upload_kind(&self) -> UploadKind {
        match self {
            AttachmentKind::Audio => UploadKind::Audio,
            AttachmentKind::Pdf => UploadKind::Pdf,
        }
    }
}

/// Kind declared to the upload collaborator alongside a file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum UploadKind {
    /// Still image
    #[display("photo")]
    Photo,
    /// Video clip
    #[display("video")]
    Video,
    /// Audio track
    #[display("audio")]
    Audio,
    /// PDF document
    #[display("pdf")]
    Pdf,
    /// Project cover image
    #[display("project-cover")]
    ProjectCover,
}

/// Broad MIME class of a local file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MimeClass {
    /// `image/*`
    #[display("image")]
    Image,
    /// `video/*`
    #[display("video")]
    Video,
    /// `audio/*`
    #[display("audio")]
    Audio,
    /// `application/pdf`
    #[display("pdf")]
    Pdf,
    /// Anything else
    #[display("other")]
    Other,
}

impl MimeClass {
    /// Classify a MIME type string.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            MimeClass::Image
        } else if mime.starts_with("video/") {
            MimeClass::Video
        } else if mime.starts_with("audio/") {
            MimeClass::Audio
        } else if mime == "application/pdf" {
            MimeClass::Pdf
        } else {
            MimeClass::Other
        }
    }
}

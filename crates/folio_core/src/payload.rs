//! Wire payloads and collaborator results.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::UploadKind;

/// Identifier of a persisted item or project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct EntityId(pub String);

/// Which terminal action the user invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum SubmitMode {
    /// Persist as a published item
    #[display("publish")]
    Publish,
    /// Persist with `isDraft = true`
    #[display("save_draft")]
    SaveDraft,
}

impl SubmitMode {
    /// Value of the persisted `isDraft` flag.
    pub fn is_draft(&self) -> bool {
        matches!(self, SubmitMode::SaveDraft)
    }
}

/// Reference to an uploaded file returned by the upload collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct RemoteRef {
    /// Remote URL of the stored file
    url: String,
    /// Kind declared at upload time
    kind: UploadKind,
}

impl RemoteRef {
    /// Create a reference.
    pub fn new(url: impl Into<String>, kind: UploadKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}

/// Body of a create-item or update-item call.
///
/// Always the full item state; `None` fields serialize as `null`.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    /// `photo`, `video`, `audio`, `pdf` or `text`
    pub content_type: String,
    /// Remote URL of the primary file, `None` for text posts
    #[builder(default)]
    pub content_url: Option<String>,
    /// Trimmed body of a text post
    #[builder(default)]
    pub text_content: Option<String>,
    /// Optional title
    #[builder(default)]
    pub title: Option<String>,
    /// Caption
    #[builder(default)]
    pub description: Option<String>,
    /// Display aspect ratio, e.g. "1:1"
    pub aspect_ratio: String,
    /// Draft flag decided by [`SubmitMode`]
    pub is_draft: bool,
    /// Remote URL of the attachment
    #[builder(default)]
    pub attachment_url: Option<String>,
    /// `audio` or `pdf`
    #[builder(default)]
    pub attachment_type: Option<String>,
}

/// Body of a create-project or update-project call.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    /// Trimmed project title
    pub title: String,
    /// Optional description
    #[builder(default)]
    pub description: Option<String>,
    /// Remote URL of the cover image
    #[builder(default)]
    pub cover_image: Option<String>,
    /// Draft flag decided by [`SubmitMode`]
    pub is_draft: bool,
}

/// Entity returned by the create/update collaborators.
///
/// Fields beyond the ones the composer cares about are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    /// Identifier of the persisted entity
    id: EntityId,
    /// Whether the entity was persisted as a draft
    #[serde(default)]
    is_draft: bool,
    /// Any other fields returned by the collaborator
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

impl EntityDescriptor {
    /// Create a descriptor with no extra fields.
    pub fn new(id: EntityId, is_draft: bool) -> Self {
        Self {
            id,
            is_draft,
            extra: HashMap::new(),
        }
    }

    /// Attach an extra field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

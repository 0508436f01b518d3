//! Persisted entities used to pre-populate the composer in edit mode.

use crate::{AttachmentKind, EntityId, ResolvedKind};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A published or draft item opened for editing.
#[derive(
    Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ExistingItem {
    /// Identifier used for the update call
    id: EntityId,
    /// Kind the item was persisted as
    kind: ResolvedKind,
    /// Remote URL of the primary file
    #[builder(default)]
    #[serde(default)]
    content_url: Option<String>,
    /// Body of a text item
    #[builder(default)]
    #[serde(default)]
    text_content: Option<String>,
    /// Title
    #[builder(default)]
    #[serde(default)]
    title: Option<String>,
    /// Caption
    #[builder(default)]
    #[serde(default)]
    description: Option<String>,
    /// Remote URL of the attachment
    #[builder(default)]
    #[serde(default)]
    attachment_url: Option<String>,
    /// Kind of the attachment
    #[builder(default)]
    #[serde(default)]
    attachment_kind: Option<AttachmentKind>,
    /// Whether the item is currently a draft
    #[builder(default)]
    #[serde(default)]
    is_draft: bool,
}

/// A project opened for editing.
#[derive(
    Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ExistingProject {
    /// Identifier used for the update call
    id: EntityId,
    /// Project title
    title: String,
    /// Description
    #[builder(default)]
    #[serde(default)]
    description: Option<String>,
    /// Remote URL of the cover image
    #[builder(default)]
    #[serde(default)]
    cover_image: Option<String>,
}

//! The in-memory work-in-progress item.

use crate::{AttachmentKind, EntityId, ExistingItem, LocalFile, ResolvedKind, SelectedKind};
use tracing::debug;

/// Where an attachment's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentSource {
    /// Freshly selected, must be uploaded on submit
    Local(LocalFile),
    /// Already persisted with the item being edited
    Remote(String),
}

/// Secondary file paired with the primary content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Audio or PDF
    pub kind: AttachmentKind,
    /// Local file or existing URL
    pub source: AttachmentSource,
    /// Name shown in the attachment row
    pub display_name: String,
}

impl Attachment {
    /// Attachment backed by a freshly selected file.
    pub fn local(kind: AttachmentKind, file: LocalFile) -> Self {
        let display_name = file.name().clone();
        Self {
            kind,
            source: AttachmentSource::Local(file),
            display_name,
        }
    }

    /// Attachment already stored remotely.
    pub fn remote(kind: AttachmentKind, url: impl Into<String>) -> Self {
        let url = url.into();
        let display_name = url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(kind.as_str())
            .to_string();
        Self {
            kind,
            source: AttachmentSource::Remote(url),
            display_name,
        }
    }
}

/// The single attachment slot.
///
/// `Removing` keeps the attachment visible while its exit transition plays; the
/// slot still counts as occupied until the removal finishes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttachmentSlot {
    /// No attachment
    #[default]
    Empty,
    /// Attachment present
    Present(Attachment),
    /// Attachment on its way out
    Removing(Attachment),
}

impl AttachmentSlot {
    /// The attachment, whether present or being removed.
    pub fn attachment(&self) -> Option<&Attachment> {
        match self {
            AttachmentSlot::Empty => None,
            AttachmentSlot::Present(a) | AttachmentSlot::Removing(a) => Some(a),
        }
    }

    /// Kind occupying the slot, if any.
    pub fn kind(&self) -> Option<AttachmentKind> {
        self.attachment().map(|a| a.kind)
    }

    /// True while the exit transition runs.
    pub fn is_removing(&self) -> bool {
        matches!(self, AttachmentSlot::Removing(_))
    }
}

/// Character bounds of the free-text fields of a [`Draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBounds {
    /// Caption bound
    pub caption: usize,
    /// Text post body bound
    pub text_body: usize,
    /// Title bound
    pub title: usize,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            caption: 170,
            text_body: 170,
            title: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ExistingContent {
    kind: ResolvedKind,
    url: String,
}

/// Work-in-progress item held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    selected_kind: SelectedKind,
    resolved_kind: Option<ResolvedKind>,
    primary_file: Option<LocalFile>,
    existing_content: Option<ExistingContent>,
    text_body: String,
    caption: String,
    title: String,
    attachment: AttachmentSlot,
    edit_target: Option<EntityId>,
}

impl Draft {
    /// Empty draft for a new item.
    pub fn new(selected_kind: SelectedKind) -> Self {
        Self {
            selected_kind,
            ..Default::default()
        }
    }

    /// Draft pre-populated from an item opened for editing.
    ///
    /// Persisted text longer than `bounds` is truncated like typed input.
    pub fn from_existing(item: &ExistingItem, bounds: FieldBounds) -> Self {
        let existing_content = item.content_url().clone().map(|url| ExistingContent {
            kind: *item.kind(),
            url,
        });
        let attachment = match (item.attachment_kind(), item.attachment_url()) {
            (Some(kind), Some(url)) => AttachmentSlot::Present(Attachment::remote(*kind, url)),
            _ => AttachmentSlot::Empty,
        };
        Self {
            selected_kind: item.kind().selected(),
            resolved_kind: None,
            primary_file: None,
            existing_content,
            text_body: truncate_chars(
                item.text_content().as_deref().unwrap_or_default(),
                bounds.text_body,
            ),
            caption: truncate_chars(
                item.description().as_deref().unwrap_or_default(),
                bounds.caption,
            ),
            title: truncate_chars(item.title().as_deref().unwrap_or_default(), bounds.title),
            attachment,
            edit_target: Some(item.id().clone()),
        }
    }

    /// Kind the user picked.
    pub fn selected_kind(&self) -> SelectedKind {
        self.selected_kind
    }

    /// Concrete kind of the primary payload, if it can be known yet.
    ///
    /// A fresh file wins; otherwise text resolves to itself and edit mode falls back
    /// to the persisted kind while it still matches the selection.
    pub fn resolved_kind(&self) -> Option<ResolvedKind> {
        if self.primary_file.is_some() {
            return self.resolved_kind;
        }
        if self.selected_kind == SelectedKind::Text {
            return Some(ResolvedKind::Text);
        }
        self.existing_content
            .as_ref()
            .filter(|c| c.kind.selected() == self.selected_kind)
            .map(|c| c.kind)
    }

    /// Freshly selected primary file.
    pub fn primary_file(&self) -> Option<&LocalFile> {
        self.primary_file.as_ref()
    }

    /// Existing remote content standing in for the primary file.
    pub fn existing_content_url(&self) -> Option<&str> {
        self.existing_content
            .as_ref()
            .filter(|c| c.kind.selected() == self.selected_kind)
            .map(|c| c.url.as_str())
    }

    /// Body of a text post.
    pub fn text_body(&self) -> &str {
        &self.text_body
    }

    /// Caption for file-backed posts.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Optional title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The attachment slot.
    pub fn attachment(&self) -> &AttachmentSlot {
        &self.attachment
    }

    /// Entity being edited, if any.
    pub fn edit_target(&self) -> Option<&EntityId> {
        self.edit_target.as_ref()
    }

    /// Whether submission updates an existing entity.
    pub fn is_edit(&self) -> bool {
        self.edit_target.is_some()
    }

    /// Switch the content kind, returning the primary file it displaced.
    pub fn set_selected_kind(&mut self, kind: SelectedKind) -> Option<LocalFile> {
        if kind == self.selected_kind {
            return None;
        }
        debug!(from = %self.selected_kind, to = %kind, "Switching content kind");
        self.selected_kind = kind;
        self.resolved_kind = None;
        self.primary_file.take()
    }

    /// Store a validated primary file, returning the one it replaced.
    pub fn set_primary_file(
        &mut self,
        file: LocalFile,
        resolved: ResolvedKind,
    ) -> Option<LocalFile> {
        self.resolved_kind = Some(resolved);
        self.primary_file.replace(file)
    }

    /// Remove the primary file.
    pub fn take_primary_file(&mut self) -> Option<LocalFile> {
        self.resolved_kind = None;
        self.primary_file.take()
    }

    /// Set the text body, truncated to `max_chars`.
    pub fn set_text_body(&mut self, text: &str, max_chars: usize) {
        self.text_body = truncate_chars(text, max_chars);
    }

    /// Set the caption, truncated to `max_chars`.
    pub fn set_caption(&mut self, text: &str, max_chars: usize) {
        self.caption = truncate_chars(text, max_chars);
    }

    /// Set the title, truncated to `max_chars`.
    pub fn set_title(&mut self, text: &str, max_chars: usize) {
        self.title = truncate_chars(text, max_chars);
    }

    /// Fill the empty slot.
    ///
    /// Returns false and leaves the draft untouched when the slot is occupied.
    pub fn attach(&mut self, attachment: Attachment) -> bool {
        if !matches!(self.attachment, AttachmentSlot::Empty) {
            return false;
        }
        self.attachment = AttachmentSlot::Present(attachment);
        true
    }

    /// Start the exit transition of a present attachment.
    pub fn begin_attachment_removal(&mut self) -> bool {
        match std::mem::take(&mut self.attachment) {
            AttachmentSlot::Present(a) => {
                self.attachment = AttachmentSlot::Removing(a);
                true
            }
            other => {
                self.attachment = other;
                false
            }
        }
    }

    /// Clear the slot once the exit transition has finished.
    pub fn finish_attachment_removal(&mut self) -> Option<Attachment> {
        match std::mem::take(&mut self.attachment) {
            AttachmentSlot::Removing(a) => Some(a),
            other => {
                self.attachment = other;
                None
            }
        }
    }

    /// Drop the attachment immediately, without a transition.
    pub fn clear_attachment(&mut self) -> Option<Attachment> {
        match std::mem::take(&mut self.attachment) {
            AttachmentSlot::Empty => None,
            AttachmentSlot::Present(a) | AttachmentSlot::Removing(a) => Some(a),
        }
    }
}

/// Keep at most `max_chars` characters of `text`.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

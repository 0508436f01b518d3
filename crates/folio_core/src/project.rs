//! Work-in-progress project.

use crate::draft::truncate_chars;
use crate::{EntityId, ExistingProject, LocalFile};

/// Project being composed: a title, an optional description and cover image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectDraft {
    title: String,
    description: String,
    cover_file: Option<LocalFile>,
    existing_cover: Option<String>,
    edit_target: Option<EntityId>,
}

impl ProjectDraft {
    /// Empty project draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft pre-populated from a project opened for editing, with the persisted
    /// title and description truncated to `title_max` and `description_max` chars.
    pub fn from_existing(
        project: &ExistingProject,
        title_max: usize,
        description_max: usize,
    ) -> Self {
        Self {
            title: truncate_chars(project.title(), title_max),
            description: truncate_chars(
                project.description().as_deref().unwrap_or_default(),
                description_max,
            ),
            cover_file: None,
            existing_cover: project.cover_image().clone(),
            edit_target: Some(project.id().clone()),
        }
    }

    /// Project title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Project description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Freshly selected cover image.
    pub fn cover_file(&self) -> Option<&LocalFile> {
        self.cover_file.as_ref()
    }

    /// Cover already stored with the project being edited.
    pub fn existing_cover(&self) -> Option<&str> {
        self.existing_cover.as_deref()
    }

    /// Project being edited, if any.
    pub fn edit_target(&self) -> Option<&EntityId> {
        self.edit_target.as_ref()
    }

    /// Set the title, truncated to `max_chars`.
    pub fn set_title(&mut self, text: &str, max_chars: usize) {
        self.title = truncate_chars(text, max_chars);
    }

    /// Set the description, truncated to `max_chars`.
    pub fn set_description(&mut self, text: &str, max_chars: usize) {
        self.description = truncate_chars(text, max_chars);
    }

    /// Store a validated cover image, returning the one it replaced.
    pub fn set_cover_file(&mut self, file: LocalFile) -> Option<LocalFile> {
        self.cover_file.replace(file)
    }

    /// Remove the fresh cover and forget the existing one.
    pub fn clear_cover(&mut self) -> Option<LocalFile> {
        self.existing_cover = None;
        self.cover_file.take()
    }
}

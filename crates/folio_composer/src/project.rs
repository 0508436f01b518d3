//! The project composer: a title, an optional description and a cover image.

use crate::{
    Collaborators, ComposerConfig, ModalLifecycle, ModalState, PreviewHandle, PreviewManager,
    ProjectStore, SubmissionCoordinator, SubmitOutcome, Validator,
};
use folio_core::{ExistingProject, LocalFile, ProjectDraft, SubmitMode};
use folio_error::{ComposerError, ComposerErrorKind, FolioResult};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// Controller behind the project creation and edit modal.
pub struct ProjectComposer {
    config: ComposerConfig,
    validator: Validator,
    draft: ProjectDraft,
    preview: PreviewManager,
    lifecycle: ModalLifecycle,
    coordinator: Arc<SubmissionCoordinator>,
    projects: Arc<dyn ProjectStore>,
}

impl std::fmt::Debug for ProjectComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectComposer")
            .field("state", &self.lifecycle.state())
            .field("draft", &self.draft)
            .field("preview", &self.preview)
            .finish_non_exhaustive()
    }
}

impl ProjectComposer {
    /// Closed composer wired to `collaborators`.
    pub fn new(config: ComposerConfig, collaborators: &Collaborators) -> Self {
        Self {
            validator: Validator::new(config.limits.clone()),
            draft: ProjectDraft::new(),
            preview: PreviewManager::new(Arc::clone(&collaborators.previews)),
            lifecycle: ModalLifecycle::new(Arc::clone(&collaborators.hooks)),
            coordinator: Arc::new(SubmissionCoordinator::new(
                Arc::clone(&collaborators.uploader),
                &config,
            )),
            projects: Arc::clone(&collaborators.projects),
            config,
        }
    }

    /// The project being composed.
    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    /// Modal state.
    pub fn state(&self) -> ModalState {
        self.lifecycle.state()
    }

    /// Preview of the selected cover.
    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.current()
    }

    /// Whether a submission is pending.
    pub fn is_submitting(&self) -> bool {
        self.coordinator.is_submitting()
    }

    /// Subscribe to the simulated submission progress.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.coordinator.progress()
    }

    /// Open with an empty project.
    pub fn open_new(&mut self) -> bool {
        if !self.lifecycle.open() {
            return false;
        }
        self.reset(ProjectDraft::new());
        true
    }

    /// Open pre-populated from a project being edited.
    #[instrument(skip(self, project), fields(id = %project.id()))]
    pub fn open_edit(&mut self, project: &ExistingProject) -> bool {
        if !self.lifecycle.open() {
            return false;
        }
        let limits = &self.config.limits;
        let draft = ProjectDraft::from_existing(
            project,
            limits.project_title_max_chars,
            limits.project_description_max_chars,
        );
        self.reset(draft);
        true
    }

    /// The enter transition finished.
    pub fn finish_opening(&mut self) -> bool {
        self.lifecycle.finish_opening()
    }

    /// Cancel: discard the draft and release the cover preview.
    pub fn close(&mut self) -> FolioResult<()> {
        if self.is_submitting() {
            return Err(ComposerError::new(ComposerErrorKind::Submitting).into());
        }
        if self.lifecycle.close() {
            self.reset(ProjectDraft::new());
        }
        Ok(())
    }

    /// The exit transition finished.
    pub fn finish_closing(&mut self) -> bool {
        self.lifecycle.finish_closing()
    }

    /// Replace the title.
    pub fn set_title(&mut self, text: &str) -> FolioResult<()> {
        self.ensure_editable()?;
        self.draft
            .set_title(text, self.config.limits.project_title_max_chars);
        Ok(())
    }

    /// Replace the description.
    pub fn set_description(&mut self, text: &str) -> FolioResult<()> {
        self.ensure_editable()?;
        self.draft
            .set_description(text, self.config.limits.project_description_max_chars);
        Ok(())
    }

    /// Validate and select a cover image.
    #[instrument(skip(self, file), fields(name = %file.name()))]
    pub fn select_cover(&mut self, file: LocalFile) -> FolioResult<()> {
        self.ensure_editable()?;
        self.validator
            .validate_cover(&file)
            .inspect_err(|e| warn!(error = %e.user_message(), "Cover rejected"))?;
        self.preview.acquire(&file);
        self.draft.set_cover_file(file);
        Ok(())
    }

    /// Remove the cover, including one stored with the project being edited.
    pub fn clear_cover(&mut self) -> FolioResult<()> {
        self.ensure_editable()?;
        self.draft.clear_cover();
        self.preview.release();
        Ok(())
    }

    /// Submit the project.
    ///
    /// On success the draft is discarded and the modal starts closing.
    pub async fn submit(&mut self, mode: SubmitMode) -> FolioResult<SubmitOutcome> {
        if !self.lifecycle.is_open() {
            return Err(ComposerError::new(ComposerErrorKind::NotOpen).into());
        }
        let outcome = self
            .coordinator
            .submit_project(&self.draft, mode, self.projects.as_ref())
            .await?;

        if let SubmitOutcome::Completed(descriptor) = &outcome {
            info!(id = %descriptor.id(), "Project saved");
            self.reset(ProjectDraft::new());
            self.lifecycle.close();
        }
        Ok(outcome)
    }

    fn reset(&mut self, draft: ProjectDraft) {
        self.preview.release();
        self.draft = draft;
    }

    fn ensure_editable(&self) -> FolioResult<()> {
        if !self.lifecycle.is_open() {
            return Err(ComposerError::new(ComposerErrorKind::NotOpen).into());
        }
        if self.is_submitting() {
            return Err(ComposerError::new(ComposerErrorKind::Submitting).into());
        }
        Ok(())
    }
}

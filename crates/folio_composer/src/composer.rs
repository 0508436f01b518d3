//! The single-item composer.
//!
//! [`Composer`] owns the [`Draft`], the preview handle of the primary file, the
//! attachment row gesture, the modal lifecycle and the submission coordinator.
//! Every user input is routed through it; inputs that do not apply in the current
//! state are refused with a [`ComposerError`] whose message can be shown inline.
//!
//! While a submission is pending the composer refuses file selection, attachment
//! changes, field edits and closing, and ignores gestures.

use crate::{
    AttachmentOffer, ComposerConfig, ContentUploader, EntityStore, GestureInterpreter, Key,
    ModalHooks, ModalLifecycle, ModalState, PreviewBackend, PreviewHandle, PreviewManager,
    ProjectStore, SubmissionCoordinator, SubmitOutcome, TextAffordance, Validator,
    attachment_offers, can_offer,
};
use folio_core::{
    Attachment, AttachmentKind, Draft, ExistingItem, LocalFile, ResolvedKind, SelectedKind,
    SubmitMode,
};
use folio_error::{ComposerError, ComposerErrorKind, FolioError, FolioResult};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Host capabilities a composer is wired to.
#[derive(Clone)]
pub struct Collaborators {
    /// Binary file storage
    pub uploader: Arc<dyn ContentUploader>,
    /// Item create/update
    pub entities: Arc<dyn EntityStore>,
    /// Project create/update
    pub projects: Arc<dyn ProjectStore>,
    /// Local preview sources
    pub previews: Arc<dyn PreviewBackend>,
    /// Modal enter/exit side effects
    pub hooks: Arc<dyn ModalHooks>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Multi-line fields that take the list affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TextField {
    /// Caption of a file-backed post
    #[display("caption")]
    Caption,
    /// Body of a text post
    #[display("text body")]
    TextBody,
}

/// Controller behind the item creation and edit modal.
///
/// [`Composer::submit`] borrows the composer mutably for the whole submission,
/// so no other input can reach it until the call returns. A host that keeps
/// handling input while an upload is in flight drives the shared
/// [`coordinator`](Composer::coordinator) with a snapshot of
/// [`draft`](Composer::draft) instead; every mutating input is then refused with
/// `Submitting` and gestures are ignored until the coordinator is idle.
pub struct Composer {
    config: ComposerConfig,
    validator: Validator,
    affordance: TextAffordance,
    draft: Draft,
    preview: PreviewManager,
    gesture: GestureInterpreter,
    lifecycle: ModalLifecycle,
    coordinator: Arc<SubmissionCoordinator>,
    entities: Arc<dyn EntityStore>,
    playing: bool,
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("state", &self.lifecycle.state())
            .field("draft", &self.draft)
            .field("preview", &self.preview)
            .field("gesture", &self.gesture)
            .field("playing", &self.playing)
            .finish_non_exhaustive()
    }
}

impl Composer {
    /// Closed composer wired to `collaborators`.
    pub fn new(config: ComposerConfig, collaborators: &Collaborators) -> Self {
        let coordinator = Arc::new(SubmissionCoordinator::new(
            Arc::clone(&collaborators.uploader),
            &config,
        ));
        Self::with_coordinator(config, collaborators, coordinator)
    }

    /// Closed composer using an existing coordinator.
    pub fn with_coordinator(
        config: ComposerConfig,
        collaborators: &Collaborators,
        coordinator: Arc<SubmissionCoordinator>,
    ) -> Self {
        Self {
            validator: Validator::new(config.limits.clone()),
            affordance: TextAffordance::new(&config.text),
            gesture: GestureInterpreter::new(config.gesture),
            draft: Draft::default(),
            preview: PreviewManager::new(Arc::clone(&collaborators.previews)),
            lifecycle: ModalLifecycle::new(Arc::clone(&collaborators.hooks)),
            coordinator,
            entities: Arc::clone(&collaborators.entities),
            playing: false,
            config,
        }
    }

    /// The draft being composed.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Modal state.
    pub fn state(&self) -> ModalState {
        self.lifecycle.state()
    }

    /// Preview of the primary file, if one is selected.
    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.current()
    }

    /// Attachment row reveal offset in pixels.
    pub fn reveal_offset(&self) -> u32 {
        self.gesture.reveal_offset()
    }

    /// Whether the local audio preview is playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether a submission is pending.
    pub fn is_submitting(&self) -> bool {
        self.coordinator.is_submitting()
    }

    /// Shared submission coordinator.
    ///
    /// Submitting through it directly leaves the composer free to receive input,
    /// which it then refuses while the submission is pending.
    pub fn coordinator(&self) -> Arc<SubmissionCoordinator> {
        Arc::clone(&self.coordinator)
    }

    /// Subscribe to the simulated submission progress.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.coordinator.progress()
    }

    /// Open with an empty draft of `kind`.
    #[instrument(skip(self))]
    pub fn open_new(&mut self, kind: SelectedKind) -> bool {
        if !self.lifecycle.open() {
            warn!(state = %self.lifecycle.state(), "Composer already open");
            return false;
        }
        self.reset(Draft::new(kind));
        true
    }

    /// Open pre-populated from an item being edited.
    #[instrument(skip(self, item), fields(id = %item.id()))]
    pub fn open_edit(&mut self, item: &ExistingItem) -> bool {
        if !self.lifecycle.open() {
            warn!(state = %self.lifecycle.state(), "Composer already open");
            return false;
        }
        let draft = Draft::from_existing(item, self.config.limits.field_bounds());
        self.reset(draft);
        true
    }

    /// The enter transition finished.
    pub fn finish_opening(&mut self) -> bool {
        self.lifecycle.finish_opening()
    }

    /// Cancel: discard the draft and release the preview.
    ///
    /// # Errors
    ///
    /// Refused while a submission is pending.
    #[instrument(skip(self))]
    pub fn close(&mut self) -> FolioResult<()> {
        if self.is_submitting() {
            warn!("Close refused while submitting");
            return Err(refused(ComposerErrorKind::Submitting));
        }
        if self.lifecycle.close() {
            self.reset(Draft::default());
        }
        Ok(())
    }

    /// The exit transition finished.
    pub fn finish_closing(&mut self) -> bool {
        self.lifecycle.finish_closing()
    }

    /// Switch the content kind.
    ///
    /// Releases the primary file and its preview, and drops an attachment the new
    /// kind cannot carry.
    #[instrument(skip(self))]
    pub fn set_kind(&mut self, kind: SelectedKind) -> FolioResult<()> {
        self.ensure_editable()?;
        if self.draft.set_selected_kind(kind).is_some() {
            self.release_preview();
        }
        if kind.same_class_attachment().is_some()
            && self.draft.attachment().kind() == kind.same_class_attachment()
        {
            debug!("Dropping attachment of the same class as the new kind");
            self.draft.clear_attachment();
            self.gesture.reset();
        }
        Ok(())
    }

    /// Validate and select the primary file.
    ///
    /// On rejection no preview handle is acquired and the draft is unchanged.
    #[instrument(skip(self, file), fields(name = %file.name()))]
    pub fn select_primary_file(&mut self, file: LocalFile) -> FolioResult<ResolvedKind> {
        self.ensure_editable()?;
        let resolved = self
            .validator
            .validate(self.draft.selected_kind(), &file)
            .inspect_err(|e| warn!(error = %e.user_message(), "File rejected"))?;

        self.preview.acquire(&file);
        self.playing = false;
        self.draft.set_primary_file(file, resolved);
        Ok(resolved)
    }

    /// Remove the primary file.
    pub fn clear_primary_file(&mut self) -> FolioResult<()> {
        self.ensure_editable()?;
        self.draft.take_primary_file();
        self.release_preview();
        Ok(())
    }

    /// Replace the caption.
    pub fn set_caption(&mut self, text: &str) -> FolioResult<()> {
        self.ensure_editable()?;
        self.ensure_field(TextField::Caption)?;
        self.draft
            .set_caption(text, self.config.limits.caption_max_chars);
        Ok(())
    }

    /// Replace the text body.
    pub fn set_text_body(&mut self, text: &str) -> FolioResult<()> {
        self.ensure_editable()?;
        self.ensure_field(TextField::TextBody)?;
        self.draft
            .set_text_body(text, self.config.limits.text_max_chars);
        Ok(())
    }

    /// Replace the title.
    pub fn set_title(&mut self, text: &str) -> FolioResult<()> {
        self.ensure_editable()?;
        self.draft.set_title(text, self.config.limits.title_max_chars);
        Ok(())
    }

    /// Route a key press in `field` through the list affordances.
    ///
    /// Returns the new caret position when the key was consumed, `None` when it
    /// should fall through to the field.
    pub fn handle_key(
        &mut self,
        field: TextField,
        caret_start: usize,
        caret_end: usize,
        key: Key,
    ) -> FolioResult<Option<usize>> {
        self.ensure_editable()?;
        self.ensure_field(field)?;
        let current = match field {
            TextField::Caption => self.draft.caption(),
            TextField::TextBody => self.draft.text_body(),
        };
        let Some(edit) = self.affordance.apply(current, caret_start, caret_end, key) else {
            return Ok(None);
        };

        let limits = &self.config.limits;
        let max_chars = match field {
            TextField::Caption => limits.caption_max_chars,
            TextField::TextBody => limits.text_max_chars,
        };
        if edit.text.chars().count() > max_chars {
            debug!(%field, "Affordance would exceed field length");
            return Ok(Some(caret_start.min(caret_end)));
        }
        match field {
            TextField::Caption => self.draft.set_caption(&edit.text, max_chars),
            TextField::TextBody => self.draft.set_text_body(&edit.text, max_chars),
        }
        Ok(Some(edit.caret))
    }

    /// Attachment picker entries, unavailable kinds included but disabled.
    pub fn attachment_offers(&self) -> Vec<AttachmentOffer> {
        attachment_offers(self.draft.selected_kind(), self.draft.attachment().kind())
    }

    /// Validate and attach a secondary file.
    #[instrument(skip(self, file), fields(name = %file.name()))]
    pub fn select_attachment(&mut self, kind: AttachmentKind, file: LocalFile) -> FolioResult<()> {
        self.ensure_editable()?;
        let existing = self.draft.attachment().kind();
        if existing.is_some() {
            warn!(?existing, "Attachment slot occupied");
            return Err(refused(ComposerErrorKind::AttachmentSlotOccupied));
        }
        if !can_offer(self.draft.selected_kind(), kind, existing) {
            warn!(%kind, "Attachment kind not offered");
            return Err(refused(ComposerErrorKind::AttachmentUnavailable(
                kind.to_string(),
            )));
        }
        self.validator
            .validate_attachment(kind, &file)
            .inspect_err(|e| warn!(error = %e.user_message(), "Attachment rejected"))?;

        self.draft.attach(Attachment::local(kind, file));
        Ok(())
    }

    /// Begin a swipe on the attachment row.
    pub fn drag_start(&mut self, x: i32) {
        if self.gestures_enabled() {
            self.gesture.drag_start(x);
        }
    }

    /// Continue a swipe on the attachment row.
    pub fn drag_move(&mut self, x: i32) -> u32 {
        if self.gestures_enabled() {
            self.gesture.drag_move(x)
        } else {
            self.gesture.reveal_offset()
        }
    }

    /// Release a swipe on the attachment row.
    pub fn drag_end(&mut self) -> u32 {
        if self.gestures_enabled() {
            self.gesture.drag_end()
        } else {
            self.gesture.reveal_offset()
        }
    }

    /// Tap on the revealed delete button.
    ///
    /// Starts the attachment's exit transition; call
    /// [`finish_attachment_removal`](Self::finish_attachment_removal) when it ends.
    #[instrument(skip(self))]
    pub fn tap_delete(&mut self) -> FolioResult<()> {
        self.ensure_editable()?;
        if !self.gesture.tap_delete() {
            return Err(refused(ComposerErrorKind::DeleteNotRevealed));
        }
        self.draft.begin_attachment_removal();
        Ok(())
    }

    /// Tap anywhere outside the revealed delete button.
    pub fn tap_outside(&mut self) {
        if self.gestures_enabled() {
            self.gesture.tap_outside();
        }
    }

    /// The attachment's exit transition finished.
    pub fn finish_attachment_removal(&mut self) -> Option<Attachment> {
        self.draft.finish_attachment_removal()
    }

    /// Start or pause the local audio preview.
    pub fn toggle_playback(&mut self) -> FolioResult<bool> {
        let playable =
            self.draft.resolved_kind() == Some(ResolvedKind::Audio) && self.preview.is_live();
        if !playable {
            return Err(refused(ComposerErrorKind::NoPlayablePreview));
        }
        self.playing = !self.playing;
        Ok(self.playing)
    }

    /// Submit the draft.
    ///
    /// On success the draft is discarded and the modal starts closing. On failure
    /// the draft is kept so the user can retry.
    ///
    /// # Errors
    ///
    /// Incomplete drafts and transport failures; see
    /// [`SubmissionCoordinator::submit`].
    #[instrument(skip(self), fields(kind = %self.draft.selected_kind()))]
    pub async fn submit(&mut self, mode: SubmitMode) -> FolioResult<SubmitOutcome> {
        if !self.lifecycle.is_open() {
            return Err(refused(ComposerErrorKind::NotOpen));
        }
        self.gesture.reset();
        let outcome = self
            .coordinator
            .submit(&self.draft, mode, self.entities.as_ref())
            .await?;

        if let SubmitOutcome::Completed(descriptor) = &outcome {
            info!(id = %descriptor.id(), "Item saved");
            self.reset(Draft::default());
            self.lifecycle.close();
        }
        Ok(outcome)
    }

    fn reset(&mut self, draft: Draft) {
        self.release_preview();
        self.gesture.reset();
        self.draft = draft;
    }

    fn release_preview(&mut self) {
        self.preview.release();
        self.playing = false;
    }

    fn gestures_enabled(&self) -> bool {
        self.lifecycle.is_open()
            && !self.is_submitting()
            && matches!(self.draft.attachment(), folio_core::AttachmentSlot::Present(_))
    }

    fn ensure_editable(&self) -> FolioResult<()> {
        if !self.lifecycle.is_open() {
            return Err(refused(ComposerErrorKind::NotOpen));
        }
        if self.is_submitting() {
            return Err(refused(ComposerErrorKind::Submitting));
        }
        Ok(())
    }

    fn ensure_field(&self, field: TextField) -> FolioResult<()> {
        let is_text = self.draft.selected_kind() == SelectedKind::Text;
        match (field, is_text) {
            (TextField::Caption, true) | (TextField::TextBody, false) => Err(refused(
                ComposerErrorKind::WrongKind(self.draft.selected_kind().to_string()),
            )),
            _ => Ok(()),
        }
    }
}

#[track_caller]
fn refused(kind: ComposerErrorKind) -> FolioError {
    ComposerError::new(kind).into()
}

//! Ordered submission of a draft.
//!
//! 1. Check the draft has its primary content.
//! 2. Upload a freshly selected primary file, or reuse the existing URL.
//! 3. Upload a freshly selected attachment, or reuse the existing URL.
//! 4. Create or update the entity with `isDraft` taken from the [`SubmitMode`].
//!
//! Any failure aborts the sequence. When `discard_orphans` is enabled, files
//! uploaded earlier in the failed attempt are handed back to
//! [`ContentUploader::discard`]; discard failures are logged and the original
//! error is returned. Nothing is retried.
//!
//! Only one submission runs per coordinator. A second call while one is pending
//! returns [`SubmitOutcome::AlreadyInFlight`] without touching any collaborator.

use crate::{
    ComposerConfig, ContentUploader, EntityStore, LayoutConfig, ProgressConfig,
    ProgressEstimator, ProjectStore, SimulatedProgress,
};
use folio_core::{
    AttachmentSlot, AttachmentSource, Draft, EntityDescriptor, ItemPayload, LocalFile,
    ProjectDraft, ProjectPayload, RemoteRef, ResolvedKind, SubmitMode, UploadKind,
};
use folio_error::{
    ComposerError, ComposerErrorKind, FolioError, FolioResult, IncompleteError,
    IncompleteErrorKind,
};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, instrument, warn};

/// Result of a call to submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The entity was persisted
    Completed(EntityDescriptor),
    /// Another submission is still pending; nothing was done
    AlreadyInFlight,
}

impl SubmitOutcome {
    /// The persisted entity, if the submission ran.
    pub fn descriptor(&self) -> Option<&EntityDescriptor> {
        match self {
            SubmitOutcome::Completed(descriptor) => Some(descriptor),
            SubmitOutcome::AlreadyInFlight => None,
        }
    }
}

/// Clears the busy flag when the submission ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs the upload and persist steps and publishes a progress signal.
pub struct SubmissionCoordinator {
    uploader: Arc<dyn ContentUploader>,
    layout: LayoutConfig,
    progress_config: ProgressConfig,
    discard_orphans: bool,
    estimator: Mutex<Box<dyn ProgressEstimator>>,
    progress: watch::Sender<u8>,
    in_flight: AtomicBool,
}

impl std::fmt::Debug for SubmissionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionCoordinator")
            .field("layout", &self.layout)
            .field("discard_orphans", &self.discard_orphans)
            .field("progress", &*self.progress.borrow())
            .field("in_flight", &self.is_submitting())
            .finish_non_exhaustive()
    }
}

impl SubmissionCoordinator {
    /// Coordinator with a simulated progress signal.
    pub fn new(uploader: Arc<dyn ContentUploader>, config: &ComposerConfig) -> Self {
        let estimator = Box::new(SimulatedProgress::new(config.progress));
        Self::with_estimator(uploader, config, estimator)
    }

    /// Coordinator with a caller-supplied progress estimator.
    pub fn with_estimator(
        uploader: Arc<dyn ContentUploader>,
        config: &ComposerConfig,
        estimator: Box<dyn ProgressEstimator>,
    ) -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            uploader,
            layout: config.layout.clone(),
            progress_config: config.progress,
            discard_orphans: config.submission.discard_orphans,
            estimator: Mutex::new(estimator),
            progress,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is pending.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Subscribe to the progress percentage.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// Last published progress percentage.
    pub fn current_progress(&self) -> u8 {
        *self.progress.borrow()
    }

    /// Submit an item draft.
    ///
    /// # Errors
    ///
    /// Returns an incomplete error when the draft lacks its primary content, or
    /// the first transport error raised by a collaborator.
    #[instrument(skip(self, draft, store), fields(mode = %mode, edit = draft.is_edit()))]
    pub async fn submit(
        &self,
        draft: &Draft,
        mode: SubmitMode,
        store: &dyn EntityStore,
    ) -> FolioResult<SubmitOutcome> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            warn!("Submission already in flight");
            return Ok(SubmitOutcome::AlreadyInFlight);
        };

        let kind = check_submittable(draft)?;
        let mut estimator = self.estimator.lock().await;
        self.publish(estimator.as_mut(), Progress::Start);

        let mut uploaded = Vec::new();
        let result = self
            .run_item(draft, kind, mode, store, estimator.as_mut(), &mut uploaded)
            .await;
        self.finish(result, estimator.as_mut(), uploaded).await
    }

    /// Submit a project draft.
    ///
    /// # Errors
    ///
    /// Returns an incomplete error when the title is blank, or the first
    /// transport error raised by a collaborator.
    #[instrument(skip(self, draft, store), fields(mode = %mode, edit = draft.edit_target().is_some()))]
    pub async fn submit_project(
        &self,
        draft: &ProjectDraft,
        mode: SubmitMode,
        store: &dyn ProjectStore,
    ) -> FolioResult<SubmitOutcome> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            warn!("Submission already in flight");
            return Ok(SubmitOutcome::AlreadyInFlight);
        };

        let title = draft.title().trim();
        if title.is_empty() {
            return Err(IncompleteError::new(IncompleteErrorKind::MissingTitle).into());
        }
        let mut estimator = self.estimator.lock().await;
        self.publish(estimator.as_mut(), Progress::Start);

        let mut uploaded = Vec::new();
        let result = self
            .run_project(draft, title, mode, store, estimator.as_mut(), &mut uploaded)
            .await;
        self.finish(result, estimator.as_mut(), uploaded).await
    }

    async fn run_project(
        &self,
        draft: &ProjectDraft,
        title: &str,
        mode: SubmitMode,
        store: &dyn ProjectStore,
        estimator: &mut dyn ProgressEstimator,
        uploaded: &mut Vec<RemoteRef>,
    ) -> FolioResult<EntityDescriptor> {
        let cover_image = match draft.cover_file() {
            Some(file) => Some(
                self.upload(file, UploadKind::ProjectCover, estimator, uploaded)
                    .await?,
            ),
            None => draft.existing_cover().map(str::to_string),
        };
        let payload = ProjectPayload {
            title: title.to_string(),
            description: non_blank(draft.description()),
            cover_image,
            is_draft: mode.is_draft(),
        };

        let call = async {
            match draft.edit_target() {
                Some(id) => store.update_project(id, &payload).await,
                None => store.create_project(&payload).await,
            }
        };
        self.drive(estimator, call).await
    }

    async fn run_item(
        &self,
        draft: &Draft,
        kind: ResolvedKind,
        mode: SubmitMode,
        store: &dyn EntityStore,
        estimator: &mut dyn ProgressEstimator,
        uploaded: &mut Vec<RemoteRef>,
    ) -> FolioResult<EntityDescriptor> {
        let content_url = match (kind, draft.primary_file()) {
            (ResolvedKind::Text, _) => None,
            (_, Some(file)) => {
                let upload_kind = kind.upload_kind().ok_or_else(|| {
                    FolioError::from(ComposerError::new(ComposerErrorKind::WrongKind(
                        kind.to_string(),
                    )))
                })?;
                Some(self.upload(file, upload_kind, estimator, uploaded).await?)
            }
            (_, None) => draft.existing_content_url().map(str::to_string),
        };

        let attachment = match draft.attachment() {
            AttachmentSlot::Present(attachment) => {
                let url = match &attachment.source {
                    AttachmentSource::Local(file) => {
                        self.upload(file, attachment.kind.upload_kind(), estimator, uploaded)
                            .await?
                    }
                    AttachmentSource::Remote(url) => url.clone(),
                };
                Some((url, attachment.kind.as_str().to_string()))
            }
            AttachmentSlot::Removing(_) | AttachmentSlot::Empty => None,
        };

        let payload = item_payload(
            draft,
            kind,
            mode,
            content_url,
            attachment,
            &self.layout,
        );
        debug!(content_type = %payload.content_type, "Persisting item");

        let call = async {
            match draft.edit_target() {
                Some(id) => store.update_item(id, &payload).await,
                None => store.create_item(&payload).await,
            }
        };
        self.drive(estimator, call).await
    }

    #[instrument(skip(self, file, estimator, uploaded), fields(name = %file.name()))]
    async fn upload(
        &self,
        file: &LocalFile,
        kind: UploadKind,
        estimator: &mut dyn ProgressEstimator,
        uploaded: &mut Vec<RemoteRef>,
    ) -> FolioResult<String> {
        let reference = self
            .drive(estimator, self.uploader.upload(file, kind))
            .await?;
        debug!(url = %reference.url(), "Upload complete");
        let url = reference.url().clone();
        uploaded.push(reference);
        Ok(url)
    }

    /// Await a pending step, ticking the estimator until it resolves.
    async fn drive<F, T>(&self, estimator: &mut dyn ProgressEstimator, step: F) -> T
    where
        F: Future<Output = T>,
    {
        tokio::pin!(step);
        let mut ticker = tokio::time::interval(self.progress_config.tick_interval());
        ticker.tick().await;
        loop {
            tokio::select! {
                biased;
                out = &mut step => return out,
                _ = ticker.tick() => self.publish(estimator, Progress::Tick),
            }
        }
    }

    async fn finish(
        &self,
        result: FolioResult<EntityDescriptor>,
        estimator: &mut dyn ProgressEstimator,
        uploaded: Vec<RemoteRef>,
    ) -> FolioResult<SubmitOutcome> {
        match result {
            Ok(descriptor) => {
                self.publish(estimator, Progress::Complete);
                debug!(id = %descriptor.id(), "Submission complete");
                Ok(SubmitOutcome::Completed(descriptor))
            }
            Err(e) => {
                error!(error = %e, uploaded = uploaded.len(), "Submission failed");
                if self.discard_orphans {
                    self.discard(&uploaded).await;
                }
                self.publish(estimator, Progress::Start);
                Err(e)
            }
        }
    }

    async fn discard(&self, uploaded: &[RemoteRef]) {
        for reference in uploaded {
            match self.uploader.discard(reference).await {
                Ok(()) => debug!(url = %reference.url(), "Discarded orphaned upload"),
                Err(e) => warn!(url = %reference.url(), error = %e, "Failed to discard orphaned upload"),
            }
        }
    }

    fn publish(&self, estimator: &mut dyn ProgressEstimator, event: Progress) {
        let value = match event {
            Progress::Start => {
                estimator.start();
                estimator.current()
            }
            Progress::Tick => estimator.tick(),
            Progress::Complete => estimator.complete(),
        };
        self.progress.send_replace(value);
    }
}

#[derive(Debug, Clone, Copy)]
enum Progress {
    Start,
    Tick,
    Complete,
}

/// Check the draft carries its primary content and return its concrete kind.
///
/// # Errors
///
/// `EmptyText` for a blank text post, `MissingFile` for any other kind with
/// neither a fresh file nor an existing URL of the same kind.
pub fn check_submittable(draft: &Draft) -> FolioResult<ResolvedKind> {
    match draft.resolved_kind() {
        Some(ResolvedKind::Text) if draft.text_body().trim().is_empty() => {
            Err(IncompleteError::new(IncompleteErrorKind::EmptyText).into())
        }
        Some(kind) => Ok(kind),
        None => Err(IncompleteError::new(IncompleteErrorKind::MissingFile).into()),
    }
}

/// Build the create/update body for `draft`.
///
/// `attachment` is the remote URL and wire type of the attachment, if any.
pub fn item_payload(
    draft: &Draft,
    kind: ResolvedKind,
    mode: SubmitMode,
    content_url: Option<String>,
    attachment: Option<(String, String)>,
    layout: &LayoutConfig,
) -> ItemPayload {
    let is_text = kind == ResolvedKind::Text;
    let (attachment_url, attachment_type) = attachment.unzip();
    ItemPayload {
        content_type: kind.as_str().to_string(),
        content_url: if is_text { None } else { content_url },
        text_content: is_text.then(|| draft.text_body().trim().to_string()),
        title: non_blank(draft.title()),
        description: if is_text { None } else { non_blank(draft.caption()) },
        aspect_ratio: if is_text {
            layout.text_aspect_ratio.clone()
        } else {
            layout.media_aspect_ratio.clone()
        },
        is_draft: mode.is_draft(),
        attachment_url,
        attachment_type,
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

//! Tests for the item composer state machine.

use folio_composer::{
    Collaborators, Composer, ComposerConfig, InMemoryEntityStore, InMemoryPreviewBackend,
    InMemoryProjectStore, InMemoryUploader, Key, ModalHooks, ModalState, SubmitOutcome,
    TextField,
};
use folio_core::{
    AttachmentKind, AttachmentSlot, EntityId, ExistingItemBuilder, LocalFile, ResolvedKind,
    SelectedKind, SubmitMode,
};
use folio_error::{ComposerErrorKind, FolioError, FolioErrorKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const MB: u64 = 1024 * 1024;

#[derive(Default)]
struct ScrollLock {
    entered: AtomicUsize,
    exited: AtomicUsize,
}

impl ModalHooks for ScrollLock {
    fn on_enter(&self) {
        self.entered.fetch_add(1, Ordering::SeqCst);
    }

    fn on_exit(&self) {
        self.exited.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    uploader: InMemoryUploader,
    entities: InMemoryEntityStore,
    previews: InMemoryPreviewBackend,
    scroll_lock: Arc<ScrollLock>,
    composer: Composer,
}

fn harness_with(uploader: InMemoryUploader) -> Harness {
    let entities = InMemoryEntityStore::new();
    let previews = InMemoryPreviewBackend::new();
    let scroll_lock = Arc::new(ScrollLock::default());
    let collaborators = Collaborators {
        uploader: Arc::new(uploader.clone()),
        entities: Arc::new(entities.clone()),
        projects: Arc::new(InMemoryProjectStore::new()),
        previews: Arc::new(previews.clone()),
        hooks: scroll_lock.clone(),
    };
    let composer = Composer::new(ComposerConfig::default(), &collaborators);
    Harness {
        uploader,
        entities,
        previews,
        scroll_lock,
        composer,
    }
}

fn harness() -> Harness {
    harness_with(InMemoryUploader::new())
}

fn open(composer: &mut Composer, kind: SelectedKind) {
    assert!(composer.open_new(kind));
    assert!(composer.finish_opening());
}

fn jpeg(size: u64) -> LocalFile {
    LocalFile::new("sunset.jpg", "image/jpeg", size)
}

fn pdf() -> LocalFile {
    LocalFile::new("notes.pdf", "application/pdf", MB)
}

fn mp3() -> LocalFile {
    LocalFile::new("take.mp3", "audio/mpeg", MB)
}

fn composer_kind(err: &FolioError) -> Option<&ComposerErrorKind> {
    match err.kind() {
        FolioErrorKind::Composer(e) => Some(&e.kind),
        _ => None,
    }
}

#[test]
fn test_oversized_video_is_rejected_without_side_effects() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);

    let err = h
        .composer
        .select_primary_file(LocalFile::new("long.mp4", "video/mp4", 600 * MB))
        .unwrap_err();

    assert!(matches!(err.kind(), FolioErrorKind::Validation(_)));
    assert!(h.composer.preview().is_none());
    assert!(h.composer.draft().primary_file().is_none());
    assert_eq!(h.previews.created_count(), 0);
}

#[tokio::test]
async fn test_rejected_file_makes_no_network_call() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);
    let _ = h
        .composer
        .select_primary_file(LocalFile::new("long.mp4", "video/mp4", 600 * MB));

    assert!(h.composer.submit(SubmitMode::Publish).await.is_err());
    assert_eq!(h.uploader.upload_count().await, 0);
    assert!(h.entities.calls().await.is_empty());
}

#[test]
fn test_replacing_file_keeps_one_live_handle() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);

    for _ in 0..5 {
        h.composer.select_primary_file(jpeg(MB)).unwrap();
        assert_eq!(h.previews.live_count(), 1);
    }
    assert_eq!(h.previews.created_count(), 5);
    assert_eq!(
        h.composer.select_primary_file(LocalFile::new("clip.mp4", "video/mp4", MB)).unwrap(),
        ResolvedKind::Video
    );
    assert_eq!(h.previews.live_count(), 1);
}

#[test]
fn test_close_releases_handle_and_balances_hooks() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);
    h.composer.select_primary_file(jpeg(MB)).unwrap();
    assert_eq!(h.scroll_lock.entered.load(Ordering::SeqCst), 1);

    h.composer.close().unwrap();
    assert_eq!(h.composer.state(), ModalState::Closing);
    assert_eq!(h.previews.live_count(), 0);
    assert!(h.composer.draft().primary_file().is_none());
    assert_eq!(h.scroll_lock.exited.load(Ordering::SeqCst), 0);

    assert!(h.composer.finish_closing());
    assert_eq!(h.composer.state(), ModalState::Closed);
    assert_eq!(h.scroll_lock.exited.load(Ordering::SeqCst), 1);
}

#[test]
fn test_drop_releases_handle() {
    let previews;
    {
        let mut h = harness();
        open(&mut h.composer, SelectedKind::Media);
        h.composer.select_primary_file(jpeg(MB)).unwrap();
        previews = h.previews.clone();
        assert_eq!(previews.live_count(), 1);
    }
    assert_eq!(previews.live_count(), 0);
}

#[test]
fn test_input_refused_when_closed() {
    let mut h = harness();
    let err = h.composer.select_primary_file(jpeg(MB)).unwrap_err();
    assert_eq!(composer_kind(&err), Some(&ComposerErrorKind::NotOpen));

    h.composer.open_new(SelectedKind::Media);
    assert!(h.composer.select_primary_file(jpeg(MB)).is_err());
    h.composer.finish_opening();
    assert!(h.composer.select_primary_file(jpeg(MB)).is_ok());
}

#[test]
fn test_kind_switch_releases_file_and_incompatible_attachment() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);
    h.composer.select_primary_file(jpeg(MB)).unwrap();
    h.composer.select_attachment(AttachmentKind::Audio, mp3()).unwrap();

    h.composer.set_kind(SelectedKind::Pdf).unwrap();
    assert!(h.composer.draft().primary_file().is_none());
    assert_eq!(h.previews.live_count(), 0);
    assert_eq!(
        h.composer.draft().attachment().kind(),
        Some(AttachmentKind::Audio)
    );

    h.composer.set_kind(SelectedKind::Audio).unwrap();
    assert_eq!(h.composer.draft().attachment(), &AttachmentSlot::Empty);
}

#[test]
fn test_attachment_rules_at_selection() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Audio);

    let err = h
        .composer
        .select_attachment(AttachmentKind::Audio, mp3())
        .unwrap_err();
    assert!(matches!(
        composer_kind(&err),
        Some(ComposerErrorKind::AttachmentUnavailable(_))
    ));

    h.composer.select_attachment(AttachmentKind::Pdf, pdf()).unwrap();
    let err = h
        .composer
        .select_attachment(AttachmentKind::Pdf, pdf())
        .unwrap_err();
    assert_eq!(
        composer_kind(&err),
        Some(&ComposerErrorKind::AttachmentSlotOccupied)
    );
}

#[test]
fn test_occupied_slot_is_enforced_for_media() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);
    h.composer.select_attachment(AttachmentKind::Audio, mp3()).unwrap();

    let err = h
        .composer
        .select_attachment(AttachmentKind::Pdf, pdf())
        .unwrap_err();
    assert_eq!(
        composer_kind(&err),
        Some(&ComposerErrorKind::AttachmentSlotOccupied)
    );
    let offers = h.composer.attachment_offers();
    assert_eq!(offers.len(), 2);
    assert!(offers.iter().all(|offer| !offer.enabled));

    h.composer.drag_start(300);
    h.composer.drag_move(200);
    h.composer.drag_end();
    h.composer.tap_delete().unwrap();
    h.composer.finish_attachment_removal();
    assert!(h.composer.attachment_offers().iter().all(|offer| offer.enabled));
}

#[test]
fn test_invalid_attachment_file_is_rejected() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Text);
    let err = h
        .composer
        .select_attachment(AttachmentKind::Pdf, jpeg(MB))
        .unwrap_err();
    assert_eq!(err.user_message(), "Please select a PDF file");
    assert_eq!(h.composer.draft().attachment(), &AttachmentSlot::Empty);
}

#[test]
fn test_swipe_to_delete_attachment() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);
    h.composer.select_attachment(AttachmentKind::Pdf, pdf()).unwrap();

    let err = h.composer.tap_delete().unwrap_err();
    assert_eq!(composer_kind(&err), Some(&ComposerErrorKind::DeleteNotRevealed));

    h.composer.drag_start(300);
    assert_eq!(h.composer.drag_move(250), 50);
    assert_eq!(h.composer.drag_end(), 70);

    h.composer.tap_delete().unwrap();
    assert_eq!(h.composer.reveal_offset(), 0);
    assert!(h.composer.draft().attachment().is_removing());

    let removed = h.composer.finish_attachment_removal().unwrap();
    assert_eq!(removed.kind, AttachmentKind::Pdf);
    assert_eq!(h.composer.draft().attachment(), &AttachmentSlot::Empty);
}

#[test]
fn test_tap_outside_dismisses_reveal() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);
    h.composer.select_attachment(AttachmentKind::Pdf, pdf()).unwrap();

    h.composer.drag_start(300);
    h.composer.drag_move(200);
    h.composer.drag_end();
    h.composer.tap_outside();
    assert_eq!(h.composer.reveal_offset(), 0);
}

#[test]
fn test_gestures_ignored_without_attachment() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);
    h.composer.drag_start(300);
    assert_eq!(h.composer.drag_move(200), 0);
    assert_eq!(h.composer.drag_end(), 0);
}

#[test]
fn test_text_affordance_through_composer() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Text);

    h.composer.set_text_body("- ").unwrap();
    let caret = h
        .composer
        .handle_key(TextField::TextBody, 2, 2, Key::Tab)
        .unwrap();
    assert_eq!(caret, Some(2));
    assert_eq!(h.composer.draft().text_body(), "• ");

    h.composer.set_text_body("• item").unwrap();
    let caret = h
        .composer
        .handle_key(TextField::TextBody, 6, 6, Key::Enter)
        .unwrap();
    assert_eq!(caret, Some(9));
    assert_eq!(h.composer.draft().text_body(), "• item\n• ");

    let err = h
        .composer
        .handle_key(TextField::Caption, 0, 0, Key::Tab)
        .unwrap_err();
    assert!(matches!(
        composer_kind(&err),
        Some(ComposerErrorKind::WrongKind(_))
    ));
}

#[test]
fn test_fields_are_bounded() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);
    h.composer.set_caption(&"x".repeat(400)).unwrap();
    h.composer.set_title(&"y".repeat(400)).unwrap();
    assert_eq!(h.composer.draft().caption().chars().count(), 170);
    assert_eq!(h.composer.draft().title().chars().count(), 100);
    assert!(h.composer.set_text_body("nope").is_err());
}

#[test]
fn test_playback_toggle() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Audio);

    let err = h.composer.toggle_playback().unwrap_err();
    assert_eq!(composer_kind(&err), Some(&ComposerErrorKind::NoPlayablePreview));

    h.composer.select_primary_file(mp3()).unwrap();
    assert!(h.composer.toggle_playback().unwrap());
    assert!(h.composer.is_playing());
    assert!(!h.composer.toggle_playback().unwrap());

    h.composer.toggle_playback().unwrap();
    h.composer.clear_primary_file().unwrap();
    assert!(!h.composer.is_playing());
}

#[tokio::test]
async fn test_publish_photo_end_to_end() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Media);
    h.composer.select_primary_file(jpeg(2 * MB)).unwrap();
    h.composer.set_caption("Golden hour").unwrap();

    let outcome = h.composer.submit(SubmitMode::Publish).await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Completed(_)));
    assert_eq!(h.uploader.upload_count().await, 1);
    let created = h.entities.created().await;
    assert_eq!(created.len(), 1);
    assert!(!created[0].is_draft);
    assert_eq!(created[0].description.as_deref(), Some("Golden hour"));

    assert_eq!(h.composer.state(), ModalState::Closing);
    assert!(h.composer.preview().is_none());
    assert_eq!(h.previews.live_count(), 0);
}

#[tokio::test]
async fn test_save_text_draft_with_pdf_end_to_end() {
    let mut h = harness();
    open(&mut h.composer, SelectedKind::Text);
    h.composer.set_text_body("hello").unwrap();
    h.composer.select_attachment(AttachmentKind::Pdf, pdf()).unwrap();

    h.composer.submit(SubmitMode::SaveDraft).await.unwrap();

    let uploads = h.uploader.uploads().await;
    assert_eq!(uploads.len(), 1);
    let created = h.entities.created().await;
    assert_eq!(created[0].content_url, None);
    assert_eq!(created[0].text_content.as_deref(), Some("hello"));
    assert!(created[0].is_draft);
    assert_eq!(created[0].attachment_type.as_deref(), Some("pdf"));
}

#[tokio::test]
async fn test_edit_end_to_end() {
    let mut h = harness();
    let item = ExistingItemBuilder::default()
        .id(EntityId("item-9".to_string()))
        .kind(ResolvedKind::Photo)
        .content_url(Some("https://cdn.example/u/9/p.jpg".to_string()))
        .build()
        .unwrap();
    assert!(h.composer.open_edit(&item));
    h.composer.finish_opening();
    h.composer.set_caption("retitled").unwrap();

    h.composer.submit(SubmitMode::Publish).await.unwrap();

    assert_eq!(h.uploader.upload_count().await, 0);
    assert!(h.entities.created().await.is_empty());
    let updated = h.entities.updated().await;
    assert_eq!(updated[0].0, EntityId("item-9".to_string()));
    assert_eq!(updated[0].1.description.as_deref(), Some("retitled"));
}

#[tokio::test]
async fn test_edit_resubmits_bounded_text() {
    let mut h = harness();
    let item = ExistingItemBuilder::default()
        .id(EntityId("item-12".to_string()))
        .kind(ResolvedKind::Text)
        .text_content(Some("w".repeat(400)))
        .build()
        .unwrap();
    assert!(h.composer.open_edit(&item));
    h.composer.finish_opening();
    assert_eq!(h.composer.draft().text_body().chars().count(), 170);

    h.composer.submit(SubmitMode::Publish).await.unwrap();

    let updated = h.entities.updated().await;
    let sent = updated[0].1.text_content.as_deref().unwrap_or_default();
    assert_eq!(sent.chars().count(), 170);
}

#[tokio::test]
async fn test_failure_preserves_draft() {
    let mut h = harness();
    h.entities.fail_with("Server error").await;
    open(&mut h.composer, SelectedKind::Media);
    h.composer.select_primary_file(jpeg(MB)).unwrap();

    let err = h.composer.submit(SubmitMode::Publish).await.unwrap_err();

    assert_eq!(err.user_message(), "Server error");
    assert_eq!(h.composer.state(), ModalState::Open);
    assert!(h.composer.draft().primary_file().is_some());
    assert!(h.composer.preview().is_some());
}

#[tokio::test]
async fn test_submit_requires_open_modal() {
    let mut h = harness();
    let err = h.composer.submit(SubmitMode::Publish).await.unwrap_err();
    assert_eq!(composer_kind(&err), Some(&ComposerErrorKind::NotOpen));
}

#[tokio::test(start_paused = true)]
async fn test_inputs_refused_while_submitting() {
    let mut h = harness_with(InMemoryUploader::with_latency(Duration::from_secs(1)));
    open(&mut h.composer, SelectedKind::Media);
    h.composer.select_primary_file(jpeg(MB)).unwrap();
    h.composer.select_attachment(AttachmentKind::Pdf, pdf()).unwrap();

    let coordinator = h.composer.coordinator();
    let draft = h.composer.draft().clone();
    let entities = h.entities.clone();
    let pending = tokio::spawn(async move {
        coordinator
            .submit(&draft, SubmitMode::Publish, &entities)
            .await
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(h.composer.is_submitting());

    let err = h.composer.select_primary_file(jpeg(MB)).unwrap_err();
    assert_eq!(composer_kind(&err), Some(&ComposerErrorKind::Submitting));
    let err = h.composer.close().unwrap_err();
    assert_eq!(composer_kind(&err), Some(&ComposerErrorKind::Submitting));
    assert!(h.composer.set_kind(SelectedKind::Text).is_err());

    let err = h.composer.set_caption("late edit").unwrap_err();
    assert_eq!(composer_kind(&err), Some(&ComposerErrorKind::Submitting));
    let err = h
        .composer
        .handle_key(TextField::Caption, 0, 0, Key::Tab)
        .unwrap_err();
    assert_eq!(composer_kind(&err), Some(&ComposerErrorKind::Submitting));
    let err = h.composer.tap_delete().unwrap_err();
    assert_eq!(composer_kind(&err), Some(&ComposerErrorKind::Submitting));

    h.composer.drag_start(300);
    assert_eq!(h.composer.drag_move(200), 0);

    let outcome = pending.await.unwrap().unwrap();
    assert!(matches!(outcome, SubmitOutcome::Completed(_)));
    assert!(!h.composer.is_submitting());
    assert!(h.composer.close().is_ok());
}

//! Tests for the facade crate.

use folio::{
    Collaborators, Composer, ComposerConfig, InMemoryEntityStore, InMemoryPreviewBackend,
    InMemoryProjectStore, InMemoryUploader, LocalFile, NoopHooks, SelectedKind, SubmitMode,
    SubmitOutcome, init_console_telemetry,
};
use std::sync::Arc;

#[test]
fn test_telemetry_initializes_once() {
    assert!(init_console_telemetry().is_ok());
    assert!(init_console_telemetry().is_err());
}

#[tokio::test]
async fn test_reexports_compose_a_submission() {
    let entities = InMemoryEntityStore::new();
    let collaborators = Collaborators {
        uploader: Arc::new(InMemoryUploader::new()),
        entities: Arc::new(entities.clone()),
        projects: Arc::new(InMemoryProjectStore::new()),
        previews: Arc::new(InMemoryPreviewBackend::new()),
        hooks: Arc::new(NoopHooks),
    };
    let mut composer = Composer::new(ComposerConfig::default(), &collaborators);
    composer.open_new(SelectedKind::Pdf);
    composer.finish_opening();
    composer
        .select_primary_file(LocalFile::new("cv.pdf", "application/pdf", 4096))
        .unwrap();

    let outcome = composer.submit(SubmitMode::Publish).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Completed(_)));
    assert_eq!(entities.created().await[0].content_type, "pdf");
}

//! In-memory collaborators for tests and demos.
//!
//! Every implementation records the calls it receives and can be told to fail,
//! so submission sequences can be asserted without a network. All data is lost
//! when the value is dropped.

use crate::{ContentUploader, EntityStore, PreviewBackend, ProjectStore};
use async_trait::async_trait;
use folio_core::{
    EntityDescriptor, EntityId, ItemPayload, LocalFile, ProjectPayload, RemoteRef, UploadKind,
};
use folio_error::{FolioError, FolioResult, TransportError};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// One recorded upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    /// Name of the uploaded file
    pub file_name: String,
    /// Declared kind
    pub kind: UploadKind,
    /// Reference handed back
    pub reference: RemoteRef,
}

/// Uploader that keeps references in memory.
///
/// # Example
/// ```
/// use folio_composer::{ContentUploader, InMemoryUploader};
/// use folio_core::{LocalFile, UploadKind};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let uploader = InMemoryUploader::new();
/// let file = LocalFile::new("cover.jpg", "image/jpeg", 1024);
/// let reference = uploader.upload(&file, UploadKind::Photo).await?;
/// assert!(reference.url().ends_with("cover.jpg"));
/// assert_eq!(uploader.upload_count().await, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryUploader {
    uploads: Arc<RwLock<Vec<UploadCall>>>,
    discarded: Arc<RwLock<Vec<RemoteRef>>>,
    failures: Arc<RwLock<HashMap<UploadKind, String>>>,
    discard_failure: Arc<RwLock<Option<String>>>,
    latency: Option<Duration>,
}

impl InMemoryUploader {
    /// Create an uploader that succeeds immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an uploader that waits `latency` before answering.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Fail every upload declared as `kind` with `message`.
    pub async fn fail_with(&self, kind: UploadKind, message: impl Into<String>) {
        self.failures.write().await.insert(kind, message.into());
    }

    /// Fail every discard with `message`.
    pub async fn fail_discards(&self, message: impl Into<String>) {
        *self.discard_failure.write().await = Some(message.into());
    }

    /// Remove all injected failures.
    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
        *self.discard_failure.write().await = None;
    }

    /// Successful uploads, in order.
    pub async fn uploads(&self) -> Vec<UploadCall> {
        self.uploads.read().await.clone()
    }

    /// Number of successful uploads.
    pub async fn upload_count(&self) -> usize {
        self.uploads.read().await.len()
    }

    /// References discarded after a failed submission.
    pub async fn discarded(&self) -> Vec<RemoteRef> {
        self.discarded.read().await.clone()
    }
}

#[async_trait]
impl ContentUploader for InMemoryUploader {
    async fn upload(&self, file: &LocalFile, kind: UploadKind) -> FolioResult<RemoteRef> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(message) = self.failures.read().await.get(&kind) {
            return Err(FolioError::from(TransportError::new(message.clone())));
        }

        let reference = RemoteRef::new(
            format!("memory://uploads/{}/{}/{}", kind, Uuid::new_v4(), file.name()),
            kind,
        );
        debug!(url = %reference.url(), "InMemoryUploader: stored file");
        self.uploads.write().await.push(UploadCall {
            file_name: file.name().clone(),
            kind,
            reference: reference.clone(),
        });
        Ok(reference)
    }

    async fn discard(&self, reference: &RemoteRef) -> FolioResult<()> {
        if let Some(message) = self.discard_failure.read().await.as_ref() {
            return Err(FolioError::from(TransportError::new(message.clone())));
        }
        self.discarded.write().await.push(reference.clone());
        Ok(())
    }
}

/// One recorded create or update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall<P> {
    /// Create with the given payload
    Create(P),
    /// Update of the given entity
    Update(EntityId, P),
}

impl<P> StoreCall<P> {
    /// Payload sent with the call.
    pub fn payload(&self) -> &P {
        match self {
            StoreCall::Create(payload) | StoreCall::Update(_, payload) => payload,
        }
    }
}

#[derive(Debug)]
struct Recorder<P> {
    prefix: &'static str,
    calls: Arc<RwLock<Vec<StoreCall<P>>>>,
    next_id: Arc<RwLock<u64>>,
    failure: Arc<RwLock<Option<String>>>,
}

impl<P> Clone for Recorder<P> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix,
            calls: Arc::clone(&self.calls),
            next_id: Arc::clone(&self.next_id),
            failure: Arc::clone(&self.failure),
        }
    }
}

impl<P: Clone> Recorder<P> {
    fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            calls: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(RwLock::new(1)),
            failure: Arc::new(RwLock::new(None)),
        }
    }

    async fn check_failure(&self) -> FolioResult<()> {
        match self.failure.read().await.as_ref() {
            Some(message) => Err(FolioError::from(TransportError::new(message.clone()))),
            None => Ok(()),
        }
    }

    async fn create(&self, payload: &P, is_draft: bool) -> FolioResult<EntityDescriptor> {
        self.check_failure().await?;
        let mut next_id = self.next_id.write().await;
        let id = EntityId(format!("{}-{}", self.prefix, *next_id));
        *next_id += 1;
        drop(next_id);

        self.calls.write().await.push(StoreCall::Create(payload.clone()));
        debug!(%id, "In-memory store: created");
        Ok(EntityDescriptor::new(id, is_draft))
    }

    async fn update(
        &self,
        id: &EntityId,
        payload: &P,
        is_draft: bool,
    ) -> FolioResult<EntityDescriptor> {
        self.check_failure().await?;
        self.calls
            .write()
            .await
            .push(StoreCall::Update(id.clone(), payload.clone()));
        debug!(%id, "In-memory store: updated");
        Ok(EntityDescriptor::new(id.clone(), is_draft))
    }
}

/// Item store that keeps payloads in memory.
#[derive(Debug, Clone)]
pub struct InMemoryEntityStore {
    recorder: Recorder<ItemPayload>,
}

impl InMemoryEntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            recorder: Recorder::new("item"),
        }
    }

    /// Fail every call with `message`.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.recorder.failure.write().await = Some(message.into());
    }

    /// Remove the injected failure.
    pub async fn clear_failure(&self) {
        *self.recorder.failure.write().await = None;
    }

    /// Successful calls, in order.
    pub async fn calls(&self) -> Vec<StoreCall<ItemPayload>> {
        self.recorder.calls.read().await.clone()
    }

    /// Payloads of successful create calls.
    pub async fn created(&self) -> Vec<ItemPayload> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Create(payload) => Some(payload),
                StoreCall::Update(..) => None,
            })
            .collect()
    }

    /// Successful update calls.
    pub async fn updated(&self) -> Vec<(EntityId, ItemPayload)> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Update(id, payload) => Some((id, payload)),
                StoreCall::Create(_) => None,
            })
            .collect()
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn create_item(&self, payload: &ItemPayload) -> FolioResult<EntityDescriptor> {
        self.recorder.create(payload, payload.is_draft).await
    }

    async fn update_item(
        &self,
        id: &EntityId,
        payload: &ItemPayload,
    ) -> FolioResult<EntityDescriptor> {
        self.recorder.update(id, payload, payload.is_draft).await
    }
}

/// Project store that keeps payloads in memory.
#[derive(Debug, Clone)]
pub struct InMemoryProjectStore {
    recorder: Recorder<ProjectPayload>,
}

impl InMemoryProjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            recorder: Recorder::new("project"),
        }
    }

    /// Fail every call with `message`.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.recorder.failure.write().await = Some(message.into());
    }

    /// Successful calls, in order.
    pub async fn calls(&self) -> Vec<StoreCall<ProjectPayload>> {
        self.recorder.calls.read().await.clone()
    }
}

impl Default for InMemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn create_project(&self, payload: &ProjectPayload) -> FolioResult<EntityDescriptor> {
        self.recorder.create(payload, payload.is_draft).await
    }

    async fn update_project(
        &self,
        id: &EntityId,
        payload: &ProjectPayload,
    ) -> FolioResult<EntityDescriptor> {
        self.recorder.update(id, payload, payload.is_draft).await
    }
}

#[derive(Debug, Default)]
struct PreviewLedger {
    live: HashSet<String>,
    created: usize,
    revoked: usize,
}

/// Preview backend that hands out `blob:` sources and tracks which are live.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreviewBackend {
    ledger: Arc<Mutex<PreviewLedger>>,
}

impl InMemoryPreviewBackend {
    /// Create a backend with no live sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.ledger().live.len()
    }

    /// Total sources created.
    pub fn created_count(&self) -> usize {
        self.ledger().created
    }

    /// Total sources revoked.
    pub fn revoked_count(&self) -> usize {
        self.ledger().revoked
    }

    fn ledger(&self) -> std::sync::MutexGuard<'_, PreviewLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreviewBackend for InMemoryPreviewBackend {
    fn create(&self, file: &LocalFile) -> String {
        let source = format!("blob:folio/{}", Uuid::new_v4());
        let mut ledger = self.ledger();
        ledger.live.insert(source.clone());
        ledger.created += 1;
        debug!(%source, name = %file.name(), "Preview source created");
        source
    }

    fn revoke(&self, source: &str) {
        let mut ledger = self.ledger();
        if ledger.live.remove(source) {
            ledger.revoked += 1;
        }
    }
}

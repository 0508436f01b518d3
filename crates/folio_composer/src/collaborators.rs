//! Capabilities the composer consumes from its host.
//!
//! Transport, retries and timeouts live behind these traits; the composer only
//! sees a request/response primitive that yields a value or a [`FolioError`].
//!
//! [`FolioError`]: folio_error::FolioError

use async_trait::async_trait;
use folio_core::{
    EntityDescriptor, EntityId, ItemPayload, LocalFile, ProjectPayload, RemoteRef, UploadKind,
};
use folio_error::FolioResult;

/// Stores binary files and returns their remote reference.
#[async_trait]
pub trait ContentUploader: Send + Sync {
    /// Upload `file`, declaring its kind.
    ///
    /// # Errors
    ///
    /// Returns a transport error whose message is shown to the user verbatim.
    async fn upload(&self, file: &LocalFile, kind: UploadKind) -> FolioResult<RemoteRef>;

    /// Delete a file uploaded by a submission that did not complete.
    ///
    /// The default does nothing, leaving cleanup to the storage side.
    async fn discard(&self, reference: &RemoteRef) -> FolioResult<()> {
        let _ = reference;
        Ok(())
    }
}

/// Creates and updates portfolio items.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Persist a new item.
    async fn create_item(&self, payload: &ItemPayload) -> FolioResult<EntityDescriptor>;

    /// Update an existing item.
    ///
    /// `payload` is the complete new state of the item, not a patch. A `None`
    /// field clears the stored value: in particular `attachment_url: None` on an
    /// item that had an attachment means the user removed it. Implementations
    /// must send these fields as explicit nulls (as [`ItemPayload`] serializes
    /// them) and the backend must apply them, not skip them.
    async fn update_item(
        &self,
        id: &EntityId,
        payload: &ItemPayload,
    ) -> FolioResult<EntityDescriptor>;
}

/// Creates and updates projects.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persist a new project.
    async fn create_project(&self, payload: &ProjectPayload) -> FolioResult<EntityDescriptor>;

    /// Update an existing project.
    async fn update_project(
        &self,
        id: &EntityId,
        payload: &ProjectPayload,
    ) -> FolioResult<EntityDescriptor>;
}

//! Local preview handles for selected files.
//!
//! A [`PreviewHandle`] is a revocable reference to a renderable representation of a
//! local file (an object URL in a browser host). [`PreviewManager`] owns at most one
//! handle at a time: acquiring for a new file releases the outstanding handle first,
//! and dropping the manager releases whatever is left. Handles are neither `Clone`
//! nor constructible outside this module, so a handle cannot outlive its release.

use folio_core::LocalFile;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Host capability that creates and revokes preview sources.
pub trait PreviewBackend: Send + Sync {
    /// Create a renderable source for `file`.
    fn create(&self, file: &LocalFile) -> String;

    /// Revoke a source previously returned by [`PreviewBackend::create`].
    fn revoke(&self, source: &str);
}

/// An outstanding preview source.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    id: Uuid,
    source: String,
    file_name: String,
}

impl PreviewHandle {
    /// Unique id of this handle.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Renderable source, e.g. `blob:...`.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the file the handle previews.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Owner of the single outstanding preview handle.
pub struct PreviewManager {
    backend: Arc<dyn PreviewBackend>,
    current: Option<PreviewHandle>,
}

impl std::fmt::Debug for PreviewManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewManager")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl PreviewManager {
    /// Create a manager over a host backend.
    pub fn new(backend: Arc<dyn PreviewBackend>) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    /// Acquire a handle for `file`, releasing any outstanding handle first.
    #[instrument(skip(self, file), fields(name = %file.name()))]
    pub fn acquire(&mut self, file: &LocalFile) -> &PreviewHandle {
        self.release();
        let handle = PreviewHandle {
            id: Uuid::new_v4(),
            source: self.backend.create(file),
            file_name: file.name().clone(),
        };
        debug!(handle = %handle.id, "Preview handle acquired");
        self.current.insert(handle)
    }

    /// Release the outstanding handle.
    ///
    /// Returns false when there was nothing to release.
    pub fn release(&mut self) -> bool {
        match self.current.take() {
            Some(handle) => {
                self.backend.revoke(&handle.source);
                debug!(handle = %handle.id, "Preview handle released");
                true
            }
            None => false,
        }
    }

    /// The outstanding handle, if any.
    pub fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }

    /// Whether a handle is outstanding.
    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }
}

impl Drop for PreviewManager {
    fn drop(&mut self) {
        self.release();
    }
}

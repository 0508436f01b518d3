//! Content composition and submission state machine for Folio.
//!
//! The [`Composer`] lets a user assemble one portfolio item (a photo or video, an
//! audio track, a PDF or a text note, optionally paired with an audio or PDF
//! attachment), validates and previews it locally, and submits it as a published
//! item or a draft. [`ProjectComposer`] is the smaller sibling for projects.
//!
//! # Components
//!
//! - [`PreviewManager`] - owns the single outstanding [`PreviewHandle`]
//! - [`Validator`] - per-kind MIME class and size rules
//! - [`can_offer`] / [`attachment_offers`] - the attachment compatibility matrix
//! - [`GestureInterpreter`] - swipe-to-reveal delete on the attachment row
//! - [`TextAffordance`] - dash-to-bullet, indentation and list continuation
//! - [`SubmissionCoordinator`] - ordered upload and persist steps with a
//!   simulated [`ProgressEstimator`]
//! - [`ModalLifecycle`] - open/close transitions with [`ModalHooks`]
//!
//! Collaborators ([`ContentUploader`], [`EntityStore`], [`ProjectStore`],
//! [`PreviewBackend`]) are traits; in-memory implementations are provided for tests
//! and demos.
//!
//! # Example
//!
//! ```
//! use folio_composer::{
//!     Collaborators, Composer, ComposerConfig, InMemoryEntityStore, InMemoryPreviewBackend,
//!     InMemoryProjectStore, InMemoryUploader, NoopHooks, SubmitOutcome,
//! };
//! use folio_core::{LocalFile, SelectedKind, SubmitMode};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let collaborators = Collaborators {
//!     uploader: Arc::new(InMemoryUploader::new()),
//!     entities: Arc::new(InMemoryEntityStore::new()),
//!     projects: Arc::new(InMemoryProjectStore::new()),
//!     previews: Arc::new(InMemoryPreviewBackend::new()),
//!     hooks: Arc::new(NoopHooks),
//! };
//! let mut composer = Composer::new(ComposerConfig::default(), &collaborators);
//!
//! composer.open_new(SelectedKind::Media);
//! composer.finish_opening();
//! composer.select_primary_file(LocalFile::new("sunset.jpg", "image/jpeg", 2 * 1024 * 1024))?;
//! composer.set_caption("Golden hour")?;
//!
//! let outcome = composer.submit(SubmitMode::Publish).await?;
//! assert!(matches!(outcome, SubmitOutcome::Completed(_)));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collaborators;
mod compatibility;
mod composer;
mod config;
mod gesture;
mod lifecycle;
mod memory;
mod preview;
mod progress;
mod project;
mod submission;
mod text_affordance;
mod validation;

pub use collaborators::{ContentUploader, EntityStore, ProjectStore};
pub use compatibility::{AttachmentOffer, attachment_offers, can_offer};
pub use composer::{Collaborators, Composer, TextField};
pub use config::{
    ComposerConfig, GestureConfig, LayoutConfig, LimitsConfig, ProgressConfig, SubmissionConfig,
    TextConfig,
};
pub use gesture::GestureInterpreter;
pub use lifecycle::{ModalHooks, ModalLifecycle, ModalState, NoopHooks};
pub use memory::{
    InMemoryEntityStore, InMemoryPreviewBackend, InMemoryProjectStore, InMemoryUploader,
    StoreCall, UploadCall,
};
pub use preview::{PreviewBackend, PreviewHandle, PreviewManager};
pub use progress::{ProgressEstimator, SimulatedProgress};
pub use project::ProjectComposer;
pub use submission::{SubmissionCoordinator, SubmitOutcome, check_submittable, item_payload};
pub use text_affordance::{Key, TextAffordance, TextEdit};
pub use validation::Validator;

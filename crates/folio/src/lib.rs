//! Folio - portfolio content composer
//!
//! Folio backs the "new item" and "new project" modals of a portfolio
//! application: it lets a user assemble one unit of content (a photo or video,
//! an audio track, a PDF or a text note, optionally paired with an audio or PDF
//! attachment), validates and previews it locally, and submits it as a published
//! item or a draft without any server round-trip before the final submission.
//!
//! # Quick Start
//!
//! ```
//! use folio::{
//!     Collaborators, Composer, ComposerConfig, InMemoryEntityStore, InMemoryPreviewBackend,
//!     InMemoryProjectStore, InMemoryUploader, LocalFile, NoopHooks, SelectedKind, SubmitMode,
//! };
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
//! let mut composer = Composer::new(ComposerConfig::load()?, &collaborators);
//!
//! composer.open_new(SelectedKind::Text);
//! composer.finish_opening();
//! composer.set_text_body("hello")?;
//! composer
//!     .select_attachment(folio::AttachmentKind::Pdf, LocalFile::new("notes.pdf", "application/pdf", 1024))?;
//! composer.submit(SubmitMode::SaveDraft).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `folio_error` - error types with user-facing messages
//! - `folio_core` - drafts, kinds, payloads and entity descriptors
//! - `folio_composer` - validation, previews, gestures, text affordances,
//!   submission and the composer state machines
//!
//! This crate (`folio`) re-exports everything for convenience and owns logging
//! initialization.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod telemetry;

pub use telemetry::{init_console_telemetry, init_json_telemetry};

pub use folio_composer::*;
pub use folio_core::*;
pub use folio_error::*;

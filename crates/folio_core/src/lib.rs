//! Data model for the Folio content composer.
//!
//! A [`Draft`] is the in-memory, unsaved representation of one portfolio item being
//! composed. It is created when the composer opens (empty, or pre-populated from an
//! [`ExistingItem`] in edit mode), mutated only through the composer, and turned into
//! an [`ItemPayload`] at submission time. [`ProjectDraft`] is the smaller sibling used
//! by the project composer.
//!
//! # Kinds
//!
//! Content kinds are split in two stages:
//!
//! - [`SelectedKind`] is what the user picked (`Media`, `Audio`, `Pdf`, `Text`)
//! - [`ResolvedKind`] is what the selected file turned out to be (`Photo`, `Video`, ...)
//!
//! so that compatibility and validation never have to special-case the `Media`
//! umbrella.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod draft;
mod existing;
mod file;
mod kind;
mod payload;
mod project;

pub use draft::{Attachment, AttachmentSlot, AttachmentSource, Draft, FieldBounds};
pub use existing::{ExistingItem, ExistingItemBuilder, ExistingProject, ExistingProjectBuilder};
pub use file::LocalFile;
pub use kind::{AttachmentKind, MimeClass, ResolvedKind, SelectedKind, UploadKind};
pub use payload::{
    EntityDescriptor, EntityId, ItemPayload, ItemPayloadBuilder, ProjectPayload,
    ProjectPayloadBuilder, RemoteRef, SubmitMode,
};
pub use project::ProjectDraft;

//! Error types for the Folio content composer.
//!
//! This crate provides the foundation error types used throughout the Folio workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Every error can be turned into a displayable message with
//! [`FolioError::user_message`], which drops the source location so the text can be
//! shown inline next to a field or in a dismissible notification.
//!
//! # Examples
//!
//! ```
//! use folio_error::{FolioResult, TransportError};
//!
//! fn upload() -> FolioResult<String> {
//!     Err(TransportError::new("Connection refused"))?
//! }
//!
//! match upload() {
//!     Ok(url) => println!("Uploaded: {}", url),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod composer;
mod config;
mod error;
mod incomplete;
mod transport;
mod validation;

pub use composer::{ComposerError, ComposerErrorKind};
pub use config::ConfigError;
pub use error::{FolioError, FolioErrorKind, FolioResult};
pub use incomplete::{IncompleteError, IncompleteErrorKind};
pub use transport::TransportError;
pub use validation::{ValidationError, ValidationErrorKind};

//! # coderr-core
//!
//! Structured errors with stack traces, messages and numeric codes, and the
//! machinery to classify them at an API or RPC boundary.
//!
//! ## Design
//!
//! - **Error chain**: [`Error`] is one node of a chain. Roots are plain
//!   messages or foreign errors; wrappers add a stack, a code, or a message.
//! - **Coder**: metadata for a code (HTTP status, user facing text, docs link).
//! - **Registry**: the table of coders, built once at startup and shared.
//! - **Resolution**: [`Registry::parse_coder`] classifies any error, falling
//!   back to the unknown coder.
//! - **Status bridge**: [`Registry::status`] turns a classified error into a
//!   wire [`Status`]; a decoded status converts back into an [`Error`].
//!
//! ## Usage
//!
//! ```rust
//! use coderr_core::{Coder, Error, Registry};
//!
//! let registry = Registry::new();
//! registry.register_unique(Coder::new(1001, 400, "bad id")).unwrap();
//!
//! let err = Error::new_with_code(1001, "id abc").with_message("loading user");
//! let coder = registry.parse_coder(&err).unwrap();
//! assert_eq!(coder.code(), 1001);
//! assert_eq!(coder.http_status(), 400);
//!
//! let status = registry.status(&err);
//! let received = status.into_error();
//! assert!(registry.is_code(&received, 1001));
//! ```
//!
//! ## Rendering
//!
//! - [`Registry::render_plain`]: user facing text.
//! - [`Registry::render_verbose`]: multi-line history with stack traces.
//! - [`Registry::render_compact`]: the same history on one line.
//!
//! `Display` and `Debug` on [`Error`] give the plain and verbose forms
//! without looking up coder messages.

mod catalog;
mod coder;
mod error;
mod ext;
mod kind;
mod macros;
mod registry;
mod render;
mod resolve;
mod stack;
mod status;

pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use coder::{BIND_CODE, Coder, UNKNOWN_CODE, VALIDATION_CODE};
pub use error::{Chain, CodeOptions, Error};
pub use ext::ResultExt;
pub use kind::ErrorKind;
pub use registry::{RegisterError, Registry, SUPPORTED_HTTP_STATUSES};
pub use stack::{Frame, MAX_DEPTH, Stack};
pub use status::{Status, StatusCode, StatusDetail, UnknownStatusCode};

/// Result type alias using coderr Error
pub type Result<T> = std::result::Result<T, Error>;

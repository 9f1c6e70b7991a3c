//! Node kinds of an error chain.

use strum_macros::{Display, IntoStaticStr};

/// The kind of a single node in an error chain.
///
/// Every `Error` is exactly one of these; the node it wraps (if any) is
/// reachable through `Error::cause`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
pub enum ErrorKind {
    /// Root failure carrying only a message.
    Plain,

    /// Root failure produced outside this crate (io errors, transport statuses, ...).
    Foreign,

    /// Diagnostic stack trace over an underlying failure.
    Stack,

    /// Classified failure: numeric code plus stack.
    Code,

    /// Human context layered on top of a cause.
    Message,
}

impl ErrorKind {
    /// Returns the kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

//! Classification metadata attached to error codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Code of the unknown sentinel.
pub const UNKNOWN_CODE: i32 = 1;

/// Code of the request binding coder.
pub const BIND_CODE: i32 = 2;

/// Code of the request validation coder.
pub const VALIDATION_CODE: i32 = 3;

const INTERNAL_SERVER_ERROR: u16 = 500;

/// Metadata describing one error code.
///
/// Serialized as `{"code", "http", "msg", "ref"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coder {
    code: i32,

    #[serde(default)]
    http: u16,

    #[serde(rename = "msg", default)]
    message: String,

    #[serde(rename = "ref", default)]
    reference: String,
}

impl Coder {
    pub fn new(code: i32, http: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            http,
            message: message.into(),
            reference: String::new(),
        }
    }

    /// Set the documentation reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Fallback for every error that cannot be classified.
    pub fn unknown() -> Self {
        Self::new(
            UNKNOWN_CODE,
            INTERNAL_SERVER_ERROR,
            "An internal server error occurred",
        )
    }

    /// Request parameters could not be bound.
    pub fn bind() -> Self {
        Self::new(
            BIND_CODE,
            400,
            "Error occurred while binding the request params to the struct",
        )
    }

    /// Request parameters failed validation.
    pub fn validation() -> Self {
        Self::new(VALIDATION_CODE, 400, "Request params validate failed")
    }

    /// The registry key.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// HTTP status for this code; 500 when none was chosen.
    pub fn http_status(&self) -> u16 {
        if self.http == 0 {
            return INTERNAL_SERVER_ERROR;
        }
        self.http
    }

    /// User facing text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Link to the documentation of this code.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn is_unknown(&self) -> bool {
        self.code == UNKNOWN_CODE
    }
}

impl fmt::Display for Coder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

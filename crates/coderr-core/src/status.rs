//! Transport status bridge.
//!
//! A classified error leaves the process as a [`Status`]: an RPC status code
//! derived from the coder's HTTP status, the coder's message, and one
//! [`StatusDetail`] carrying the registry code. On the receiving side the
//! decoded status is turned back into an [`Error`] so that resolution can
//! recover the sender's code.
//!
//! On the wire the status code is its numeric RPC value:
//! `{"code": 5, "message": "...", "details": [{"code": 1001, "http": 404, "ref": ""}]}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr, IntoStaticStr};

use crate::{Coder, Error, Registry};

/// A numeric status code outside the RPC status range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown rpc status code {0}")]
pub struct UnknownStatusCode(pub i32);

/// RPC status codes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    IntoStaticStr,
    FromRepr,
    Serialize,
    Deserialize,
)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum StatusCode {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl StatusCode {
    /// Map an HTTP status onto the RPC status space.
    pub fn from_http(http: u16) -> Self {
        match http {
            400 => StatusCode::InvalidArgument,
            401 => StatusCode::Unauthenticated,
            403 => StatusCode::PermissionDenied,
            404 => StatusCode::NotFound,
            409 => StatusCode::Aborted,
            412 => StatusCode::FailedPrecondition,
            429 => StatusCode::ResourceExhausted,
            499 => StatusCode::Cancelled,
            500 => StatusCode::Internal,
            501 => StatusCode::Unimplemented,
            503 => StatusCode::Unavailable,
            504 => StatusCode::DeadlineExceeded,
            200..=299 => StatusCode::Ok,
            _ => StatusCode::Unknown,
        }
    }

    /// The HTTP status conventionally used for this code.
    pub fn http_status(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Cancelled => 499,
            StatusCode::Unknown => 500,
            StatusCode::InvalidArgument => 400,
            StatusCode::DeadlineExceeded => 504,
            StatusCode::NotFound => 404,
            StatusCode::AlreadyExists => 409,
            StatusCode::PermissionDenied => 403,
            StatusCode::ResourceExhausted => 429,
            StatusCode::FailedPrecondition => 400,
            StatusCode::Aborted => 409,
            StatusCode::OutOfRange => 400,
            StatusCode::Unimplemented => 501,
            StatusCode::Internal => 500,
            StatusCode::Unavailable => 503,
            StatusCode::DataLoss => 500,
            StatusCode::Unauthenticated => 401,
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

impl From<StatusCode> for i32 {
    fn from(code: StatusCode) -> Self {
        code.as_i32()
    }
}

impl TryFrom<i32> for StatusCode {
    type Error = UnknownStatusCode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        StatusCode::from_repr(value).ok_or(UnknownStatusCode(value))
    }
}

/// Structured detail attached to a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDetail {
    pub code: i32,
    pub http: i32,
    #[serde(rename = "ref", default)]
    pub reference: String,
}

impl From<&Coder> for StatusDetail {
    fn from(coder: &Coder) -> Self {
        Self {
            code: coder.code(),
            http: i32::from(coder.http_status()),
            reference: coder.reference().to_string(),
        }
    }
}

/// Wire-level status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    code: StatusCode,
    message: String,
    #[serde(default)]
    details: Vec<StatusDetail>,
}

impl Status {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Status describing `coder`, with one detail entry.
    pub fn from_coder(coder: &Coder) -> Self {
        Self::new(StatusCode::from_http(coder.http_status()), coder.message())
            .with_detail(StatusDetail::from(coder))
    }

    pub fn with_detail(mut self, detail: StatusDetail) -> Self {
        self.details.push(detail);
        self
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &[StatusDetail] {
        &self.details
    }

    /// The first detail entry.
    pub fn detail(&self) -> Option<&StatusDetail> {
        self.details.first()
    }

    /// Turn a received status into an error chain root.
    pub fn into_error(self) -> Error {
        Error::from_std(self)
    }

    /// Encode for the wire.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a status received from the wire.
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rpc error: code = {} desc = {}", self.code, self.message)
    }
}

impl std::error::Error for Status {}

impl From<Status> for Error {
    fn from(status: Status) -> Self {
        status.into_error()
    }
}

impl Registry {
    /// Status for `err`, classified the same way as [`Registry::parse_coder`].
    pub fn status(&self, err: &Error) -> Status {
        Status::from_coder(&self.resolve(err))
    }

    /// Status for a known code. Cheaper than [`Registry::status`] when the
    /// code is already at hand.
    pub fn code_status(&self, code: i32) -> Status {
        Status::from_coder(&self.get_coder(code))
    }
}

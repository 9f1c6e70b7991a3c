//! Annotating errors while they propagate through `Result`s.
//!
//! `Ok` values pass through untouched, so these can be applied
//! unconditionally on the way out of a function:
//!
//! ```rust
//! use coderr_core::ResultExt;
//!
//! fn load(path: &str) -> coderr_core::Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_code(1003)
//!         .with_message(format!("loading {path}"))
//! }
//! ```

use crate::{Error, Result, Stack};

/// Extension trait adding chain annotations to any `Result` whose error
/// converts into [`Error`].
pub trait ResultExt<T> {
    /// See [`Error::with_stack`].
    fn with_stack(self) -> Result<T>;

    /// See [`Error::with_code`].
    fn with_code(self, code: i32) -> Result<T>;

    /// See [`Error::wrap_code`].
    fn wrap_code(self, code: i32, message: impl Into<String>) -> Result<T>;

    /// See [`Error::with_message`].
    fn with_message(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    #[inline(never)]
    fn with_stack(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Into::<Error>::into(err).restack(Stack::capture(1))),
        }
    }

    #[inline(never)]
    fn with_code(self, code: i32) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Into::<Error>::into(err).recode(code, Stack::capture(1))),
        }
    }

    #[inline(never)]
    fn wrap_code(self, code: i32, message: impl Into<String>) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => {
                let stack = Stack::capture(1);
                Err(Into::<Error>::into(err).recode_with_message(code, message.into(), stack))
            }
        }
    }

    fn with_message(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|err| Into::<Error>::into(err).with_message(message))
    }
}

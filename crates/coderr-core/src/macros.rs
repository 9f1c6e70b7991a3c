/// Construct a coded [`Error`](crate::Error) with a formatted message.
///
/// ```rust
/// use coderr_core::coded;
///
/// let id = "abc";
/// let err = coded!(1001, "id {id}");
/// assert_eq!(err.code(), Some(1001));
/// assert_eq!(err.to_string(), "id abc");
/// ```
#[macro_export]
macro_rules! coded {
    ($code:expr, $($arg:tt)+) => {
        $crate::Error::new_with_code($code, ::std::format!($($arg)+))
    };
}

/// Return early with a coded [`Error`](crate::Error).
///
/// ```rust
/// use coderr_core::{bail_code, Result};
///
/// fn find(id: u32) -> Result<()> {
///     if id == 0 {
///         bail_code!(1002, "user {id} not found");
///     }
///     Ok(())
/// }
///
/// assert_eq!(find(0).unwrap_err().code(), Some(1002));
/// ```
#[macro_export]
macro_rules! bail_code {
    ($code:expr, $($arg:tt)+) => {
        return ::std::result::Result::Err($crate::coded!($code, $($arg)+).into())
    };
}

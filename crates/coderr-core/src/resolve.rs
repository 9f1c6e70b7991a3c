//! Recovering a [`Coder`] from an arbitrary error.

use std::error::Error as StdError;
use std::sync::Arc;

use tracing::trace;

use crate::{Coder, Error, Registry, Status};

impl Registry {
    /// Classify `err`.
    ///
    /// Returns `None` only when there is no error. Otherwise the outermost
    /// code node decides; failing that, a transport status the error was
    /// decoded from; failing that, the unknown sentinel.
    pub fn parse_coder<'a>(&self, err: impl Into<Option<&'a Error>>) -> Option<Arc<Coder>> {
        err.into().map(|err| self.resolve(err))
    }

    /// True when `err` resolves to `code`.
    pub fn is_code<'a>(&self, err: impl Into<Option<&'a Error>>, code: i32) -> bool {
        self.parse_coder(err).is_some_and(|coder| coder.code() == code)
    }

    /// Classify any std error.
    ///
    /// Walks the `source()` chain until it meets an [`Error`] or a
    /// [`Status`] from this crate.
    pub fn parse_dyn(&self, err: &(dyn StdError + 'static)) -> Arc<Coder> {
        let mut current = Some(err);
        while let Some(err) = current {
            if let Some(err) = err.downcast_ref::<Error>() {
                return self.resolve(err);
            }
            if let Some(status) = err.downcast_ref::<Status>() {
                return self.coder_for_status(status);
            }
            current = err.source();
        }
        trace!("foreign error without classification, using unknown coder");
        self.unknown()
    }

    pub(crate) fn resolve(&self, err: &Error) -> Arc<Coder> {
        if let Some(code) = err.find_code() {
            return self.get_coder(code);
        }
        if let Some(status) = err.embedded_status() {
            return self.coder_for_status(status);
        }
        trace!(error = %err, "unclassified error, using unknown coder");
        self.unknown()
    }

    fn coder_for_status(&self, status: &Status) -> Arc<Coder> {
        match status.detail() {
            Some(detail) => self.get_coder(detail.code),
            None => self.unknown(),
        }
    }
}

//! Process-wide table of error codes.
//!
//! A `Registry` is built once at startup, filled by registration calls, and
//! shared (usually behind an `Arc`) with every component that resolves or
//! renders errors. Lookups take the read lock; registration takes the write
//! lock for the whole check-and-insert.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::Coder;

/// HTTP statuses accepted by [`Registry::register_http`].
pub const SUPPORTED_HTTP_STATUSES: [u16; 6] = [200, 400, 401, 403, 404, 500];

/// Registration misuse. These are wiring bugs; abort startup on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("code 0 is reserved and cannot be registered")]
    ReservedCode,

    #[error("code {code} is already registered")]
    Duplicate { code: i32 },

    #[error("code {code}: http status {http} is not one of 200, 400, 401, 403, 404, 500")]
    UnsupportedHttpStatus { code: i32, http: u16 },
}

/// Mapping from code to [`Coder`].
#[derive(Debug)]
pub struct Registry {
    codes: RwLock<HashMap<i32, Arc<Coder>>>,
    unknown: Arc<Coder>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a registry holding only the unknown sentinel.
    pub fn new() -> Self {
        let unknown = Arc::new(Coder::unknown());
        let mut codes = HashMap::new();
        codes.insert(unknown.code(), unknown.clone());
        Self {
            codes: RwLock::new(codes),
            unknown,
        }
    }

    /// Register `coder`, replacing any coder already registered for its code.
    pub fn register(&self, coder: Coder) -> Result<(), RegisterError> {
        let code = check_code(&coder)?;
        let previous = self.codes.write().insert(code, Arc::new(coder));
        if previous.is_some() {
            warn!(code, "error code re-registered, previous coder replaced");
        } else {
            debug!(code, "error code registered");
        }
        Ok(())
    }

    /// Register `coder`, failing if its code is already taken.
    pub fn register_unique(&self, coder: Coder) -> Result<(), RegisterError> {
        let code = check_code(&coder)?;
        let mut codes = self.codes.write();
        if codes.contains_key(&code) {
            return Err(RegisterError::Duplicate { code });
        }
        codes.insert(code, Arc::new(coder));
        debug!(code, "error code registered");
        Ok(())
    }

    /// Like [`Registry::register_unique`], also requiring the HTTP status to
    /// be one of [`SUPPORTED_HTTP_STATUSES`].
    pub fn register_http(&self, coder: Coder) -> Result<(), RegisterError> {
        let http = coder.http_status();
        if !SUPPORTED_HTTP_STATUSES.contains(&http) {
            return Err(RegisterError::UnsupportedHttpStatus {
                code: coder.code(),
                http,
            });
        }
        self.register_unique(coder)
    }

    /// The coder registered for `code`, or the unknown sentinel.
    pub fn get_coder(&self, code: i32) -> Arc<Coder> {
        self.codes
            .read()
            .get(&code)
            .cloned()
            .unwrap_or_else(|| self.unknown.clone())
    }

    /// The unknown sentinel.
    pub fn unknown(&self) -> Arc<Coder> {
        self.unknown.clone()
    }

    pub fn contains(&self, code: i32) -> bool {
        self.codes.read().contains_key(&code)
    }

    /// Number of registered codes, the sentinel included.
    pub fn len(&self) -> usize {
        self.codes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.read().is_empty()
    }

    /// Snapshot of every registered coder, sorted by code.
    pub fn coders(&self) -> Vec<Arc<Coder>> {
        let mut coders: Vec<_> = self.codes.read().values().cloned().collect();
        coders.sort_by_key(|coder| coder.code());
        coders
    }
}

fn check_code(coder: &Coder) -> Result<i32, RegisterError> {
    match coder.code() {
        0 => Err(RegisterError::ReservedCode),
        code => Ok(code),
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::UNKNOWN_CODE;

    #[test]
    fn test_new_has_unknown_only() {
        let registry = Registry::new();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(UNKNOWN_CODE));
        assert_eq!(*registry.get_coder(UNKNOWN_CODE), Coder::unknown());
    }

    #[test]
    fn test_register_rejects_zero() {
        let registry = Registry::new();
        assert_eq!(
            registry.register(Coder::new(0, 400, "zero")),
            Err(RegisterError::ReservedCode)
        );
        assert_eq!(
            registry.register_unique(Coder::new(0, 400, "zero")),
            Err(RegisterError::ReservedCode)
        );
        assert!(!registry.contains(0));
    }

    #[test]
    fn test_register_overwrites() {
        let registry = Registry::new();
        registry.register(Coder::new(1001, 400, "first")).unwrap();
        registry.register(Coder::new(1001, 404, "second")).unwrap();

        let coder = registry.get_coder(1001);
        assert_eq!(coder.message(), "second");
        assert_eq!(coder.http_status(), 404);
    }

    #[test]
    fn test_register_unique_rejects_duplicate() {
        let registry = Registry::new();
        registry.register_unique(Coder::new(1001, 400, "first")).unwrap();
        assert_eq!(
            registry.register_unique(Coder::new(1001, 400, "again")),
            Err(RegisterError::Duplicate { code: 1001 })
        );
        assert_eq!(registry.get_coder(1001).message(), "first");
    }

    #[test]
    fn test_register_unique_rejects_sentinel_code() {
        let registry = Registry::new();
        assert_eq!(
            registry.register_unique(Coder::new(UNKNOWN_CODE, 500, "mine")),
            Err(RegisterError::Duplicate { code: UNKNOWN_CODE })
        );
    }

    #[test]
    fn test_register_http_checks_status() {
        let registry = Registry::new();
        assert_eq!(
            registry.register_http(Coder::new(1001, 418, "teapot")),
            Err(RegisterError::UnsupportedHttpStatus {
                code: 1001,
                http: 418
            })
        );
        registry.register_http(Coder::new(1001, 0, "defaults to 500")).unwrap();
        registry.register_http(Coder::new(1002, 404, "missing")).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_get_coder_falls_back_to_unknown() {
        let registry = Registry::new();
        assert!(registry.get_coder(999_999).is_unknown());
        assert!(registry.get_coder(0).is_unknown());
    }

    #[test]
    fn test_coders_sorted() {
        let registry = Registry::new();
        registry.register(Coder::new(30, 400, "c")).unwrap();
        registry.register(Coder::new(10, 400, "a")).unwrap();
        let codes: Vec<_> = registry.coders().iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec![UNKNOWN_CODE, 10, 30]);
    }

    #[test]
    fn test_concurrent_register_unique_single_winner() {
        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                thread::spawn(move || {
                    registry
                        .register_unique(Coder::new(5000, 400, format!("writer {i}")))
                        .is_ok()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(winners, 1);
    }
}

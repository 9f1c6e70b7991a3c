//! Error codes declared in a TOML catalog.
//!
//! ```toml
//! [[codes]]
//! name = "ErrUserNotFound"
//! code = 110001
//! http = 404
//! message = "User not found"
//! reference = "https://example.com/errors#110001"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{Coder, RegisterError, Registry};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog")]
    Parse(#[from] toml::de::Error),

    #[error("cannot register {name}")]
    Register {
        name: String,
        #[source]
        source: RegisterError,
    },
}

/// One declared error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Identifier used in code and documentation.
    pub name: String,
    pub code: i32,
    #[serde(default)]
    pub http: u16,
    pub message: String,
    #[serde(default)]
    pub reference: String,
}

impl CatalogEntry {
    pub fn to_coder(&self) -> Coder {
        Coder::new(self.code, self.http, self.message.clone())
            .with_reference(self.reference.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    codes: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.codes
    }

    /// Entries sorted by code.
    pub fn sorted(&self) -> Vec<&CatalogEntry> {
        let mut entries: Vec<_> = self.codes.iter().collect();
        entries.sort_by_key(|entry| entry.code);
        entries
    }

    /// Register every entry with [`Registry::register_http`].
    ///
    /// Stops at the first rejected entry; entries before it stay registered.
    pub fn install(&self, registry: &Registry) -> Result<usize, CatalogError> {
        for entry in &self.codes {
            registry
                .register_http(entry.to_coder())
                .map_err(|source| CatalogError::Register {
                    name: entry.name.clone(),
                    source,
                })?;
        }
        info!(count = self.codes.len(), "error catalog installed");
        Ok(self.codes.len())
    }
}

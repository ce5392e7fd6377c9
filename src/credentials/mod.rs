//! API key storage.
//!
//! The current key lives in memory and is mirrored to a persistent
//! key-value backend on every change, under [`CREDENTIAL_KEY`].

pub mod store;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::constants::CREDENTIAL_KEY;

pub use store::{FileStore, MemoryStore};

/// Errors from a persistence backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read storage file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write storage file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A string key-value persistence backend.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// The API key held by a session, mirrored to a [`KeyValueStore`].
pub struct CredentialStore {
    backend: Box<dyn KeyValueStore>,
    current: Option<String>,
}

impl CredentialStore {
    /// Wrap a backend. Nothing is read until [`load`](Self::load).
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            current: None,
        }
    }

    /// Read the persisted key, if any, and make it current.
    ///
    /// An absent entry leaves the current key untouched.
    pub fn load(&mut self) -> Result<(), StoreError> {
        if let Some(value) = self.backend.get(CREDENTIAL_KEY)? {
            tracing::debug!("loaded stored API key");
            self.current = Some(value);
        }
        Ok(())
    }

    /// Replace the current key and persist it.
    ///
    /// The in-memory value is updated even when the write fails.
    pub fn set(&mut self, value: impl Into<String>) -> Result<(), StoreError> {
        let value = value.into();
        let result = self.backend.set(CREDENTIAL_KEY, &value);
        self.current = Some(value);
        result
    }

    /// Forget the key in memory and in the backend.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.current = None;
        self.backend.remove(CREDENTIAL_KEY)
    }

    /// The current key, if set and non-blank.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("current", &self.current.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Render a key for display: first three and last four characters.
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

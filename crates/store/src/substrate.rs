//! Persistence substrate abstraction.
//!
//! The store only needs get/set/remove of one opaque string blob under a
//! fixed key. Any key-value string store satisfies this; the file-backed
//! implementation below is the production default and the in-memory one
//! serves tests and dev.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Substrate-level failure (IO, capacity, backend-specific).
#[derive(Debug, Error)]
pub enum SubstrateError {
    #[error("substrate I/O failure")]
    Io(#[from] io::Error),

    #[error("substrate failure: {0}")]
    Backend(String),
}

/// Key-value persistence capability consumed by the store.
pub trait Substrate {
    /// Read the blob under `key`, `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, SubstrateError>;

    /// Write (create or replace) the blob under `key`.
    fn write(&mut self, key: &str, blob: &str) -> Result<(), SubstrateError>;

    /// Remove the blob under `key`; absent keys are a no-op.
    fn remove(&mut self, key: &str) -> Result<(), SubstrateError>;
}

/// In-memory substrate for tests and dev.
#[derive(Debug, Default)]
pub struct MemorySubstrate {
    inner: HashMap<String, String>,
}

impl MemorySubstrate {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Substrate for MemorySubstrate {
    fn read(&self, key: &str) -> Result<Option<String>, SubstrateError> {
        Ok(self.inner.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), SubstrateError> {
        self.inner.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SubstrateError> {
        self.inner.remove(key);
        Ok(())
    }
}

/// File-backed substrate: one `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileSubstrate {
    dir: PathBuf,
}

impl FileSubstrate {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Substrate rooted at the OS app data directory:
    /// `{app_data_dir}/billcraft`.
    pub fn in_app_data() -> Result<Self, SubstrateError> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .ok_or_else(|| {
                SubstrateError::Backend("failed to resolve OS app data directory".to_string())
            })?;

        let mut dir = base;
        dir.push("billcraft");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Substrate for FileSubstrate {
    fn read(&self, key: &str) -> Result<Option<String>, SubstrateError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), SubstrateError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), blob)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SubstrateError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

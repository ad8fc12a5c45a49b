//! # Persisted Storage
//!
//! String-keyed entries that outlive a run, the way a browser keeps
//! `localStorage` per profile.
//!
//! ## Notes
//! - Only one logical actor is expected to write at a time. Two processes
//!   pointed at the same directory overwrite each other's entries, last write
//!   wins.
//! - Keys are used as file stems, so they are expected to be plain words such
//!   as `cart`.
use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::error::ClientError;

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError>;
}

/// One `<key>.json` file per entry under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Persistence(e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        fs::create_dir_all(&self.dir).map_err(|e| ClientError::Persistence(e.to_string()))?;

        fs::write(self.path(key), value).map_err(|e| ClientError::Persistence(e.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

use super::backend::KvBackend;
use crate::error::{Result, WorkpadError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem-backed key-value store: one file per key under a root
/// directory.
pub struct FsKv {
    root: PathBuf,
}

impl FsKv {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(WorkpadError::Io)?;
        }
        Ok(())
    }
}

impl KvBackend for FsKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(path).map_err(WorkpadError::Io)?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.record_path(key);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(WorkpadError::Io)?;
        fs::rename(&tmp, target).map_err(WorkpadError::Io)?;

        Ok(())
    }
}

use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes rendered output below a base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Write `data` to `path` (relative to the base directory, or absolute),
    /// creating missing parent directories. Returns the full path written.
    pub fn write_file<P: AsRef<Path>>(&self, path: P, data: &[u8]) -> Result<PathBuf> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(full_path)
    }
}

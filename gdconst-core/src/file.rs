use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::FsError;

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the output directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk if its content changed
    fn sync(&self, base: &Path) -> Result<SyncResult, FsError> {
        sync(&self.path(base), &self.render())
    }
}

/// Result of a sync operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncResult {
    /// File was created or overwritten
    Written,
    /// File already held the rendered content
    Unchanged,
}

impl SyncResult {
    /// Whether the file on disk was touched.
    pub fn changed(self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Create `dir` and its parents. Succeeds if the directory already exists.
pub fn ensure_dir(dir: &Path) -> Result<(), FsError> {
    std::fs::create_dir_all(dir).map_err(|source| FsError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write `content` to `path` unless the file already holds exactly that content.
pub fn sync(path: &Path, content: &str) -> Result<SyncResult, FsError> {
    match std::fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => {
            tracing::debug!(path = %path.display(), "unchanged");
            return Ok(SyncResult::Unchanged);
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(FsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(path, content).map_err(|source| FsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "written");
    Ok(SyncResult::Written)
}

/// Delete `path` if it exists. Returns whether a file was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool, FsError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(FsError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

//! Filesystem-backed storage for the `/files/` endpoint.
//!
//! Every name is validated before it is joined onto the root, and the joined
//! path is canonicalized before use, so neither `..` nor a symlink can lead a
//! request outside the configured directory.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Chunk size used when streaming a file off disk.
const CHUNK_SIZE: usize = 1024;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
    #[error("{0:?} resolves outside the file directory")]
    OutsideRoot(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A directory that files are served from and uploaded into.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request name to a path under the root.
    ///
    /// Rejects empty names, absolute paths, `..`/`.` components, backslashes
    /// and NUL bytes. Nested names such as `a/b.txt` are allowed.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::store::FileStore;
    /// let store = FileStore::new("/srv/files");
    /// assert!(store.resolve("report.txt").is_ok());
    /// assert!(store.resolve("../etc/passwd").is_err());
    /// assert!(store.resolve("/etc/passwd").is_err());
    /// ```
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        let invalid = || StoreError::InvalidName(name.to_string());

        if name.is_empty() || name.contains('\\') || name.contains('\0') {
            return Err(invalid());
        }

        let relative = Path::new(name);
        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                _ => return Err(invalid()),
            }
        }
        // `components()` silently drops interior `.` segments
        if name.split('/').any(|seg| seg == "." || seg == "..") {
            return Err(invalid());
        }

        Ok(self.root.join(relative))
    }

    /// Canonicalizes `path` and checks it is still under the canonical root.
    ///
    /// A path that does not exist yet is checked through its parent. A
    /// dangling symlink is refused outright since creating through it would
    /// land wherever it points.
    async fn confine(&self, path: &Path) -> Result<PathBuf, StoreError> {
        let root = tokio::fs::canonicalize(&self.root).await?;

        let resolved = match tokio::fs::canonicalize(path).await {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if tokio::fs::symlink_metadata(path).await.is_ok() {
                    return Err(StoreError::OutsideRoot(path.to_path_buf()));
                }
                let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
                    return Err(StoreError::OutsideRoot(path.to_path_buf()));
                };
                tokio::fs::canonicalize(parent).await?.join(file_name)
            }
            Err(e) => return Err(e.into()),
        };

        if !resolved.starts_with(&root) {
            return Err(StoreError::OutsideRoot(path.to_path_buf()));
        }
        Ok(resolved)
    }

    /// Reads the whole file in fixed-size chunks until end-of-data.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.confine(&self.resolve(name)?).await?;
        let mut file = File::open(&path).await?;

        let mut data = Vec::new();
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            let n = file.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..n]);
        }

        tracing::debug!(path = %path.display(), bytes = data.len(), "Read file");
        Ok(data)
    }

    /// Creates or truncates the file, writes `contents` and syncs it to disk.
    ///
    /// Concurrent writers to the same name race; the last one to finish wins.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), StoreError> {
        let path = self.confine(&self.resolve(name)?).await?;
        let mut file = File::create(&path).await?;

        file.write_all(contents).await?;
        file.sync_all().await?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
        Ok(())
    }
}

//! Site directory source.
//!
//! Reads assets from a directory on disk with `tokio::fs`. A missing
//! file is reported as [`SourceError::NotFound`], the same way an HTTP
//! server would answer 404.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::{AssetSource, Result, normalize_asset_path};
use crate::error::SourceError;

/// Asset source rooted at a local site directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Site root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a site-relative path to a file under the root.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Forbidden`] if the path escapes the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let normalized = normalize_asset_path(path)?;
        Ok(self.root.join(normalized))
    }

    /// Reads an asset as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] when the file (or a directory in
    /// its place) does not exist, [`SourceError::Io`] otherwise.
    pub async fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path)?;
        trace!(path, file = %full.display(), "reading site asset");

        match tokio::fs::metadata(&full).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(SourceError::NotFound {
                    path: path.to_string(),
                });
            }
            Err(e) => return Err(io_error(path, e)),
        }

        tokio::fs::read(&full).await.map_err(|e| io_error(path, e))
    }
}

#[async_trait::async_trait]
impl AssetSource for DirSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        // Decoded lossily, as a browser or reqwest would.
        let bytes = self.read_bytes(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

fn io_error(path: &str, e: std::io::Error) -> SourceError {
    if e.kind() == ErrorKind::NotFound {
        SourceError::NotFound {
            path: path.to_string(),
        }
    } else {
        SourceError::Io {
            path: path.to_string(),
            source: e,
        }
    }
}

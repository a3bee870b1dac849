//! Asset source abstraction.
//!
//! Provides the [`AssetSource`] trait through which loaders fetch
//! manifests and the detail modal fetches descriptions. Paths are always
//! site-relative (`projects.json`, `image/alpha/description.txt`); each
//! implementation maps them onto its own backing store.

pub mod dir;
pub mod http;
pub mod memory;

pub use dir::DirSource;
pub use http::HttpSource;
pub use memory::MemorySource;

use serde::de::DeserializeOwned;

use crate::error::SourceError;

/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Async source of site assets.
///
/// Implementations must report an absent asset as
/// [`SourceError::NotFound`] or [`SourceError::Status`]; all other
/// variants are treated as a broken fetch.
#[async_trait::async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetches an asset as UTF-8 text.
    async fn fetch_text(&self, path: &str) -> Result<String>;

    /// Human-readable description of the backing store for logs.
    fn describe(&self) -> String;
}

/// Fetches an asset and decodes it as JSON.
///
/// # Errors
///
/// Returns the fetch error unchanged, or [`SourceError::Parse`] when the
/// body does not decode into `T`.
pub async fn fetch_json<T: DeserializeOwned>(source: &dyn AssetSource, path: &str) -> Result<T> {
    let body = source.fetch_text(path).await?;
    serde_json::from_str(&body).map_err(|e| SourceError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Normalizes a site-relative asset path.
///
/// Strips leading `/` and `./`, collapses empty segments, and rejects any
/// path that would climb out of the site root.
///
/// # Errors
///
/// Returns [`SourceError::Forbidden`] for `..` segments, backslashes, or
/// an empty result.
pub fn normalize_asset_path(path: &str) -> Result<String> {
    if path.contains('\\') {
        return Err(SourceError::Forbidden {
            path: path.to_string(),
        });
    }

    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(SourceError::Forbidden {
                    path: path.to_string(),
                });
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(SourceError::Forbidden {
            path: path.to_string(),
        });
    }
    Ok(segments.join("/"))
}

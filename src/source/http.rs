//! HTTP asset source.
//!
//! Fetches assets relative to a base URL with `reqwest`. Any non-2xx
//! answer becomes [`SourceError::Status`]; connection-level failures
//! become [`SourceError::Network`]. No timeout or retry is applied.

use reqwest::Url;
use tracing::debug;

use super::{AssetSource, Result, normalize_asset_path};
use crate::error::SourceError;

/// Asset source backed by a remote site.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    /// Creates a source for the site published at `base`.
    ///
    /// A trailing `/` is added when missing so that relative asset paths
    /// resolve under the base path rather than beside it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Parse`] if `base` is not an absolute URL.
    pub fn new(base: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base)
    }

    /// Creates a source that reuses an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Parse`] if `base` is not an absolute URL.
    pub fn with_client(client: reqwest::Client, base: &str) -> Result<Self> {
        let with_slash = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&with_slash).map_err(|e| SourceError::Parse {
            path: base.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { client, base })
    }

    /// Base URL assets are resolved against.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves a site-relative path to an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Forbidden`] for paths that escape the base,
    /// or [`SourceError::Parse`] if the joined URL is invalid.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let normalized = normalize_asset_path(path)?;
        self.base.join(&normalized).map_err(|e| SourceError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl AssetSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.url_for(path)?;
        debug!(%url, "fetching asset");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| SourceError::Network {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        format!("remote site {}", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_gets_trailing_slash() {
        let source = HttpSource::new("https://example.com/portfolio").unwrap();
        assert_eq!(source.base().as_str(), "https://example.com/portfolio/");
        assert_eq!(
            source.url_for("projects.json").unwrap().as_str(),
            "https://example.com/portfolio/projects.json"
        );
    }

    #[test]
    fn leading_slash_stays_under_base() {
        let source = HttpSource::new("https://example.com/portfolio/").unwrap();
        assert_eq!(
            source.url_for("/image/alpha/description.txt").unwrap().as_str(),
            "https://example.com/portfolio/image/alpha/description.txt"
        );
    }

    #[test]
    fn relative_base_is_rejected() {
        assert!(matches!(
            HttpSource::new("portfolio/"),
            Err(SourceError::Parse { .. })
        ));
    }

    #[test]
    fn traversal_is_rejected() {
        let source = HttpSource::new("https://example.com/portfolio/").unwrap();
        assert!(matches!(
            source.url_for("../admin"),
            Err(SourceError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        // Port 9 on localhost (discard) is closed in test environments.
        let source = HttpSource::new("http://127.0.0.1:9/").unwrap();
        let err = source.fetch_text("projects.json").await.unwrap_err();
        assert!(matches!(err, SourceError::Network { .. }));
        assert!(!err.is_missing());
    }
}

//! In-memory asset source.
//!
//! Holds a fixed set of assets, each optionally delayed or replaced by an
//! injected failure. Every fetch is recorded so callers can check which
//! assets were requested and in what order.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::{AssetSource, Result, normalize_asset_path};
use crate::error::SourceError;

#[derive(Debug, Clone)]
enum Outcome {
    Body(String),
    Status(u16),
    Network(String),
}

#[derive(Debug, Clone)]
struct Entry {
    outcome: Outcome,
    latency: Option<Duration>,
}

/// Asset source backed by a map of path → content.
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: HashMap<String, Entry>,
    // std::sync::Mutex: held only to push or clone, never across .await.
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    /// Creates an empty source; every fetch answers not-found.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset with the given body.
    #[must_use]
    pub fn with_asset(self, path: &str, body: impl Into<String>) -> Self {
        self.with_outcome(path, Outcome::Body(body.into()))
    }

    /// Makes `path` answer with a non-success HTTP status.
    #[must_use]
    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.with_outcome(path, Outcome::Status(status))
    }

    /// Makes `path` fail at the network level.
    #[must_use]
    pub fn with_network_error(self, path: &str, message: impl Into<String>) -> Self {
        self.with_outcome(path, Outcome::Network(message.into()))
    }

    /// Delays every fetch of `path` by `latency`.
    ///
    /// Applies to an asset registered before or after this call.
    #[must_use]
    pub fn with_latency(mut self, path: &str, latency: Duration) -> Self {
        let key = key(path);
        let entry = self.entries.entry(key).or_insert_with(|| Entry {
            outcome: Outcome::Status(404),
            latency: None,
        });
        entry.latency = Some(latency);
        self
    }

    /// Paths fetched so far, in request order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn with_outcome(mut self, path: &str, outcome: Outcome) -> Self {
        let key = key(path);
        let latency = self.entries.get(&key).and_then(|e| e.latency);
        self.entries.insert(key, Entry { outcome, latency });
        self
    }
}

#[async_trait::async_trait]
impl AssetSource for MemorySource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let normalized = normalize_asset_path(path)?;
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(normalized.clone());

        let Some(entry) = self.entries.get(&normalized) else {
            return Err(SourceError::NotFound {
                path: path.to_string(),
            });
        };

        if let Some(latency) = entry.latency {
            tokio::time::sleep(latency).await;
        }

        match &entry.outcome {
            Outcome::Body(body) => Ok(body.clone()),
            Outcome::Status(404) => Err(SourceError::NotFound {
                path: path.to_string(),
            }),
            Outcome::Status(status) => Err(SourceError::Status {
                path: path.to_string(),
                status: *status,
            }),
            Outcome::Network(message) => Err(SourceError::Network {
                path: path.to_string(),
                message: message.clone(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("memory ({} assets)", self.entries.len())
    }
}

fn key(path: &str) -> String {
    normalize_asset_path(path).unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_registered_assets() {
        let source = MemorySource::new().with_asset("/projects.json", "[]");
        assert_eq!(source.fetch_text("projects.json").await.unwrap(), "[]");
        assert_eq!(source.requests(), vec!["projects.json"]);
    }

    #[tokio::test]
    async fn unknown_asset_is_not_found() {
        let source = MemorySource::new();
        let err = source.fetch_text("croquis.json").await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn injected_failures_keep_their_kind() {
        let source = MemorySource::new()
            .with_status("a.json", 503)
            .with_network_error("b.json", "connection reset");
        assert!(matches!(
            source.fetch_text("a.json").await.unwrap_err(),
            SourceError::Status { status: 503, .. }
        ));
        assert!(matches!(
            source.fetch_text("b.json").await.unwrap_err(),
            SourceError::Network { .. }
        ));
    }

    #[tokio::test]
    async fn latency_survives_later_body() {
        let source = MemorySource::new()
            .with_latency("slow.json", Duration::from_millis(20))
            .with_asset("slow.json", "[1]");
        let started = tokio::time::Instant::now();
        assert_eq!(source.fetch_text("slow.json").await.unwrap(), "[1]");
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}

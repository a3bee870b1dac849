//! Detail modal for work items.
//!
//! Resolves an id through the [`Registry`], fetches the item's
//! description, and composes the modal body. A missing description and a
//! broken fetch produce different fallback messages; neither is an error
//! for the caller.

use tracing::{debug, warn};

use crate::config::{MessagesConfig, SiteConfig};
use crate::error::SourceError;
use crate::manifest::WorkItem;
use crate::registry::Registry;
use crate::source::AssetSource;
use crate::view::Node;
use crate::view::detail::detail_body;

/// Result of [`DetailModal::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// The body was composed and the modal shown.
    Shown,
    /// No registry entry has that id; the modal was left untouched.
    UnknownId,
}

/// Modal showing one work item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailModal {
    visible: bool,
    body: Vec<Node>,
    current: Option<String>,
}

impl DetailModal {
    /// Creates a hidden modal with an empty body.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visible: false,
            body: Vec::new(),
            current: None,
        }
    }

    /// Opens the modal for `id`.
    ///
    /// Unknown ids leave body and visibility as they were.
    pub async fn open(
        &mut self,
        id: &str,
        registry: &Registry,
        source: &dyn AssetSource,
        config: &SiteConfig,
    ) -> DetailOutcome {
        let Some(item) = registry.find(id) else {
            debug!(id, "detail requested for unknown id");
            return DetailOutcome::UnknownId;
        };

        self.body = compose(item, source, config).await;
        self.current = Some(item.id.clone());
        self.visible = true;
        DetailOutcome::Shown
    }

    /// Hides the modal. The body is kept until the next open.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Whether the modal is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current body content.
    #[must_use]
    pub fn body(&self) -> &[Node] {
        &self.body
    }

    /// Id of the item last shown.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

/// Fetches the description and builds the body for `item`.
pub async fn compose(item: &WorkItem, source: &dyn AssetSource, config: &SiteConfig) -> Vec<Node> {
    let description = describe(item, source, config).await;
    detail_body(item, &description, &config.assets)
}

async fn describe(item: &WorkItem, source: &dyn AssetSource, config: &SiteConfig) -> String {
    let path = item.description_path(&config.assets);
    match source.fetch_text(&path).await {
        Ok(text) => text,
        Err(e) => fallback_message(&e, &config.messages).to_string(),
    }
}

fn fallback_message<'a>(err: &SourceError, messages: &'a MessagesConfig) -> &'a str {
    if err.is_missing() {
        debug!(error = %err, "no description");
        &messages.description_unavailable
    } else {
        warn!(error = %err, "description fetch failed");
        &messages.description_error
    }
}

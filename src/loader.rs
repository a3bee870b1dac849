//! Collection loaders.
//!
//! Each loader fetches one manifest and turns it into grid cards. Loaders
//! never fail the page: the caller logs the error and leaves the grid
//! as it was.

use crate::config::SiteConfig;
use crate::error::SourceError;
use crate::manifest::{CollectionKind, WorkItem, parse_illustrations, parse_works};
use crate::source::AssetSource;
use crate::view::Node;
use crate::view::cards::{illustration_tile, work_card};

/// Parsed content of one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// Project or croquis records.
    Works(Vec<WorkItem>),
    /// Illustration URLs.
    Illustrations(Vec<String>),
}

impl Loaded {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Works(items) => items.len(),
            Self::Illustrations(urls) => urls.len(),
        }
    }

    /// Whether the manifest was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of one loader run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Collection that was loaded.
    pub kind: CollectionKind,
    /// Parsed manifest.
    pub loaded: Loaded,
    /// One card per manifest entry, in manifest order.
    pub cards: Vec<Node>,
}

/// Fetches and renders one collection.
///
/// # Errors
///
/// Returns the [`SourceError`] of the manifest fetch or decode.
pub async fn load_collection(
    source: &dyn AssetSource,
    config: &SiteConfig,
    kind: CollectionKind,
) -> Result<Batch, SourceError> {
    let path = config.manifest_path(kind);
    let body = source.fetch_text(path).await?;
    let parsed = if kind.holds_works() {
        parse_works(&body).map(Loaded::Works)
    } else {
        parse_illustrations(&body).map(Loaded::Illustrations)
    };
    let loaded = parsed.map_err(|e| SourceError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    let cards = render_cards(kind, &loaded, config);
    tracing::debug!(collection = %kind, entries = loaded.len(), "collection loaded");
    Ok(Batch {
        kind,
        loaded,
        cards,
    })
}

/// Renders the cards for a parsed manifest.
#[must_use]
pub fn render_cards(kind: CollectionKind, loaded: &Loaded, config: &SiteConfig) -> Vec<Node> {
    match loaded {
        Loaded::Works(items) => items
            .iter()
            .map(|item| work_card(item, kind, &config.assets, &config.messages))
            .collect(),
        Loaded::Illustrations(urls) => urls
            .iter()
            .enumerate()
            .map(|(index, url)| illustration_tile(url, index, &config.messages))
            .collect(),
    }
}

/// Summary of a page bootstrap, one line per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Collections that loaded, with their entry counts, in completion
    /// order.
    pub loaded: Vec<(CollectionKind, usize)>,
    /// Collections that failed, with the error message.
    pub failed: Vec<(CollectionKind, String)>,
}

impl LoadReport {
    /// Whether every loader succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total cards rendered.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.loaded.iter().map(|(_, n)| n).sum()
    }
}

//! Manifest records and asset path rules.
//!
//! `projects.json` and `croquis.json` hold arrays of [`WorkItem`];
//! `illustrations.json` holds a bare array of image URLs. Records are
//! parsed once and never mutated.
//!
//! Entries are decoded one at a time: an entry that cannot be used is
//! logged and skipped, the rest of the manifest still renders.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::AssetsConfig;

/// One portfolio entry (project or croquis sketchbook).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Identifier used to resolve a clicked card back to its record.
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    /// Display title.
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: String,
    /// Directory under the image root holding this item's assets.
    pub folder: String,
    /// Cover filename inside `folder`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Gallery filenames inside `folder`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// `YouTube` video id for the featured embed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
}

impl WorkItem {
    /// Path of the cover image, falling back to the configured default
    /// cover filename when the record has none.
    #[must_use]
    pub fn cover_path(&self, assets: &AssetsConfig) -> String {
        let cover = self.cover.as_deref().unwrap_or(&assets.default_cover);
        self.asset_path(assets, cover)
    }

    /// Path of a file inside this item's folder.
    #[must_use]
    pub fn asset_path(&self, assets: &AssetsConfig, file: &str) -> String {
        format!("{}/{}/{}", assets.image_root, self.folder, file)
    }

    /// Path of the plain-text description for this item.
    #[must_use]
    pub fn description_path(&self, assets: &AssetsConfig) -> String {
        self.asset_path(assets, &assets.description_file)
    }

    /// Full paths of the gallery images, empty when there are none.
    #[must_use]
    pub fn gallery_paths(&self, assets: &AssetsConfig) -> Vec<String> {
        self.images
            .iter()
            .flatten()
            .map(|img| self.asset_path(assets, img))
            .collect()
    }
}

/// The three manifest-backed collections a page can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionKind {
    /// `projects.json` rendered into `project-grid`.
    Projects,
    /// `illustrations.json` rendered into `illustrations-grid`.
    Illustrations,
    /// `croquis.json` rendered into `croquis-grid`.
    Croquis,
}

impl CollectionKind {
    /// All kinds, in page order.
    pub const ALL: [Self; 3] = [Self::Projects, Self::Illustrations, Self::Croquis];

    /// Element id of the grid container this collection renders into.
    #[must_use]
    pub const fn container_id(self) -> &'static str {
        match self {
            Self::Projects => "project-grid",
            Self::Illustrations => "illustrations-grid",
            Self::Croquis => "croquis-grid",
        }
    }

    /// Resolves a container element id back to its collection.
    #[must_use]
    pub fn from_container_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.container_id() == id)
    }

    /// Short lowercase label used in logs and card ids.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Projects => "project",
            Self::Illustrations => "illustration",
            Self::Croquis => "croquis",
        }
    }

    /// Whether this collection holds [`WorkItem`] records (and therefore
    /// feeds the registry).
    #[must_use]
    pub const fn holds_works(self) -> bool {
        !matches!(self, Self::Illustrations)
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts a string, number or boolean as text; `null` reads as empty.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {other}"
        ))),
    }
}

/// Parses a work-item manifest.
///
/// Entries without a usable `folder` or `id` are skipped with a warning.
///
/// # Errors
///
/// Returns the `serde_json` error when the body is not a JSON array.
pub fn parse_works(body: &str) -> Result<Vec<WorkItem>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(body)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, error = %e, "skipping unusable work item");
                None
            }
        })
        .collect())
}

/// Parses an illustration manifest (array of image URLs).
///
/// Entries that are not strings are skipped with a warning.
///
/// # Errors
///
/// Returns the `serde_json` error when the body is not a JSON array.
pub fn parse_illustrations(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(body)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            Value::String(url) => Some(url),
            other => {
                warn!(index, entry = %other, "skipping non-string illustration");
                None
            }
        })
        .collect())
}

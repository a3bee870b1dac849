//! Site configuration schema.
//!
//! Every section has defaults matching the conventional site layout
//! (`projects.json` next to the page, assets under `image/`), so an empty
//! or absent configuration file describes a standard portfolio.

use serde::{Deserialize, Serialize};

use crate::manifest::CollectionKind;

/// Root site configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page metadata.
    pub site: SiteMetadata,
    /// Manifest locations, relative to the site root.
    pub manifests: ManifestsConfig,
    /// Asset layout conventions.
    pub assets: AssetsConfig,
    /// Registry merge behaviour.
    pub registry: RegistryConfig,
    /// Page composition.
    pub page: PageConfig,
    /// User-facing strings.
    pub messages: MessagesConfig,
    /// Folder scan targets for `vitrine scan`.
    pub scan: ScanConfig,
}

impl SiteConfig {
    /// Collections whose grid the page carries, deduplicated, in
    /// configuration order. Unknown container names are skipped; the
    /// validator reports them.
    #[must_use]
    pub fn collections(&self) -> Vec<CollectionKind> {
        let mut kinds = Vec::new();
        for name in &self.page.containers {
            if let Some(kind) = CollectionKind::from_container_id(name) {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        kinds
    }

    /// Manifest path for a collection.
    #[must_use]
    pub fn manifest_path(&self, kind: CollectionKind) -> &str {
        match kind {
            CollectionKind::Projects => &self.manifests.projects,
            CollectionKind::Illustrations => &self.manifests.illustrations,
            CollectionKind::Croquis => &self.manifests.croquis,
        }
    }
}

/// Page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMetadata {
    /// Document title.
    pub title: String,
    /// Stylesheet linked from the rendered document.
    pub stylesheet: String,
    /// `lang` attribute of the rendered document.
    pub lang: String,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            stylesheet: "style.css".to_string(),
            lang: "fr".to_string(),
        }
    }
}

/// Manifest locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestsConfig {
    /// Project manifest.
    pub projects: String,
    /// Illustration manifest.
    pub illustrations: String,
    /// Croquis manifest.
    pub croquis: String,
}

impl Default for ManifestsConfig {
    fn default() -> Self {
        Self {
            projects: "projects.json".to_string(),
            illustrations: "illustrations.json".to_string(),
            croquis: "croquis.json".to_string(),
        }
    }
}

/// Asset layout conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Directory holding one folder per work item.
    pub image_root: String,
    /// Image shown when a cover fails to load.
    pub placeholder: String,
    /// Cover filename used when a work item names none.
    pub default_cover: String,
    /// Description filename inside a work item folder.
    pub description_file: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            image_root: "image".to_string(),
            placeholder: "image/placeholder.jpg".to_string(),
            default_cover: "cover.jpg".to_string(),
            description_file: "description.txt".to_string(),
        }
    }
}

/// How loader results feed the registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Projects then croquis, regardless of which loader finished first.
    #[default]
    Ordered,
    /// Applied as loaders complete: projects replace the registry,
    /// croquis append to it.
    Completion,
}

/// Registry settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Merge policy.
    pub merge: MergePolicy,
}

/// Page composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Grid container ids present on the page.
    pub containers: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            containers: CollectionKind::ALL
                .iter()
                .map(|kind| kind.container_id().to_string())
                .collect(),
        }
    }
}

/// User-facing strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessagesConfig {
    /// Shown when the description file is absent.
    pub description_unavailable: String,
    /// Shown when fetching the description failed.
    pub description_error: String,
    /// Call to action on project cards.
    pub project_cta: String,
    /// Call to action on croquis cards.
    pub croquis_cta: String,
    /// Alt text for illustration tiles.
    pub illustration_alt: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            description_unavailable: "Description non disponible.".to_string(),
            description_error: "Erreur lors du chargement de la description.".to_string(),
            project_cta: "Voir le projet".to_string(),
            croquis_cta: "Voir le carnet".to_string(),
            illustration_alt: "Illustration".to_string(),
        }
    }
}

/// A folder to index into a JSON manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanTarget {
    /// Folder to list, relative to the site root.
    pub folder: String,
    /// Manifest to write, relative to the site root.
    pub output: String,
}

/// Folder scan settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Folders to index.
    pub targets: Vec<ScanTarget>,
    /// Accepted file extensions (lowercase, with leading dot).
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                ScanTarget {
                    folder: "image/illustrations".to_string(),
                    output: "illustrations.json".to_string(),
                },
                ScanTarget {
                    folder: "image/portfolio".to_string(),
                    output: "portfolio.json".to_string(),
                },
            ],
            extensions: [".jpg", ".jpeg", ".png", ".gif", ".webp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: SiteConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.manifests.projects, "projects.json");
        assert_eq!(config.assets.placeholder, "image/placeholder.jpg");
        assert_eq!(config.registry.merge, MergePolicy::Ordered);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: SiteConfig = serde_yaml::from_str(
            "site:\n  title: Atelier\nregistry:\n  merge: completion\n",
        )
        .unwrap();
        assert_eq!(config.site.title, "Atelier");
        assert_eq!(config.site.stylesheet, "style.css");
        assert_eq!(config.registry.merge, MergePolicy::Completion);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<SiteConfig, _> = serde_yaml::from_str("sitee:\n  title: x\n");
        assert!(result.is_err());
    }

    #[test]
    fn collections_follow_container_order_and_dedupe() {
        let mut config = SiteConfig::default();
        config.page.containers = vec![
            "croquis-grid".into(),
            "project-grid".into(),
            "croquis-grid".into(),
            "mystery-grid".into(),
        ];
        assert_eq!(
            config.collections(),
            vec![CollectionKind::Croquis, CollectionKind::Projects]
        );
    }

    #[test]
    fn default_scan_targets_match_site_layout() {
        let scan = ScanConfig::default();
        assert_eq!(scan.targets.len(), 2);
        assert_eq!(scan.targets[0].folder, "image/illustrations");
        assert_eq!(scan.targets[0].output, "illustrations.json");
        assert!(scan.extensions.contains(&".webp".to_string()));
    }
}

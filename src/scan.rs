//! Image folder scanner.
//!
//! Lists the image files of a folder and writes them as a JSON manifest
//! of site-relative paths, ready to be served as `illustrations.json`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{info, warn};

use crate::config::{ScanConfig, ScanTarget};

/// What scanning one target did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The manifest was written.
    Written {
        /// Manifest path on disk.
        output: PathBuf,
        /// Number of images listed.
        count: usize,
    },
    /// The folder did not exist and was created; nothing was written.
    Created {
        /// Folder path on disk.
        folder: PathBuf,
    },
}

/// Scans one target under `root`.
///
/// # Errors
///
/// Returns an I/O error if the folder cannot be listed or created, or
/// the manifest cannot be written.
pub async fn scan_target(
    root: &Path,
    target: &ScanTarget,
    extensions: &[String],
) -> std::io::Result<ScanOutcome> {
    let folder = root.join(&target.folder);
    if !tokio::fs::try_exists(&folder).await? {
        warn!(folder = %folder.display(), "folder does not exist, creating it");
        tokio::fs::create_dir_all(&folder).await?;
        return Ok(ScanOutcome::Created { folder });
    }

    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(&folder).await?;
    while let Some(entry) = entries.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if has_image_extension(&name, extensions) {
            names.push(name);
        }
    }
    names.sort();

    let folder_prefix = target.folder.trim_end_matches('/');
    let paths: Vec<String> = names
        .iter()
        .map(|name| format!("{folder_prefix}/{name}"))
        .collect();

    let output = root.join(&target.output);
    tokio::fs::write(&output, to_indented_json(&paths)?).await?;
    info!(
        count = paths.len(),
        folder = %target.folder,
        output = %output.display(),
        "manifest written"
    );
    Ok(ScanOutcome::Written {
        output,
        count: paths.len(),
    })
}

/// Scans every configured target, in order.
///
/// # Errors
///
/// Stops at the first target that fails.
pub async fn scan_all(root: &Path, config: &ScanConfig) -> std::io::Result<Vec<ScanOutcome>> {
    let mut outcomes = Vec::with_capacity(config.targets.len());
    for target in &config.targets {
        outcomes.push(scan_target(root, target, &config.extensions).await?);
    }
    Ok(outcomes)
}

/// Whether `name` ends with one of `extensions`, ignoring case.
#[must_use]
pub fn has_image_extension(name: &str, extensions: &[String]) -> bool {
    let Some(dot) = name.rfind('.') else {
        return false;
    };
    // A leading dot alone is a hidden file, not an extension.
    if dot == 0 {
        return false;
    }
    let ext = name[dot..].to_ascii_lowercase();
    extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
}

fn to_indented_json(paths: &[String]) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    paths.serialize(&mut ser).map_err(std::io::Error::other)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        ScanConfig::default().extensions
    }

    fn target() -> ScanTarget {
        ScanTarget {
            folder: "image/illustrations".into(),
            output: "illustrations.json".into(),
        }
    }

    #[test]
    fn extension_match_ignores_case() {
        assert!(has_image_extension("A.JPG", &exts()));
        assert!(has_image_extension("b.webp", &exts()));
        assert!(!has_image_extension("notes.txt", &exts()));
        assert!(!has_image_extension("noext", &exts()));
        assert!(!has_image_extension(".png", &exts()));
    }

    #[tokio::test]
    async fn writes_sorted_indented_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("image/illustrations");
        std::fs::create_dir_all(&folder).unwrap();
        for name in ["b.png", "a.JPG", "readme.txt", "c.gif"] {
            std::fs::write(folder.join(name), b"x").unwrap();
        }

        let outcome = scan_target(dir.path(), &target(), &exts()).await.unwrap();
        assert_eq!(
            outcome,
            ScanOutcome::Written {
                output: dir.path().join("illustrations.json"),
                count: 3
            }
        );

        let written = std::fs::read_to_string(dir.path().join("illustrations.json")).unwrap();
        assert_eq!(
            written,
            "[\n    \"image/illustrations/a.JPG\",\n    \"image/illustrations/b.png\",\n    \"image/illustrations/c.gif\"\n]"
        );
    }

    #[tokio::test]
    async fn missing_folder_is_created_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = scan_target(dir.path(), &target(), &exts()).await.unwrap();
        assert!(matches!(outcome, ScanOutcome::Created { .. }));
        assert!(dir.path().join("image/illustrations").is_dir());
        assert!(!dir.path().join("illustrations.json").exists());
    }

    #[tokio::test]
    async fn empty_folder_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("image/illustrations")).unwrap();
        scan_target(dir.path(), &target(), &exts()).await.unwrap();
        let written = std::fs::read_to_string(dir.path().join("illustrations.json")).unwrap();
        assert_eq!(written, "[]");
    }

    #[tokio::test]
    async fn scan_all_visits_every_target() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = scan_all(dir.path(), &ScanConfig::default()).await.unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(dir.path().join("image/portfolio").is_dir());
    }
}

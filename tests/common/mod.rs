//! Shared integration-test harness: builds throwaway site directories and
//! runs the `vitrine` binary against them.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;

/// Projects manifest used by most fixtures.
pub const PROJECTS_JSON: &str = r#"[
    {"id": "p1", "title": "Alpha", "folder": "alpha", "images": ["one.jpg", "two.jpg"]},
    {"id": "p2", "title": "Beta", "folder": "beta", "cover": "front.png", "youtube_id": "abc123"}
]"#;

/// Croquis manifest used by most fixtures.
pub const CROQUIS_JSON: &str = r#"[
    {"id": "c1", "title": "Carnet", "folder": "carnet"}
]"#;

/// Illustrations manifest used by most fixtures.
pub const ILLUSTRATIONS_JSON: &str = r#"[
    "image/illustrations/a.jpg",
    "image/illustrations/b.jpg",
    "image/illustrations/c.jpg"
]"#;

/// A site directory on disk, removed on drop.
pub struct SiteFixture {
    dir: TempDir,
}

impl SiteFixture {
    /// Creates an empty site.
    #[allow(clippy::missing_panics_doc)]
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp site"),
        }
    }

    /// Creates a site with the three standard manifests and one
    /// description.
    pub fn standard() -> Self {
        Self::empty()
            .with_file("projects.json", PROJECTS_JSON)
            .with_file("croquis.json", CROQUIS_JSON)
            .with_file("illustrations.json", ILLUSTRATIONS_JSON)
            .with_file("image/beta/description.txt", "Deux lignes.\nFin.")
            .with_file("style.css", "body { margin: 0; }")
    }

    /// Writes a file relative to the site root, creating parent folders.
    #[allow(clippy::missing_panics_doc)]
    pub fn with_file(self, path: &str, contents: &str) -> Self {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("failed to create fixture folder");
        }
        std::fs::write(full, contents).expect("failed to write fixture file");
        self
    }

    /// Site root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Site root as a string argument.
    #[allow(clippy::missing_panics_doc)]
    pub fn arg(&self) -> &str {
        self.path().to_str().expect("non-UTF-8 temp path")
    }

    /// Absolute path of a file under the site.
    pub fn join(&self, path: &str) -> PathBuf {
        self.path().join(path)
    }
}

/// Path to the `vitrine` binary under test.
pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_vitrine")
}

/// Runs `vitrine` with `args` to completion.
#[allow(clippy::missing_panics_doc)]
pub fn run(args: &[&str]) -> Output {
    std::process::Command::new(bin())
        .args(args)
        .env_remove("VITRINE_SITE")
        .env_remove("VITRINE_CONFIG")
        .env_remove("VITRINE_LOG_LEVEL")
        .output()
        .expect("failed to run vitrine")
}

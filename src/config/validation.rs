//! Site configuration validation.
//!
//! Collects every issue instead of stopping at the first one, so a single
//! run reports all problems in a configuration file.

use crate::config::schema::SiteConfig;
use crate::error::{Severity, ValidationIssue};
use crate::manifest::CollectionKind;

/// Result of validating a configuration.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns the result.
    pub fn validate(&mut self, config: &SiteConfig) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.require_non_empty("manifests.projects", &config.manifests.projects);
        self.require_non_empty("manifests.illustrations", &config.manifests.illustrations);
        self.require_non_empty("manifests.croquis", &config.manifests.croquis);
        self.require_non_empty("assets.image_root", &config.assets.image_root);
        self.require_non_empty("assets.placeholder", &config.assets.placeholder);
        self.require_non_empty("assets.default_cover", &config.assets.default_cover);
        self.require_non_empty("assets.description_file", &config.assets.description_file);

        self.validate_containers(config);
        self.validate_scan(config);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_containers(&mut self, config: &SiteConfig) {
        if config.page.containers.is_empty() {
            self.warning("page.containers", "page has no grid containers");
        }

        let mut seen: Vec<&str> = Vec::new();
        for (i, name) in config.page.containers.iter().enumerate() {
            let path = format!("page.containers[{i}]");
            if CollectionKind::from_container_id(name).is_none() {
                let message = suggest_container(name).map_or_else(
                    || format!("unknown container '{name}'"),
                    |hint| format!("unknown container '{name}' (did you mean '{hint}'?)"),
                );
                self.error(&path, &message);
                continue;
            }
            if seen.contains(&name.as_str()) {
                self.warning(&path, &format!("duplicate container '{name}'"));
            } else {
                seen.push(name);
            }
        }
    }

    fn validate_scan(&mut self, config: &SiteConfig) {
        for (i, target) in config.scan.targets.iter().enumerate() {
            self.require_non_empty(&format!("scan.targets[{i}].folder"), &target.folder);
            self.require_non_empty(&format!("scan.targets[{i}].output"), &target.output);
        }
        for (i, ext) in config.scan.extensions.iter().enumerate() {
            if !ext.starts_with('.') {
                self.error(
                    &format!("scan.extensions[{i}]"),
                    &format!("extension '{ext}' must start with '.'"),
                );
            }
        }
    }

    fn require_non_empty(&mut self, path: &str, value: &str) {
        if value.trim().is_empty() {
            self.error(path, "value must not be empty");
        }
    }

    fn error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

/// Suggest a known container id for a misspelled one.
///
/// Returns the closest match if its Damerau-Levenshtein distance is ≤ 3.
#[must_use]
pub fn suggest_container(input: &str) -> Option<&'static str> {
    CollectionKind::ALL
        .iter()
        .map(|kind| kind.container_id())
        .map(|id| (id, strsim::damerau_levenshtein(input, id)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(id, _)| id)
}

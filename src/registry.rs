//! In-memory registry of work items.
//!
//! Resolves a clicked card's id back to its full record. Holds the
//! project and croquis collections; ids are expected to be unique across
//! both but this is not enforced, and lookups return the first match.

use crate::config::MergePolicy;
use crate::manifest::{CollectionKind, WorkItem};

/// Store of work items consulted by the detail modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    items: Vec<WorkItem>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds the registry deterministically: projects first, then
    /// croquis, whichever loader finished first.
    #[must_use]
    pub fn ordered(projects: Option<Vec<WorkItem>>, croquis: Option<Vec<WorkItem>>) -> Self {
        let mut items = projects.unwrap_or_default();
        items.extend(croquis.unwrap_or_default());
        Self { items }
    }

    /// Applies one loader's result as it completes.
    ///
    /// Projects replace whatever the registry holds; croquis are appended.
    /// When croquis complete before projects, the croquis entries are
    /// dropped by the later replacement.
    pub fn apply_completion(&mut self, kind: CollectionKind, items: Vec<WorkItem>) {
        match kind {
            CollectionKind::Projects => self.items = items,
            CollectionKind::Croquis => self.items.extend(items),
            CollectionKind::Illustrations => {}
        }
    }

    /// First item with the given id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&WorkItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items in registry order.
    #[must_use]
    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Collects loader results and produces the registry according to a
/// [`MergePolicy`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    policy: MergePolicy,
    registry: Registry,
    projects: Option<Vec<WorkItem>>,
    croquis: Option<Vec<WorkItem>>,
}

impl RegistryBuilder {
    /// Creates a builder for the given policy.
    #[must_use]
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Records a completed loader, in completion order.
    pub fn record(&mut self, kind: CollectionKind, items: Vec<WorkItem>) {
        match self.policy {
            MergePolicy::Completion => self.registry.apply_completion(kind, items),
            MergePolicy::Ordered => match kind {
                CollectionKind::Projects => self.projects = Some(items),
                CollectionKind::Croquis => self.croquis = Some(items),
                CollectionKind::Illustrations => {}
            },
        }
    }

    /// Produces the final registry.
    #[must_use]
    pub fn finish(self) -> Registry {
        match self.policy {
            MergePolicy::Completion => self.registry,
            MergePolicy::Ordered => Registry::ordered(self.projects, self.croquis),
        }
    }
}

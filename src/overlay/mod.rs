//! Overlay panels shown above the page.
//!
//! Three independent overlays: the detail modal for work items, the
//! illustration viewer with its cursor, and the single-image lightbox.
//! Each can be opened and dismissed on its own; the page decides what
//! opening one means for body scrolling.

pub mod detail;
pub mod lightbox;
pub mod viewer;

pub use detail::{DetailModal, DetailOutcome};
pub use lightbox::Lightbox;
pub use viewer::IllustrationViewer;

/// Identifies one of the three overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// Work item detail modal.
    Detail,
    /// Illustration viewer.
    Viewer,
    /// Single-image lightbox.
    Lightbox,
}

impl OverlayKind {
    /// All overlays, in document order.
    pub const ALL: [Self; 3] = [Self::Detail, Self::Viewer, Self::Lightbox];

    /// Element id of the overlay (its backdrop region).
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Detail => "projectModal",
            Self::Viewer => "imageModal",
            Self::Lightbox => "lightboxModal",
        }
    }

    /// Element id of the overlay's content slot.
    #[must_use]
    pub const fn content_id(self) -> &'static str {
        match self {
            Self::Detail => "modalBody",
            Self::Viewer => "fullImage",
            Self::Lightbox => "lightboxImage",
        }
    }

    /// Resolves an overlay from its element id.
    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.element_id() == id)
    }

    /// Whether opening this overlay suppresses background scrolling.
    #[must_use]
    pub const fn locks_scroll(self) -> bool {
        !matches!(self, Self::Lightbox)
    }

    /// CSS `display` value used while visible.
    #[must_use]
    pub const fn display(self) -> &'static str {
        match self {
            Self::Detail => "block",
            Self::Viewer | Self::Lightbox => "flex",
        }
    }
}

impl std::fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Background scrolling state of the page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyScroll {
    /// Page scrolls normally.
    #[default]
    Auto,
    /// Scrolling suppressed while an overlay is open.
    Hidden,
}

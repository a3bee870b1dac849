//! Single-image lightbox. No navigation.

/// Overlay showing one image at full size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    src: Option<String>,
    visible: bool,
}

impl Lightbox {
    /// Creates a hidden, empty lightbox.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            src: None,
            visible: false,
        }
    }

    /// Shows `src`, replacing whatever was shown before.
    pub fn open(&mut self, src: impl Into<String>) {
        self.src = Some(src.into());
        self.visible = true;
    }

    /// Hides the lightbox. The last image stays loaded.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Whether the lightbox is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Image currently loaded.
    #[must_use]
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }
}

//! Illustration viewer.
//!
//! Full-screen browsing over the illustration list with a single cursor.
//! The list is captured once, when the illustrations loader completes.

/// Cursor-based viewer over the illustration list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IllustrationViewer {
    images: Vec<String>,
    cursor: usize,
    visible: bool,
}

impl IllustrationViewer {
    /// Creates a hidden viewer over `images`.
    #[must_use]
    pub const fn new(images: Vec<String>) -> Self {
        Self {
            images,
            cursor: 0,
            visible: false,
        }
    }

    /// Captures the illustration list. The cursor is reset.
    pub fn set_images(&mut self, images: Vec<String>) {
        self.images = images;
        self.cursor = 0;
    }

    /// Illustration list.
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the viewer is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Image under the cursor, if the list is non-empty.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.cursor).map(String::as_str)
    }

    /// Shows the viewer at `index`.
    ///
    /// Returns `false` and leaves the viewer untouched when `index` is
    /// outside the list.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.cursor = index;
        self.visible = true;
        true
    }

    /// Moves the cursor by `step`, wrapping around both ends, and returns
    /// the new current image. No-op on an empty list.
    pub fn change_image(&mut self, step: isize) -> Option<&str> {
        let len = self.images.len();
        if len == 0 {
            return None;
        }
        self.cursor = wrap_index(self.cursor, step, len);
        self.current()
    }

    /// Hides the viewer. The cursor is kept.
    pub fn close(&mut self) {
        self.visible = false;
    }
}

/// `(cursor + step) mod len`, always in `0..len`. `len` must be non-zero.
#[allow(
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn wrap_index(cursor: usize, step: isize, len: usize) -> usize {
    let len_i = len as i128;
    let next = (cursor as i128 + step as i128).rem_euclid(len_i);
    next as usize
}

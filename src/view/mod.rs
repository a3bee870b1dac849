//! Structured view tree.
//!
//! Cards, overlays and the page document are built as [`Node`] trees from
//! typed records and only turned into markup by [`html::render`], which
//! escapes every text node and attribute value. Click behaviour is
//! attached as a typed [`Action`] rather than inline script, and rendered
//! as `data-action` attributes for the delegated client handler.

pub mod cards;
pub mod detail;
pub mod document;
pub mod html;

pub use html::{escape_attr, escape_text, render, render_nodes};

use crate::overlay::OverlayKind;

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "meta", "link", "br", "hr", "input", "source"];

/// A click behaviour attached to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the detail modal for a work item.
    OpenDetail {
        /// Work item id.
        id: String,
    },
    /// Open the illustration viewer at an index.
    OpenImage {
        /// Index into the illustration list.
        index: usize,
    },
    /// Move the illustration viewer cursor.
    ChangeImage {
        /// Signed step.
        step: isize,
    },
    /// Show a single image in the lightbox.
    OpenLightbox {
        /// Image URL.
        src: String,
    },
    /// Dismiss an overlay.
    Close(OverlayKind),
}

impl Action {
    /// `data-*` attributes that encode this action in markup.
    #[must_use]
    pub fn data_attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::OpenDetail { id } => vec![
                ("data-action", "open-detail".into()),
                ("data-id", id.clone()),
            ],
            Self::OpenImage { index } => vec![
                ("data-action", "open-image".into()),
                ("data-index", index.to_string()),
            ],
            Self::ChangeImage { step } => vec![
                ("data-action", "change-image".into()),
                ("data-step", step.to_string()),
            ],
            Self::OpenLightbox { src } => vec![
                ("data-action", "open-lightbox".into()),
                ("data-src", src.clone()),
            ],
            Self::Close(kind) => vec![
                ("data-action", "close".into()),
                ("data-overlay", kind.element_id().into()),
            ],
        }
    }
}

/// A node in the view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// Text content, escaped on render.
    Text(String),
    /// Trusted markup emitted verbatim (doctype, embedded client script).
    Raw(String),
}

impl Node {
    /// Creates a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the element if this node is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text of this node and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Self::Raw(_) => {}
        }
    }

    /// Visits every element in document order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Element)) {
        if let Self::Element(el) = self {
            f(el);
            for child in &el.children {
                child.walk(f);
            }
        }
    }

    /// Visits every element in document order, mutably.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        if let Self::Element(el) = self {
            f(el);
            for child in &mut el.children {
                child.walk_mut(f);
            }
        }
    }

    /// First descendant element (or self) with the given `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let mut found = None;
        self.walk(&mut |el| {
            if found.is_none() && el.attr_value("id") == Some(id) {
                found = Some(el);
            }
        });
        found
    }

    /// All descendant elements (including self) carrying an action.
    #[must_use]
    pub fn actions(&self) -> Vec<&Action> {
        let mut actions = Vec::new();
        self.walk(&mut |el| {
            if let Some(action) = el.action() {
                actions.push(action);
            }
        });
        actions
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// An HTML element under construction or in a built tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    action: Option<Action>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            action: None,
            children: Vec::new(),
        }
    }

    /// Sets the `id` attribute.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Sets the `class` attribute.
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Sets an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends a child node.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several child nodes.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Attaches a click action.
    #[must_use]
    pub fn on_click(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Marks this element as the backdrop region of an overlay: clicks
    /// landing on it (not on its content) dismiss the overlay.
    #[must_use]
    pub fn backdrop_of(self, kind: OverlayKind) -> Self {
        self.attr("data-backdrop", kind.element_id())
    }

    /// Tag name.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Attribute value, if set.
    #[must_use]
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(&'static str, String)] {
        &self.attrs
    }

    /// Sets an attribute in place.
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(n, _)| *n == name)?;
        Some(self.attrs.remove(pos).1)
    }

    /// Click action, if any.
    #[must_use]
    pub const fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Child nodes.
    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Replaces all children.
    pub fn set_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    /// Whether this is a void element.
    #[must_use]
    pub fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag)
    }

    /// Handles a load error on an `<img>` that declares a fallback: the
    /// source is swapped for the fallback and the fallback is consumed,
    /// so a second error (the fallback itself failing) changes nothing.
    ///
    /// Returns `true` if the source was replaced.
    pub fn apply_image_fallback(&mut self) -> bool {
        if self.tag != "img" {
            return false;
        }
        let Some(fallback) = self.remove_attr("data-fallback") else {
            return false;
        };
        self.set_attr("src", fallback);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_replaces_existing_attribute() {
        let el = Element::new("div").class("a").class("b");
        assert_eq!(el.attr_value("class"), Some("b"));
        assert_eq!(el.attributes().len(), 1);
    }

    #[test]
    fn text_content_spans_descendants() {
        let node: Node = Element::new("div")
            .child(Element::new("h3").text("Alpha"))
            .child(Element::new("p").text(" and more"))
            .into();
        assert_eq!(node.text_content(), "Alpha and more");
    }

    #[test]
    fn find_by_id_searches_depth_first() {
        let node: Node = Element::new("div")
            .child(Element::new("section").child(Element::new("p").id("deep").text("x")))
            .into();
        assert_eq!(node.find_by_id("deep").map(Element::tag), Some("p"));
        assert!(node.find_by_id("missing").is_none());
    }

    #[test]
    fn image_fallback_applies_once() {
        let mut img = Element::new("img")
            .attr("src", "image/alpha/cover.jpg")
            .attr("data-fallback", "image/placeholder.jpg");
        assert!(img.apply_image_fallback());
        assert_eq!(img.attr_value("src"), Some("image/placeholder.jpg"));
        assert!(!img.apply_image_fallback());
        assert_eq!(img.attr_value("src"), Some("image/placeholder.jpg"));
    }

    #[test]
    fn fallback_ignored_on_non_images() {
        let mut div = Element::new("div").attr("data-fallback", "x");
        assert!(!div.apply_image_fallback());
    }

    #[test]
    fn actions_encode_as_data_attributes() {
        let attrs = Action::OpenDetail { id: "p1".into() }.data_attributes();
        assert_eq!(
            attrs,
            vec![("data-action", "open-detail".into()), ("data-id", "p1".into())]
        );
        let attrs = Action::ChangeImage { step: -1 }.data_attributes();
        assert_eq!(attrs[1], ("data-step", "-1".into()));
        let attrs = Action::Close(OverlayKind::Lightbox).data_attributes();
        assert_eq!(attrs[1], ("data-overlay", "lightboxModal".into()));
    }
}

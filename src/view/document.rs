//! Full page document.
//!
//! Lays out the configured grids, the three overlays with their controls
//! and backdrop regions, optional pre-rendered detail templates, and the
//! delegated client script. Overlay visibility and body scrolling reflect
//! the headless page state at render time.

use indexmap::IndexMap;

use super::{Action, Element, Node, render};
use crate::config::SiteConfig;
use crate::manifest::CollectionKind;
use crate::overlay::{BodyScroll, DetailModal, IllustrationViewer, Lightbox, OverlayKind};

/// Client-side click and image-error handling.
pub const CLIENT_SCRIPT: &str = include_str!("client.js");

/// Prefix of the element id of an embedded detail template.
pub const TEMPLATE_ID_PREFIX: &str = "detail-";

/// Borrowed page state to render.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// Site configuration.
    pub config: &'a SiteConfig,
    /// Grid cards by collection, in page order.
    pub grids: &'a IndexMap<CollectionKind, Vec<Node>>,
    /// Detail modal.
    pub detail: &'a DetailModal,
    /// Illustration viewer.
    pub viewer: &'a IllustrationViewer,
    /// Lightbox.
    pub lightbox: &'a Lightbox,
    /// Body scroll state.
    pub scroll: BodyScroll,
    /// Pre-rendered detail bodies keyed by item id.
    pub templates: &'a [(String, Vec<Node>)],
}

/// Renders the document, doctype included.
#[must_use]
pub fn render_document(view: &PageView<'_>) -> String {
    format!("<!DOCTYPE html>\n{}\n", render(&build(view)))
}

/// Builds the `<html>` tree.
#[must_use]
pub fn build(view: &PageView<'_>) -> Node {
    let site = &view.config.site;

    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1.0"),
        )
        .child(Element::new("title").text(site.title.clone()))
        .child(
            Element::new("link")
                .attr("rel", "stylesheet")
                .attr("href", site.stylesheet.clone()),
        );

    let main = Element::new("main").children(
        view.grids
            .iter()
            .map(|(kind, cards)| grid_section(*kind, cards)),
    );

    let mut body = Element::new("body")
        .child(main)
        .child(detail_overlay(view.detail))
        .child(viewer_overlay(view.viewer))
        .child(lightbox_overlay(view.lightbox));

    if view.scroll == BodyScroll::Hidden {
        body = body.attr("style", "overflow: hidden;");
    }

    for (id, nodes) in view.templates {
        body = body.child(
            Element::new("template")
                .id(format!("{TEMPLATE_ID_PREFIX}{id}"))
                .children(nodes.iter().cloned()),
        );
    }

    body = body.child(Element::new("script").child(Node::Raw(CLIENT_SCRIPT.to_string())));

    Element::new("html")
        .attr("lang", site.lang.clone())
        .child(head)
        .child(body)
        .into()
}

fn grid_section(kind: CollectionKind, cards: &[Node]) -> Node {
    let grid_class = match kind {
        CollectionKind::Illustrations => "masonry-grid",
        CollectionKind::Projects | CollectionKind::Croquis => "project-grid",
    };
    Element::new("section")
        .class("gallery-section")
        .id(format!("{}-section", kind.label()))
        .child(
            Element::new("div")
                .id(kind.container_id())
                .class(grid_class)
                .children(cards.iter().cloned()),
        )
        .into()
}

fn overlay_shell(kind: OverlayKind, visible: bool, class: &str) -> Element {
    let style = if visible {
        match kind.display() {
            "flex" => "display: flex; align-items: center; justify-content: center;".to_string(),
            other => format!("display: {other};"),
        }
    } else {
        "display: none;".to_string()
    };
    Element::new("div")
        .id(kind.element_id())
        .class(class)
        .backdrop_of(kind)
        .attr("style", style)
}

fn close_button(kind: OverlayKind) -> Element {
    Element::new("span")
        .class("close")
        .on_click(Action::Close(kind))
        .text("\u{00d7}")
}

fn detail_overlay(detail: &DetailModal) -> Node {
    overlay_shell(OverlayKind::Detail, detail.is_visible(), "modal")
        .child(
            Element::new("div")
                .class("modal-content")
                .child(close_button(OverlayKind::Detail))
                .child(
                    Element::new("div")
                        .id(OverlayKind::Detail.content_id())
                        .children(detail.body().iter().cloned()),
                ),
        )
        .into()
}

fn viewer_overlay(viewer: &IllustrationViewer) -> Node {
    let mut image = Element::new("img")
        .id(OverlayKind::Viewer.content_id())
        .class("modal-image")
        .attr("alt", "");
    if let Some(src) = viewer.current().filter(|_| viewer.is_visible()) {
        image = image.attr("src", src);
    }
    // Seeds the client cursor so prev/next continue from here.
    image = image.attr("data-index", viewer.cursor().to_string());
    overlay_shell(OverlayKind::Viewer, viewer.is_visible(), "modal image-modal")
        .child(close_button(OverlayKind::Viewer))
        .child(
            Element::new("a")
                .class("prev")
                .on_click(Action::ChangeImage { step: -1 })
                .text("\u{276e}"),
        )
        .child(image)
        .child(
            Element::new("a")
                .class("next")
                .on_click(Action::ChangeImage { step: 1 })
                .text("\u{276f}"),
        )
        .into()
}

fn lightbox_overlay(lightbox: &Lightbox) -> Node {
    let mut image = Element::new("img")
        .id(OverlayKind::Lightbox.content_id())
        .class("modal-image")
        .attr("alt", "");
    if let Some(src) = lightbox.src() {
        image = image.attr("src", src);
    }
    overlay_shell(OverlayKind::Lightbox, lightbox.is_visible(), "modal lightbox")
        .child(close_button(OverlayKind::Lightbox))
        .child(image)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        config: SiteConfig,
        grids: IndexMap<CollectionKind, Vec<Node>>,
        detail: DetailModal,
        viewer: IllustrationViewer,
        lightbox: Lightbox,
    }

    impl Fixture {
        fn new() -> Self {
            let config = SiteConfig::default();
            let grids = config
                .collections()
                .into_iter()
                .map(|kind| (kind, Vec::new()))
                .collect();
            Self {
                config,
                grids,
                detail: DetailModal::new(),
                viewer: IllustrationViewer::new(vec!["a.jpg".into(), "b.jpg".into()]),
                lightbox: Lightbox::new(),
            }
        }

        fn render(&self, scroll: BodyScroll, templates: &[(String, Vec<Node>)]) -> String {
            render_document(&PageView {
                config: &self.config,
                grids: &self.grids,
                detail: &self.detail,
                viewer: &self.viewer,
                lightbox: &self.lightbox,
                scroll,
                templates,
            })
        }
    }

    #[test]
    fn document_carries_containers_and_overlays() {
        let html = Fixture::new().render(BodyScroll::Auto, &[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        for id in [
            "project-grid",
            "illustrations-grid",
            "croquis-grid",
            "projectModal",
            "modalBody",
            "imageModal",
            "fullImage",
            "lightboxModal",
            "lightboxImage",
        ] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing {id}");
        }
        assert!(html.contains(r#"data-backdrop="imageModal""#));
        assert!(!html.contains("overflow: hidden"));
    }

    #[test]
    fn hidden_overlays_render_display_none() {
        let html = Fixture::new().render(BodyScroll::Auto, &[]);
        assert_eq!(html.matches("display: none;").count(), 3);
    }

    #[test]
    fn open_viewer_is_reflected() {
        let mut fixture = Fixture::new();
        fixture.viewer.open(1);
        let html = fixture.render(BodyScroll::Hidden, &[]);
        assert!(html.contains(r#"src="b.jpg""#));
        assert!(html.contains("display: flex;"));
        assert!(html.contains(r#"<body style="overflow: hidden;">"#));
    }

    #[test]
    fn viewer_image_carries_cursor_for_client() {
        let mut fixture = Fixture::new();
        fixture.viewer.open(1);
        let html = fixture.render(BodyScroll::Hidden, &[]);
        assert!(html.contains(r#"src="b.jpg" data-index="1""#));
        assert!(html.contains("getAttribute('data-index')"));
    }

    #[test]
    fn templates_are_embedded_by_id() {
        let templates = vec![("p1".to_string(), vec![Node::text("Alpha")])];
        let html = Fixture::new().render(BodyScroll::Auto, &templates);
        assert!(html.contains(r#"<template id="detail-p1">Alpha</template>"#));
    }

    #[test]
    fn grids_follow_configuration_order() {
        let mut fixture = Fixture::new();
        fixture.grids = IndexMap::from([
            (CollectionKind::Croquis, Vec::new()),
            (CollectionKind::Projects, Vec::new()),
        ]);
        let html = fixture.render(BodyScroll::Auto, &[]);
        let croquis = html.find(r#"id="croquis-grid""#).unwrap();
        let projects = html.find(r#"id="project-grid""#).unwrap();
        assert!(croquis < projects);
        assert!(!html.contains("illustrations-grid"));
    }

    #[test]
    fn client_script_is_embedded_verbatim() {
        let html = Fixture::new().render(BodyScroll::Auto, &[]);
        assert!(html.contains("data-backdrop"));
        assert!(html.contains("applyFallback"));
        assert!(html.contains("'detail/' + encodeURIComponent(id)"));
    }
}

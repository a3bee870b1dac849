//! Detail modal content for a work item.

use super::{Action, Element, Node};
use crate::config::AssetsConfig;
use crate::manifest::WorkItem;

/// Base URL of the `YouTube` embed player.
pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

const YOUTUBE_ALLOW: &str = "accelerometer; autoplay; clipboard-write; encrypted-media; \
                             gyroscope; picture-in-picture; web-share";

/// Builds the detail view: header (title, optional video, description)
/// followed by the optional image gallery.
#[must_use]
pub fn detail_body(item: &WorkItem, description: &str, assets: &AssetsConfig) -> Vec<Node> {
    let mut header = Element::new("div")
        .class("detail-header")
        .child(Element::new("h2").class("detail-title").text(item.title.clone()));

    if let Some(video_id) = item.youtube_id.as_deref() {
        header = header.child(video_embed(video_id));
    }

    header = header.child(
        Element::new("p")
            .class("detail-description")
            .attr("style", "white-space: pre-wrap;")
            .text(description),
    );

    let mut nodes = vec![header.into()];

    let gallery = item.gallery_paths(assets);
    if !gallery.is_empty() {
        let items = gallery.into_iter().map(|path| {
            Element::new("div")
                .class("project-detail-item")
                .child(
                    Element::new("img")
                        .attr("src", path.clone())
                        .attr("alt", item.title.clone())
                        .on_click(Action::OpenLightbox { src: path }),
                )
                .into()
        });
        nodes.push(
            Element::new("div")
                .class("project-detail-grid")
                .children(items)
                .into(),
        );
    }

    nodes
}

fn video_embed(video_id: &str) -> Element {
    Element::new("div").class("video-frame").child(
        Element::new("iframe")
            .attr("src", format!("{YOUTUBE_EMBED_BASE}{video_id}"))
            .attr("allow", YOUTUBE_ALLOW)
            .attr("allowfullscreen", ""),
    )
}

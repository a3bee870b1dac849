//! Grid cards for work items and illustration tiles.

use super::{Action, Element, Node};
use crate::config::{AssetsConfig, MessagesConfig};
use crate::manifest::{CollectionKind, WorkItem};

/// Builds the card for a project or croquis work item.
///
/// The caption sits above a clickable cover; a cover that fails to load
/// is swapped for the placeholder once.
#[must_use]
pub fn work_card(
    item: &WorkItem,
    kind: CollectionKind,
    assets: &AssetsConfig,
    messages: &MessagesConfig,
) -> Node {
    let cta = match kind {
        CollectionKind::Croquis => &messages.croquis_cta,
        _ => &messages.project_cta,
    };

    let cover = Element::new("img")
        .attr("src", item.cover_path(assets))
        .attr("alt", item.title.clone())
        .attr("data-fallback", assets.placeholder.clone());

    Element::new("div")
        .class("project-wrapper")
        .id(format!("card-{}-{}", kind.label(), item.id))
        .child(
            Element::new("h3")
                .class("project-title-visible")
                .text(item.title.clone()),
        )
        .child(
            Element::new("div")
                .class("project-card")
                .on_click(Action::OpenDetail {
                    id: item.id.clone(),
                })
                .child(cover)
                .child(
                    Element::new("div")
                        .class("project-info")
                        .child(Element::new("h3").class("project-title").text(cta.clone())),
                ),
        )
        .into()
}

/// Builds a masonry tile for the illustration at `index`.
#[must_use]
pub fn illustration_tile(url: &str, index: usize, messages: &MessagesConfig) -> Node {
    Element::new("div")
        .class("masonry-item")
        .on_click(Action::OpenImage { index })
        .child(
            Element::new("img")
                .attr("src", url)
                .attr("alt", messages.illustration_alt.clone()),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::render;

    fn alpha() -> WorkItem {
        WorkItem {
            id: "p1".into(),
            title: "Alpha".into(),
            folder: "alpha".into(),
            cover: None,
            images: None,
            youtube_id: None,
        }
    }

    #[test]
    fn project_card_structure() {
        let card = work_card(
            &alpha(),
            CollectionKind::Projects,
            &AssetsConfig::default(),
            &MessagesConfig::default(),
        );
        let el = card.as_element().unwrap();
        assert_eq!(el.attr_value("id"), Some("card-project-p1"));
        assert_eq!(el.attr_value("class"), Some("project-wrapper"));
        assert_eq!(card.actions(), vec![&Action::OpenDetail { id: "p1".into() }]);
        assert!(card.text_content().contains("Alpha"));
        assert!(card.text_content().contains("Voir le projet"));
    }

    #[test]
    fn croquis_card_uses_sketchbook_label() {
        let card = work_card(
            &alpha(),
            CollectionKind::Croquis,
            &AssetsConfig::default(),
            &MessagesConfig::default(),
        );
        assert_eq!(
            card.as_element().unwrap().attr_value("id"),
            Some("card-croquis-p1")
        );
        assert!(card.text_content().contains("Voir le carnet"));
    }

    #[test]
    fn cover_declares_placeholder_fallback() {
        let card = work_card(
            &alpha(),
            CollectionKind::Projects,
            &AssetsConfig::default(),
            &MessagesConfig::default(),
        );
        let html = render(&card);
        assert!(html.contains(r#"src="image/alpha/cover.jpg""#), "{html}");
        assert!(html.contains(r#"data-fallback="image/placeholder.jpg""#));
    }

    #[test]
    fn hostile_title_is_escaped() {
        let mut item = alpha();
        item.title = r#"<script>alert("x")</script>"#.into();
        let html = render(&work_card(
            &item,
            CollectionKind::Projects,
            &AssetsConfig::default(),
            &MessagesConfig::default(),
        ));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn illustration_tile_opens_viewer_at_index() {
        let tile = illustration_tile("image/illustrations/a.jpg", 3, &MessagesConfig::default());
        assert_eq!(tile.actions(), vec![&Action::OpenImage { index: 3 }]);
        assert_eq!(
            render(&tile),
            r#"<div class="masonry-item" data-action="open-image" data-index="3"><img src="image/illustrations/a.jpg" alt="Illustration"></div>"#
        );
    }
}

//! Headless gallery page.
//!
//! [`Page`] owns everything the browser page would hold: the rendered
//! grids, the registry, the three overlays and the body scroll state.
//! Bootstrap runs the loaders for the configured grids; clicks are fed in
//! as [`Click`] events and drive the overlay state machine.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use indexmap::IndexMap;
use tracing::{debug, error, info};

use crate::config::SiteConfig;
use crate::loader::{Batch, LoadReport, Loaded, load_collection};
use crate::manifest::CollectionKind;
use crate::overlay::detail::compose;
use crate::overlay::{
    BodyScroll, DetailModal, DetailOutcome, IllustrationViewer, Lightbox, OverlayKind,
};
use crate::registry::{Registry, RegistryBuilder};
use crate::source::AssetSource;
use crate::view::document::{self, PageView};
use crate::view::{Action, Node};

// ============================================================================
// Events
// ============================================================================

/// A click delivered to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    /// Click on an element carrying an action.
    Action(Action),
    /// Click on an overlay's backdrop region, outside its content.
    Backdrop(OverlayKind),
    /// Click inside an overlay's content. Never dismisses it.
    Content(OverlayKind),
}

// ============================================================================
// Page
// ============================================================================

/// Gallery page state.
pub struct Page {
    config: Arc<SiteConfig>,
    source: Arc<dyn AssetSource>,
    grids: IndexMap<CollectionKind, Vec<Node>>,
    registry: Registry,
    detail: DetailModal,
    viewer: IllustrationViewer,
    lightbox: Lightbox,
    scroll: BodyScroll,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("source", &self.source.describe())
            .field("grids", &self.grids.keys().collect::<Vec<_>>())
            .field("registry", &self.registry.len())
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Creates an empty page with one grid per configured container.
    #[must_use]
    pub fn new(config: Arc<SiteConfig>, source: Arc<dyn AssetSource>) -> Self {
        let grids = config
            .collections()
            .into_iter()
            .map(|kind| (kind, Vec::new()))
            .collect();
        Self {
            config,
            source,
            grids,
            registry: Registry::new(),
            detail: DetailModal::new(),
            viewer: IllustrationViewer::default(),
            lightbox: Lightbox::new(),
            scroll: BodyScroll::Auto,
        }
    }

    /// Runs the loaders for every grid present on the page, concurrently.
    ///
    /// A failed loader is logged and leaves its grid unchanged; it never
    /// fails the bootstrap. Cards are appended to the grids and the
    /// registry is assembled according to the configured merge policy.
    pub async fn bootstrap(&mut self) -> LoadReport {
        let mut pending: FuturesUnordered<_> = self
            .grids
            .keys()
            .map(|&kind| {
                let source = Arc::clone(&self.source);
                let config = Arc::clone(&self.config);
                async move { (kind, load_collection(source.as_ref(), &config, kind).await) }
            })
            .collect();

        let mut registry = RegistryBuilder::new(self.config.registry.merge);
        let mut report = LoadReport::default();

        while let Some((kind, result)) = pending.next().await {
            match result {
                Ok(batch) => {
                    report.loaded.push((kind, batch.cards.len()));
                    self.apply_batch(batch, &mut registry);
                }
                Err(e) => {
                    error!(collection = %kind, error = %e, "error loading collection");
                    report.failed.push((kind, e.to_string()));
                }
            }
        }

        self.registry = registry.finish();
        info!(
            cards = report.total_cards(),
            registry = self.registry.len(),
            failed = report.failed.len(),
            "page bootstrapped"
        );
        report
    }

    fn apply_batch(&mut self, batch: Batch, registry: &mut RegistryBuilder) {
        let Batch { kind, loaded, cards } = batch;
        if let Some(grid) = self.grids.get_mut(&kind) {
            grid.extend(cards);
        }
        match loaded {
            Loaded::Works(items) => registry.record(kind, items),
            Loaded::Illustrations(urls) => self.viewer.set_images(urls),
        }
    }

    /// Delivers a click.
    pub async fn click(&mut self, click: Click) {
        match click {
            Click::Action(action) => self.perform(&action).await,
            Click::Backdrop(kind) => {
                if self.is_open(kind) {
                    self.close(kind);
                }
            }
            Click::Content(_) => {}
        }
    }

    /// Executes an action as if its element were clicked.
    pub async fn perform(&mut self, action: &Action) {
        match action {
            Action::OpenDetail { id } => {
                let outcome = self
                    .detail
                    .open(id, &self.registry, self.source.as_ref(), &self.config)
                    .await;
                if outcome == DetailOutcome::Shown {
                    self.scroll = BodyScroll::Hidden;
                }
            }
            Action::OpenImage { index } => {
                if self.viewer.open(*index) {
                    self.scroll = BodyScroll::Hidden;
                } else {
                    debug!(index, "illustration index out of range");
                }
            }
            Action::ChangeImage { step } => {
                self.viewer.change_image(*step);
            }
            Action::OpenLightbox { src } => self.lightbox.open(src.clone()),
            Action::Close(kind) => self.close(*kind),
        }
    }

    /// Hides an overlay. Closing the detail modal or the viewer restores
    /// body scrolling; the lightbox leaves it alone.
    pub fn close(&mut self, kind: OverlayKind) {
        match kind {
            OverlayKind::Detail => self.detail.close(),
            OverlayKind::Viewer => self.viewer.close(),
            OverlayKind::Lightbox => self.lightbox.close(),
        }
        if kind.locks_scroll() {
            self.scroll = BodyScroll::Auto;
        }
    }

    /// Whether an overlay is shown.
    #[must_use]
    pub const fn is_open(&self, kind: OverlayKind) -> bool {
        match kind {
            OverlayKind::Detail => self.detail.is_visible(),
            OverlayKind::Viewer => self.viewer.is_visible(),
            OverlayKind::Lightbox => self.lightbox.is_visible(),
        }
    }

    /// Reports that an image failed to load. Every grid image with that
    /// source and a pending fallback switches to the placeholder.
    ///
    /// Returns how many images were replaced.
    pub fn report_image_error(&mut self, src: &str) -> usize {
        let mut replaced = 0;
        for node in self.grids.values_mut().flatten() {
            node.walk_mut(&mut |el| {
                if el.attr_value("src") == Some(src) && el.apply_image_fallback() {
                    replaced += 1;
                }
            });
        }
        replaced
    }

    /// Composes the detail body for `id` without touching the modal.
    ///
    /// Returns `None` for an unknown id.
    pub async fn detail_fragment(&self, id: &str) -> Option<Vec<Node>> {
        let item = self.registry.find(id)?;
        Some(compose(item, self.source.as_ref(), &self.config).await)
    }

    /// Composes the detail body of every registry item, for embedding in
    /// a static document. Duplicate ids keep their first record.
    pub async fn prerender_details(&self) -> Vec<(String, Vec<Node>)> {
        let mut out: Vec<(String, Vec<Node>)> = Vec::new();
        for item in self.registry.items() {
            if out.iter().any(|(id, _)| *id == item.id) {
                continue;
            }
            let body = compose(item, self.source.as_ref(), &self.config).await;
            out.push((item.id.clone(), body));
        }
        out
    }

    /// Renders the page as a complete HTML document.
    #[must_use]
    pub fn render_document(&self, templates: &[(String, Vec<Node>)]) -> String {
        document::render_document(&self.view(templates))
    }

    /// Borrowed view of the page for rendering.
    #[must_use]
    pub fn view<'a>(&'a self, templates: &'a [(String, Vec<Node>)]) -> PageView<'a> {
        PageView {
            config: &self.config,
            grids: &self.grids,
            detail: &self.detail,
            viewer: &self.viewer,
            lightbox: &self.lightbox,
            scroll: self.scroll,
            templates,
        }
    }

    /// Cards of a grid, if the page carries it.
    #[must_use]
    pub fn grid(&self, kind: CollectionKind) -> Option<&[Node]> {
        self.grids.get(&kind).map(Vec::as_slice)
    }

    /// Site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Work item registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Detail modal.
    #[must_use]
    pub const fn detail(&self) -> &DetailModal {
        &self.detail
    }

    /// Illustration viewer.
    #[must_use]
    pub const fn viewer(&self) -> &IllustrationViewer {
        &self.viewer
    }

    /// Lightbox.
    #[must_use]
    pub const fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Body scroll state.
    #[must_use]
    pub const fn scroll(&self) -> BodyScroll {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    const PROJECTS: &str = r#"[
        {"id":"p1","title":"Alpha","folder":"alpha","images":["one.jpg"]},
        {"id":"p2","title":"Beta","folder":"beta"}
    ]"#;

    fn page(source: MemorySource) -> Page {
        Page::new(Arc::new(SiteConfig::default()), Arc::new(source))
    }

    fn site() -> MemorySource {
        MemorySource::new()
            .with_asset("projects.json", PROJECTS)
            .with_asset("croquis.json", r#"[{"id":"c1","title":"Carnet","folder":"carnet"}]"#)
            .with_asset("illustrations.json", r#"["i/a.jpg","i/b.jpg","i/c.jpg"]"#)
    }

    #[tokio::test]
    async fn bootstrap_fills_grids_and_registry() {
        let mut page = page(site());
        let report = page.bootstrap().await;
        assert!(report.is_complete());
        assert_eq!(page.grid(CollectionKind::Projects).unwrap().len(), 2);
        assert_eq!(page.grid(CollectionKind::Croquis).unwrap().len(), 1);
        assert_eq!(page.grid(CollectionKind::Illustrations).unwrap().len(), 3);
        assert_eq!(page.registry().len(), 3);
        assert_eq!(page.viewer().images().len(), 3);
    }

    #[tokio::test]
    async fn failed_loader_leaves_other_grids() {
        let source = MemorySource::new()
            .with_asset("projects.json", PROJECTS)
            .with_status("croquis.json", 500);
        let mut page = page(source);
        let report = page.bootstrap().await;
        assert_eq!(report.failed.len(), 2);
        assert_eq!(page.grid(CollectionKind::Projects).unwrap().len(), 2);
        assert!(page.grid(CollectionKind::Croquis).unwrap().is_empty());
    }

    #[tokio::test]
    async fn loaders_only_run_for_present_grids() {
        let mut config = SiteConfig::default();
        config.page.containers = vec!["project-grid".into()];
        let source = Arc::new(site());
        let mut page = Page::new(Arc::new(config), source.clone());
        page.bootstrap().await;
        assert_eq!(source.requests(), vec!["projects.json"]);
        assert!(page.grid(CollectionKind::Croquis).is_none());
    }

    #[tokio::test]
    async fn detail_open_locks_scroll_and_backdrop_closes() {
        let mut page = page(site());
        page.bootstrap().await;

        page.click(Click::Action(Action::OpenDetail { id: "p1".into() }))
            .await;
        assert!(page.is_open(OverlayKind::Detail));
        assert_eq!(page.scroll(), BodyScroll::Hidden);

        page.click(Click::Content(OverlayKind::Detail)).await;
        assert!(page.is_open(OverlayKind::Detail));

        page.click(Click::Backdrop(OverlayKind::Detail)).await;
        assert!(!page.is_open(OverlayKind::Detail));
        assert_eq!(page.scroll(), BodyScroll::Auto);
    }

    #[tokio::test]
    async fn unknown_detail_id_changes_nothing() {
        let mut page = page(site());
        page.bootstrap().await;
        page.click(Click::Action(Action::OpenDetail { id: "zz".into() }))
            .await;
        assert!(!page.is_open(OverlayKind::Detail));
        assert_eq!(page.scroll(), BodyScroll::Auto);
        assert!(page.detail().body().is_empty());
    }

    #[tokio::test]
    async fn lightbox_does_not_touch_scroll() {
        let mut page = page(site());
        page.bootstrap().await;
        page.perform(&Action::OpenDetail { id: "p1".into() }).await;
        page.perform(&Action::OpenLightbox {
            src: "image/alpha/one.jpg".into(),
        })
        .await;
        assert!(page.is_open(OverlayKind::Lightbox));
        assert!(page.is_open(OverlayKind::Detail));

        page.click(Click::Backdrop(OverlayKind::Lightbox)).await;
        assert!(!page.is_open(OverlayKind::Lightbox));
        assert!(page.is_open(OverlayKind::Detail));
        assert_eq!(page.scroll(), BodyScroll::Hidden);
    }

    #[tokio::test]
    async fn viewer_wraps_and_closes() {
        let mut page = page(site());
        page.bootstrap().await;
        page.perform(&Action::OpenImage { index: 0 }).await;
        page.perform(&Action::ChangeImage { step: -1 }).await;
        assert_eq!(page.viewer().current(), Some("i/c.jpg"));
        page.perform(&Action::Close(OverlayKind::Viewer)).await;
        assert!(!page.is_open(OverlayKind::Viewer));
        assert_eq!(page.scroll(), BodyScroll::Auto);
    }

    #[tokio::test]
    async fn backdrop_of_hidden_overlay_is_ignored() {
        let mut page = page(site());
        page.bootstrap().await;
        page.perform(&Action::OpenImage { index: 1 }).await;
        page.click(Click::Backdrop(OverlayKind::Detail)).await;
        assert_eq!(page.scroll(), BodyScroll::Hidden);
        assert!(page.is_open(OverlayKind::Viewer));
    }

    #[tokio::test]
    async fn broken_cover_falls_back_once() {
        let mut page = page(site());
        page.bootstrap().await;
        assert_eq!(page.report_image_error("image/alpha/cover.jpg"), 1);
        assert_eq!(page.report_image_error("image/placeholder.jpg"), 0);
        let html = crate::view::render_nodes(page.grid(CollectionKind::Projects).unwrap());
        assert!(html.contains(r#"src="image/placeholder.jpg""#));
    }

    #[tokio::test]
    async fn detail_fragment_for_unknown_id_is_none() {
        let mut page = page(site());
        page.bootstrap().await;
        assert!(page.detail_fragment("nope").await.is_none());
        assert!(page.detail_fragment("c1").await.is_some());
        assert_eq!(page.prerender_details().await.len(), 3);
    }
}

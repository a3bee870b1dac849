//! Local HTTP server for a site directory.
//!
//! `/` and `/index.html` render the gallery page from the current
//! manifests; `/detail/{id}` returns the composed detail fragment that
//! the client script loads into the modal; every other path is a static
//! file under the site root.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::error::{ServeError, SourceError};
use crate::page::Page;
use crate::source::{AssetSource, DirSource};
use crate::view::render_nodes;

/// Body of a 404 for a static file.
pub const NOT_FOUND_BODY: &str = "Fichier non trouvé";

/// State shared by the request handlers.
#[derive(Debug)]
pub struct ServerState {
    config: Arc<SiteConfig>,
    source: Arc<DirSource>,
}

impl ServerState {
    /// Creates the state for a site rooted at `root`.
    #[must_use]
    pub fn new(config: Arc<SiteConfig>, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            source: Arc::new(DirSource::new(root)),
        }
    }

    async fn bootstrapped_page(&self) -> Page {
        let source: Arc<dyn AssetSource> = self.source.clone();
        let mut page = Page::new(Arc::clone(&self.config), source);
        page.bootstrap().await;
        page
    }
}

// ============================================================================
// Router
// ============================================================================

/// Builds the router.
pub fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/index.html", get(handle_index))
        .route("/detail/{id}", get(handle_detail))
        .route("/{*path}", get(handle_static))
        .with_state(state)
}

async fn handle_index(State(state): State<Arc<ServerState>>) -> Html<String> {
    let page = state.bootstrapped_page().await;
    Html(page.render_document(&[]))
}

async fn handle_detail(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Response {
    let page = state.bootstrapped_page().await;
    match page.detail_fragment(&id).await {
        Some(nodes) => Html(render_nodes(&nodes)).into_response(),
        None => {
            debug!(id, "detail requested for unknown id");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn handle_static(State(state): State<Arc<ServerState>>, Path(path): Path<String>) -> Response {
    match state.source.read_bytes(&path).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, content_type(&path))],
            Bytes::from(bytes),
        )
            .into_response(),
        Err(SourceError::NotFound { .. }) => (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response(),
        Err(SourceError::Forbidden { .. }) => {
            warn!(path, "rejected path outside the site root");
            StatusCode::FORBIDDEN.into_response()
        }
        Err(e) => {
            warn!(path, error = %e, "static file read failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Content type for a file, chosen by extension.
#[must_use]
pub fn content_type(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "svg" => "image/svg+xml",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "pdf" => "application/pdf",
        "woff2" => "font/woff2",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Serving
// ============================================================================

/// Normalizes a bind address: `:8080` and `8080` bind all interfaces.
///
/// # Errors
///
/// Returns [`ServeError::InvalidAddress`] if the result is not a socket
/// address.
pub fn parse_bind_addr(input: &str) -> Result<SocketAddr, ServeError> {
    let addr = if input.starts_with(':') {
        format!("0.0.0.0{input}")
    } else if input.parse::<u16>().is_ok() {
        format!("0.0.0.0:{input}")
    } else {
        input.to_string()
    };
    addr.parse::<SocketAddr>()
        .map_err(|e| ServeError::InvalidAddress {
            input: input.to_string(),
            message: e.to_string(),
        })
}

/// Binds `addr` and serves until `cancel` fires.
///
/// # Errors
///
/// Returns [`ServeError::Bind`] if the listener cannot bind and
/// [`ServeError::Runtime`] if the server fails while running.
pub async fn serve(
    state: Arc<ServerState>,
    addr: SocketAddr,
    cancel: CancellationToken,
) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr).await.map_err(ServeError::Bind)?;
    let bound_addr = listener.local_addr().map_err(ServeError::Bind)?;
    info!(%bound_addr, root = %state.source.root().display(), "HTTP server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await
        .map_err(ServeError::Runtime)?;

    debug!("HTTP server shut down");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("projects.json"),
            r#"[{"id":"p1","title":"Alpha","folder":"alpha"}]"#,
        )
        .unwrap();
        std::fs::create_dir_all(dir.path().join("image/alpha")).unwrap();
        std::fs::write(dir.path().join("image/alpha/description.txt"), "Premier.").unwrap();
        std::fs::write(dir.path().join("style.css"), "body{}").unwrap();
        dir
    }

    fn router(dir: &tempfile::TempDir) -> Router {
        build_router(Arc::new(ServerState::new(
            Arc::new(SiteConfig::default()),
            dir.path(),
        )))
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let ctype = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, ctype, String::from_utf8_lossy(&body).into_owned())
    }

    #[test]
    fn parse_bind_addr_colon_port() {
        assert_eq!(
            parse_bind_addr(":8080").unwrap(),
            "0.0.0.0:8080".parse().unwrap()
        );
    }

    #[test]
    fn parse_bind_addr_port_only() {
        assert_eq!(
            parse_bind_addr("5000").unwrap(),
            "0.0.0.0:5000".parse().unwrap()
        );
    }

    #[test]
    fn parse_bind_addr_invalid() {
        assert!(matches!(
            parse_bind_addr("not-an-address"),
            Err(ServeError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type("image/a.JPG"), "image/jpeg");
        assert_eq!(content_type("style.css"), "text/css; charset=utf-8");
        assert_eq!(content_type("LICENSE"), "application/octet-stream");
    }

    #[tokio::test]
    async fn index_renders_gallery() {
        let dir = site();
        let (status, ctype, body) = fetch(router(&dir), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(ctype.unwrap().starts_with("text/html"));
        assert!(body.contains(r#"id="card-project-p1""#));
        assert!(body.contains("Voir le projet"));
    }

    #[tokio::test]
    async fn index_html_is_the_same_page() {
        let dir = site();
        let (status, _, body) = fetch(router(&dir), "/index.html").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("project-grid"));
    }

    #[tokio::test]
    async fn detail_fragment_for_known_id() {
        let dir = site();
        let (status, _, body) = fetch(router(&dir), "/detail/p1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Alpha"));
        assert!(body.contains("Premier."));
        assert!(!body.contains("<html"));
    }

    #[tokio::test]
    async fn non_utf8_description_is_still_shown() {
        let dir = site();
        std::fs::write(
            dir.path().join("image/alpha/description.txt"),
            [0xc9, 0x74, 0xe9],
        )
        .unwrap();
        let (status, _, body) = fetch(router(&dir), "/detail/p1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\u{fffd}t\u{fffd}"));
        assert!(!body.contains("Erreur"));
    }

    #[tokio::test]
    async fn detail_for_unknown_id_is_404() {
        let dir = site();
        let (status, _, _) = fetch(router(&dir), "/detail/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn static_file_served_with_type() {
        let dir = site();
        let (status, ctype, body) = fetch(router(&dir), "/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ctype.as_deref(), Some("text/css; charset=utf-8"));
        assert_eq!(body, "body{}");
    }

    #[tokio::test]
    async fn missing_static_file_is_404_with_message() {
        let dir = site();
        let (status, _, body) = fetch(router(&dir), "/image/alpha/cover.jpg").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, NOT_FOUND_BODY);
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let dir = site();
        let (status, _, _) = fetch(router(&dir), "/image/%2E%2E/%2E%2E/etc/passwd").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

//! `render` command: bootstrap the page and write the HTML document.

use std::sync::Arc;

use crate::cli::args::RenderArgs;
use crate::config::{SiteConfig, load_or_default};
use crate::error::VitrineError;
use crate::page::Page;
use crate::source::{AssetSource, DirSource, HttpSource};

/// Render the gallery page.
///
/// Collections that fail to load are logged and rendered empty; they do
/// not fail the command.
///
/// # Errors
///
/// Returns a config error for an unreadable configuration, a source
/// error for an invalid base URL, or an I/O error if the output cannot
/// be written.
pub async fn run(args: &RenderArgs) -> Result<(), VitrineError> {
    let config = effective_config(load_or_default(args.config.as_deref())?, args);
    let source = build_source(args)?;
    tracing::info!(source = %source.describe(), "rendering gallery");

    let mut page = Page::new(config, source);
    let report = page.bootstrap().await;
    for (kind, message) in &report.failed {
        tracing::warn!(collection = %kind, "{message}");
    }

    let templates = if args.no_details {
        Vec::new()
    } else {
        page.prerender_details().await
    };
    let html = page.render_document(&templates);

    if let Some(ref path) = args.output {
        tokio::fs::write(path, html).await?;
        tracing::info!(output = %path.display(), cards = report.total_cards(), "document written");
    } else {
        print!("{html}");
    }
    Ok(())
}

fn effective_config(config: Arc<SiteConfig>, args: &RenderArgs) -> Arc<SiteConfig> {
    match args.merge {
        Some(merge) if merge != config.registry.merge => {
            let mut config = SiteConfig::clone(&config);
            config.registry.merge = merge;
            Arc::new(config)
        }
        _ => config,
    }
}

fn build_source(args: &RenderArgs) -> Result<Arc<dyn AssetSource>, VitrineError> {
    if let Some(ref site) = args.site {
        if !site.is_dir() {
            return Err(VitrineError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("site directory not found: {}", site.display()),
            )));
        }
        return Ok(Arc::new(DirSource::new(site.clone())));
    }
    if let Some(ref base) = args.base_url {
        return Ok(Arc::new(HttpSource::new(base)?));
    }
    Err(VitrineError::Usage(
        "either --site or --base-url is required".to_string(),
    ))
}

//! `serve` command: serve a site directory over HTTP.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::args::ServeArgs;
use crate::config::load_or_default;
use crate::error::VitrineError;
use crate::server::{ServerState, parse_bind_addr, serve};

/// Serve the site until `cancel` fires.
///
/// # Errors
///
/// Returns an I/O error if the site directory does not exist, a config
/// error for an unreadable configuration, or a serve error if the bind
/// address is invalid or cannot be bound.
pub async fn run(args: &ServeArgs, cancel: CancellationToken) -> Result<(), VitrineError> {
    if !args.site.is_dir() {
        return Err(VitrineError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("site directory not found: {}", args.site.display()),
        )));
    }

    let addr = parse_bind_addr(&args.bind)?;
    let config = load_or_default(args.config.as_deref())?;
    let state = Arc::new(ServerState::new(config, args.site.clone()));

    serve(state, addr, cancel).await?;
    Ok(())
}

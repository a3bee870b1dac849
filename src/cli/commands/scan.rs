//! `scan` command: index image folders into JSON manifests.

use crate::cli::args::{OutputFormat, ScanArgs};
use crate::config::load_or_default;
use crate::error::VitrineError;
use crate::scan::{ScanOutcome, scan_all};

/// Scan every configured folder under the site root.
///
/// # Errors
///
/// Returns a config error for an unreadable configuration or an I/O
/// error if a folder cannot be listed or a manifest written.
pub async fn run(args: &ScanArgs) -> Result<(), VitrineError> {
    let config = load_or_default(args.config.as_deref())?;
    let outcomes = scan_all(&args.root, &config.scan).await?;

    match args.format {
        OutputFormat::Human => {
            for (target, outcome) in config.scan.targets.iter().zip(&outcomes) {
                match outcome {
                    ScanOutcome::Written { count, .. } => println!(
                        "{}: {count} image(s) -> {}",
                        target.folder, target.output
                    ),
                    ScanOutcome::Created { .. } => {
                        println!("{}: folder created, nothing to index", target.folder);
                    }
                }
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = config
                .scan
                .targets
                .iter()
                .zip(&outcomes)
                .map(|(target, outcome)| match outcome {
                    ScanOutcome::Written { count, .. } => serde_json::json!({
                        "folder": target.folder,
                        "output": target.output,
                        "count": count,
                    }),
                    ScanOutcome::Created { .. } => serde_json::json!({
                        "folder": target.folder,
                        "created": true,
                    }),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

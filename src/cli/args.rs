//! CLI argument definitions.
//!
//! All Clap derive structs for `vitrine` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::MergePolicy;
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Static portfolio gallery renderer.
#[derive(Parser, Debug)]
#[command(name = "vitrine", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "VITRINE_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(
        long,
        default_value = "human",
        global = true,
        env = "VITRINE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the gallery page to a static HTML document.
    Render(RenderArgs),

    /// Serve a site directory over HTTP.
    Serve(ServeArgs),

    /// Index image folders into JSON manifests.
    Scan(ScanArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `render`.
#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("source").required(true).multiple(false))]
pub struct RenderArgs {
    /// Site directory holding the manifests and images.
    #[arg(short, long, group = "source", env = "VITRINE_SITE")]
    pub site: Option<PathBuf>,

    /// Base URL of a published site to fetch manifests from.
    #[arg(long, group = "source")]
    pub base_url: Option<String>,

    /// Path to the YAML site configuration.
    #[arg(short, long, env = "VITRINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the document here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the registry merge policy from the configuration.
    #[arg(long)]
    pub merge: Option<MergePolicy>,

    /// Do not embed pre-rendered detail views; the page then loads them
    /// from `detail/{id}` at click time.
    #[arg(long)]
    pub no_details: bool,
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Site directory to serve.
    #[arg(short, long, default_value = ".", env = "VITRINE_SITE")]
    pub site: PathBuf,

    /// Bind address as `[host:]port`.
    #[arg(short, long, default_value = "127.0.0.1:5000", env = "VITRINE_BIND")]
    pub bind: String,

    /// Path to the YAML site configuration.
    #[arg(short, long, env = "VITRINE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for `scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Site root the scan targets are relative to.
    #[arg(short, long, default_value = ".", env = "VITRINE_SITE")]
    pub root: PathBuf,

    /// Path to the YAML site configuration.
    #[arg(short, long, env = "VITRINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for the scan summary.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

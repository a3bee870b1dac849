//! Error types for `Vitrine`
//!
//! Gallery regions never fail the page: loaders and the detail modal log
//! and degrade instead. The types here cover the operations that can
//! fail outright (configuration, asset sources, serving, scanning) and
//! map them to process exit codes.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `vitrine` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Asset source error (fetch failed, bad status, unparsable manifest)
    pub const SOURCE_ERROR: i32 = 4;

    /// Server error (bind failure, invalid address)
    pub const SERVE_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `Vitrine` operations.
#[derive(Debug, Error)]
pub enum VitrineError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Asset fetch error
    #[error(transparent)]
    Source(#[from] SourceError),

    /// HTTP server error
    #[error(transparent)]
    Serve(#[from] ServeError),

    /// Invalid command-line usage
    #[error("usage error: {0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl VitrineError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Source(_) | Self::Json(_) => ExitCode::SOURCE_ERROR,
            Self::Serve(_) => ExitCode::SERVE_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the configuration file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Configuration file exceeds the size limit
    #[error("config file {path} is {size} bytes (limit: {limit})")]
    TooLarge {
        /// Path to the configuration file
        path: PathBuf,
        /// Actual size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Dotted path to the problematic field (e.g., "manifests.projects")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - validation failure that prevents configuration from being used
    Error,
    /// Warning - potential issue that does not prevent configuration loading
    Warning,
}

// ============================================================================
// Source Errors
// ============================================================================

/// Failures while fetching site assets (manifests, descriptions).
///
/// The split between [`SourceError::NotFound`]/[`SourceError::Status`] and
/// the remaining variants matters to the detail modal: a missing
/// description is an expected outcome, a broken transport is not.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The asset does not exist
    #[error("not found: {path}")]
    NotFound {
        /// Requested asset path
        path: String,
    },

    /// The server answered with a non-success status
    #[error("unexpected status {status} for {path}")]
    Status {
        /// Requested asset path
        path: String,
        /// HTTP status code
        status: u16,
    },

    /// Network-level failure (connection refused, DNS, reset)
    #[error("network error for {path}: {message}")]
    Network {
        /// Requested asset path
        path: String,
        /// Underlying error message
        message: String,
    },

    /// The asset could not be decoded
    #[error("invalid content in {path}: {message}")]
    Parse {
        /// Requested asset path
        path: String,
        /// Decoder error message
        message: String,
    },

    /// The requested path escapes the site root
    #[error("rejected asset path: {path}")]
    Forbidden {
        /// Requested asset path
        path: String,
    },

    /// Local I/O failure
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Requested asset path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl SourceError {
    /// Returns `true` when the server (or directory) answered but had no
    /// usable asset, as opposed to the fetch itself breaking.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Status { .. })
    }
}

// ============================================================================
// Serve Errors
// ============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Bind address could not be parsed
    #[error("invalid bind address \"{input}\": {message}")]
    InvalidAddress {
        /// Address as supplied by the user
        input: String,
        /// Parser error message
        message: String,
    },

    /// Listener could not be bound
    #[error("bind failed: {0}")]
    Bind(std::io::Error),

    /// The server loop exited with an error
    #[error("server error: {0}")]
    Runtime(std::io::Error),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `Vitrine` operations.
pub type Result<T> = std::result::Result<T, VitrineError>;

// ============================================================================
// Tests
// ============================================================================

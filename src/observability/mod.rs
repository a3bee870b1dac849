//! Observability module.
//!
//! Structured logging for the CLI and the HTTP server.

pub mod logging;

pub use logging::{LOG_LEVEL_ENV, LogFormat, init_logging, verbosity_to_directive};

//! `Vitrine` - static portfolio gallery renderer
//!
//! Fetches JSON manifests describing creative works (projects,
//! illustrations, croquis sketchbooks), renders them as clickable grid
//! cards, and models the page's overlay panels headlessly so the result
//! can be rendered to HTML or served over HTTP.

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod observability;
pub mod overlay;
pub mod page;
pub mod registry;
pub mod scan;
pub mod server;
pub mod source;
pub mod view;

//! Configuration module
//!
//! Loads and validates the site configuration: manifest locations, asset
//! layout, registry merge policy, page composition, user-facing strings
//! and folder scan targets.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLoader, LoadResult, LoadWarning, LoaderOptions, load_or_default};
pub use schema::*;
pub use validation::{ValidationResult, Validator, suggest_container};

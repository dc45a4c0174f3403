//! Catalog data model wiring.
//!
//! This module wraps the JSON catalog format so the loader, validator, and
//! query helpers share one set of types. `identity` holds the small value
//! types and field enumerations; `model` mirrors the file shape and provides
//! the plain-parse entry point.

pub mod identity;
pub mod model;

pub use identity::{BuildId, McVersion, ModLoader, Platform, ReleaseType, Status};
pub use model::{Build, Catalog, Download, EnrichedBuild, PlatformSpec, load_catalog_from_path};

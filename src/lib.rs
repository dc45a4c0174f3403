//! Shared library for the mod build catalog tooling.
//!
//! The crate answers one question: given constraints on Minecraft version,
//! mod loader, and required extensions, which catalog builds fit? It splits
//! into three layers. `validate` gates a raw catalog payload against the
//! embedded JSON Schema and the semantic invariants (the `catalog-validate`
//! binary runs this in CI). `loader` fetches or reads a catalog and flattens
//! the version groups into `EnrichedBuild` entries. `query` holds the pure
//! filter/search/sort helpers a presentation layer calls on every state
//! change; it never fails and never mutates its input.

pub mod catalog;
pub mod loader;
pub mod query;
pub mod validate;

pub use catalog::{
    Build, BuildId, Catalog, Download, EnrichedBuild, McVersion, ModLoader, Platform,
    PlatformSpec, ReleaseType, Status, load_catalog_from_path,
};
pub use loader::{CATALOG_PATH, LoadOutcome, fetch_catalog, flatten_catalog, load_catalog_outcome};
pub use query::{
    BuildFilter, SortDirection, SortKey, compare_versions, extension_facet, filter_builds,
    loader_facet, matches_query, mc_version_facet, search_builds, sort_builds,
};
pub use validate::{ValidationIssue, validate_catalog_value};

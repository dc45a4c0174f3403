//! Catalog retrieval and flattening.
//!
//! The loader is the only component that replaces the in-memory entry
//! collection, and it does so wholesale: one fetch produces one
//! `LoadOutcome`, and readers treat the flattened entries as immutable for
//! the lifetime of that load. Transport and decode failures never escape as
//! faults; they fold into the outcome's error string so a caller can render
//! a degraded "couldn't load data" state. Retry and backoff are the caller's
//! concern; each call is a single attempt.

use crate::catalog::{Catalog, EnrichedBuild, load_catalog_from_path};
use anyhow::{Context, Result, bail};
use std::path::Path;

/// Relative path of the catalog resource under the configured base URL.
pub const CATALOG_PATH: &str = "catalog.json";

#[derive(Debug, Default)]
/// Result of one load attempt.
///
/// On failure `catalog` is `None`, `builds` is empty, and `error` carries the
/// message; `updated_at` and friends come from `catalog` on success.
pub struct LoadOutcome {
    pub catalog: Option<Catalog>,
    pub builds: Vec<EnrichedBuild>,
    pub error: Option<String>,
}

impl LoadOutcome {
    fn success(catalog: Catalog) -> Self {
        let builds = flatten_catalog(&catalog);
        Self {
            catalog: Some(catalog),
            builds,
            error: None,
        }
    }

    fn failure(err: anyhow::Error) -> Self {
        Self {
            catalog: None,
            builds: Vec::new(),
            error: Some(format!("{err:#}")),
        }
    }
}

/// Fetch `<base_url>/catalog.json` and flatten it.
pub fn fetch_catalog(base_url: &str) -> LoadOutcome {
    match try_fetch(base_url) {
        Ok(catalog) => LoadOutcome::success(catalog),
        Err(err) => LoadOutcome::failure(err),
    }
}

/// Load a catalog from a local file and flatten it. Same outcome contract as
/// `fetch_catalog`, useful for mirrored or checked-out catalogs.
pub fn load_catalog_outcome(path: &Path) -> LoadOutcome {
    match load_catalog_from_path(path).with_context(|| format!("loading {}", path.display())) {
        Ok(catalog) => LoadOutcome::success(catalog),
        Err(err) => LoadOutcome::failure(err),
    }
}

fn try_fetch(base_url: &str) -> Result<Catalog> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), CATALOG_PATH);
    let response = reqwest::blocking::get(&url).with_context(|| format!("requesting {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("request for {url} returned {status}");
    }
    let catalog: Catalog = response
        .json()
        .with_context(|| format!("decoding catalog from {url}"))?;
    Ok(catalog)
}

/// Flatten the grouped `versions` mapping into one entry sequence, tagging
/// each build with its group key. Groups flatten in key order; authored order
/// within a group is preserved.
pub fn flatten_catalog(catalog: &Catalog) -> Vec<EnrichedBuild> {
    catalog
        .versions
        .iter()
        .flat_map(|(mc_version, builds)| {
            builds.iter().map(|build| EnrichedBuild {
                mc_version: mc_version.clone(),
                build: build.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::McVersion;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_catalog() -> Catalog {
        serde_json::from_value(json!({
            "updatedAt": "August 2026",
            "versions": {
                "1.19.1": [{
                    "id": "b1",
                    "repo": "openscript-mc/openscript",
                    "fork": "openscript",
                    "commit": "9f2c1ab44d",
                    "modVersion": "1.102.3",
                    "modLoader": ["forge"],
                    "extensions": ["luaj"],
                    "downloads": [{
                        "name": "openscript.jar",
                        "platform": "forge",
                        "url": "https://builds.openscript-mc.dev/openscript.jar"
                    }],
                    "releaseType": "release"
                }],
                "1.21.1": [{
                    "id": "b2",
                    "repo": "openscript-mc/openscript",
                    "fork": "openscript",
                    "commit": "c41e77d02a",
                    "modVersion": "1.140.0",
                    "modLoader": ["fabric"],
                    "extensions": ["luaj", "js"],
                    "downloads": [{
                        "name": "openscript.jar",
                        "platform": "fabric",
                        "url": "https://builds.openscript-mc.dev/openscript.jar"
                    }],
                    "releaseType": "release"
                }]
            }
        }))
        .expect("sample catalog parses")
    }

    #[test]
    fn flatten_tags_each_build_with_its_group() {
        let catalog = sample_catalog();
        let builds = flatten_catalog(&catalog);
        assert_eq!(builds.len(), 2);
        assert_eq!(builds[0].mc_version, McVersion("1.19.1".to_string()));
        assert_eq!(builds[0].build.id.0, "b1");
        assert_eq!(builds[1].mc_version, McVersion("1.21.1".to_string()));
        assert_eq!(builds[1].build.id.0, "b2");
        // Original build fields survive flattening untouched.
        assert_eq!(builds[1].build, catalog.versions[&builds[1].mc_version][0]);
    }

    #[test]
    fn file_outcome_carries_catalog_and_builds() {
        let mut file = NamedTempFile::new().expect("temp file");
        serde_json::to_writer(&mut file, &sample_catalog()).expect("write catalog");
        file.flush().expect("flush");

        let outcome = load_catalog_outcome(file.path());
        assert!(outcome.error.is_none(), "unexpected error: {:?}", outcome.error);
        assert_eq!(outcome.builds.len(), 2);
        assert_eq!(
            outcome.catalog.as_ref().map(|c| c.updated_at.as_str()),
            Some("August 2026")
        );
    }

    #[test]
    fn file_outcome_degrades_on_missing_or_malformed_input() {
        let outcome = load_catalog_outcome(Path::new("/nonexistent/catalog.json"));
        assert!(outcome.catalog.is_none());
        assert!(outcome.builds.is_empty());
        assert!(outcome.error.is_some());

        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"{ not json").expect("write garbage");
        file.flush().expect("flush");
        let outcome = load_catalog_outcome(file.path());
        assert!(outcome.builds.is_empty());
        assert!(outcome.error.is_some());
    }

    #[test]
    fn fetch_failure_resolves_to_error_outcome() {
        // An unusable base URL fails before any network traffic; the point is
        // that a transport failure becomes data instead of a propagated fault.
        let outcome = fetch_catalog("not-a-base-url");
        assert!(outcome.catalog.is_none());
        assert!(outcome.builds.is_empty());
        assert!(outcome.error.is_some());
    }
}

//! Deserializable representation of a catalog file.
//!
//! The types mirror the JSON shape checked by `schema/catalog.schema.json` so
//! the loader and query helpers can reason about builds without ad-hoc JSON
//! handling. Use `validate::validate_catalog_value` when the payload comes
//! from an untrusted edit; use these structs directly once it has passed.

use crate::catalog::identity::{BuildId, McVersion, ModLoader, Platform, ReleaseType, Status};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Full build catalog as stored on disk or served over HTTP.
pub struct Catalog {
    /// Opaque display string; not necessarily a parseable date.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    /// Builds grouped by the Minecraft version they target. Each group keeps
    /// its authored order.
    pub versions: BTreeMap<McVersion, Vec<Build>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One buildable/downloadable artifact for a specific Minecraft version.
pub struct Build {
    pub id: BuildId,
    pub repo: String,
    /// May differ from the canonical project name when the build comes from a
    /// derivative project.
    pub fork: String,
    pub commit: String,
    pub mod_version: String,
    /// A build can support several loaders at once.
    pub mod_loader: Vec<ModLoader>,
    /// Open set; new extensions appear without a schema change.
    pub extensions: Vec<String>,
    pub downloads: Vec<Download>,
    pub release_type: ReleaseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Strict `YYYY-MM-DD` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One downloadable file belonging to a build.
pub struct Download {
    pub name: String,
    pub platform: PlatformSpec,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// A download targets either a single platform or several; catalogs author
/// both spellings, so both deserialize.
pub enum PlatformSpec {
    One(Platform),
    Many(Vec<Platform>),
}

impl PlatformSpec {
    /// Iterate the platform values regardless of which spelling was authored.
    pub fn iter(&self) -> std::slice::Iter<'_, Platform> {
        match self {
            PlatformSpec::One(platform) => std::slice::from_ref(platform).iter(),
            PlatformSpec::Many(platforms) => platforms.iter(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A build annotated with the version group it was found under.
///
/// Produced once when the loader flattens a catalog; read-only afterwards.
/// This is the unit every query helper operates on.
pub struct EnrichedBuild {
    #[serde(rename = "mcVersion")]
    pub mc_version: McVersion,
    #[serde(flatten)]
    pub build: Build,
}

/// Read and parse a catalog from disk without schema validation.
pub fn load_catalog_from_path(path: &Path) -> Result<Catalog> {
    let data = fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&data)?;
    Ok(catalog)
}

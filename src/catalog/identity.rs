use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minecraft version string a build group is keyed under (e.g., `1.21.1`).
///
/// Stored on every flattened entry so consumers can trace a build back to the
/// catalog group it came from. Ordering for display goes through
/// `query::compare_versions`; the derived `Ord` is plain string order and is
/// only used for map keys.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct McVersion(pub String);

/// Stable identifier for an individual build entry.
///
/// Unique across the whole catalog, not just within one version group; the
/// validator enforces this. UI keys and external links hang off this value.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(pub String);

/// Mod loader a build runs under. Closed set: the catalog schema rejects
/// anything outside these three, so unknown values fail deserialization.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModLoader {
    Fabric,
    Forge,
    Neoforge,
}

/// Release channel of a build. Closed set, required on every entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Release,
    Beta,
    Nightly,
}

/// Support status of a build. Closed set, optional on every entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Supported,
    Deprecated,
    Experimental,
}

/// Target of one downloadable file.
///
/// Known variants keep serialization consistent; `Custom` preserves forward
/// compatibility with catalogs that introduce new platform values. The schema
/// under `schema/catalog.schema.json` carries the authoritative (wider) list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Platform {
    Fabric,
    Forge,
    Neoforge,
    Extension,
    Ts,
    Other,
    Custom(String),
}

impl ModLoader {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModLoader::Fabric => "fabric",
            ModLoader::Forge => "forge",
            ModLoader::Neoforge => "neoforge",
        }
    }
}

impl ReleaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Release => "release",
            ReleaseType::Beta => "beta",
            ReleaseType::Nightly => "nightly",
        }
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Supported => "supported",
            Status::Deprecated => "deprecated",
            Status::Experimental => "experimental",
        }
    }
}

impl Serialize for Platform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Fabric => "fabric",
            Platform::Forge => "forge",
            Platform::Neoforge => "neoforge",
            Platform::Extension => "extension",
            Platform::Ts => "ts",
            Platform::Other => "other",
            Platform::Custom(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "fabric" => Platform::Fabric,
            "forge" => Platform::Forge,
            "neoforge" => Platform::Neoforge,
            "extension" => Platform::Extension,
            "ts" => Platform::Ts,
            "other" => Platform::Other,
            custom => Platform::Custom(custom.to_string()),
        }
    }
}

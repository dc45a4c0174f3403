//! Catalog validation: structural schema pass plus semantic cross-checks.
//!
//! The structural pass compiles the embedded `schema/catalog.schema.json`
//! document once and reports every violation with a dotted path into the
//! payload. The semantic pass runs only after the payload parses into the
//! typed model and covers what JSON Schema cannot express cheaply:
//! whitespace-only strings, absolute URLs, and catalog-wide build id
//! uniqueness. All issues are collected so catalog authors see the full list
//! in one run rather than fixing one field at a time.

use crate::catalog::{Build, BuildId, Catalog, Download, McVersion};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use url::Url;

static CATALOG_SCHEMA_JSON: &str = include_str!("../schema/catalog.schema.json");

#[derive(Clone, Debug, PartialEq, Eq)]
/// One field-level validation failure: dotted path plus human-readable reason.
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate a raw parsed payload against the catalog contract.
///
/// Returns the typed catalog on success, or every issue found. Callers decide
/// severity: the CI gate treats any issue as fatal, a runtime loader may log
/// and degrade instead.
pub fn validate_catalog_value(value: &Value) -> Result<Catalog, Vec<ValidationIssue>> {
    let issues = schema_issues(value);
    if !issues.is_empty() {
        return Err(issues);
    }

    // Post-schema, the typed parse should only fail if the schema and the
    // model drift apart; surface that as a root-level issue rather than a
    // panic so the gate still prints something actionable.
    let catalog: Catalog = match serde_json::from_value(value.clone()) {
        Ok(catalog) => catalog,
        Err(err) => {
            return Err(vec![ValidationIssue::new(
                "$",
                format!("payload does not match the catalog model: {err}"),
            )]);
        }
    };

    let issues = semantic_issues(&catalog);
    if issues.is_empty() {
        Ok(catalog)
    } else {
        Err(issues)
    }
}

fn compiled_schema() -> &'static JSONSchema {
    static RAW: OnceLock<Value> = OnceLock::new();
    static COMPILED: OnceLock<JSONSchema> = OnceLock::new();
    COMPILED.get_or_init(|| {
        let raw = RAW.get_or_init(|| {
            serde_json::from_str(CATALOG_SCHEMA_JSON).expect("embedded catalog schema parses")
        });
        JSONSchema::compile(raw).expect("embedded catalog schema compiles")
    })
}

fn schema_issues(value: &Value) -> Vec<ValidationIssue> {
    match compiled_schema().validate(value) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|err| ValidationIssue::new(dotted_path(&err.instance_path.to_string()), err.to_string()))
            .collect(),
    }
}

/// Convert a JSON pointer (`/versions/1.21.1/0/commit`) into the dotted form
/// reported to catalog authors (`versions.1.21.1.0.commit`).
fn dotted_path(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches('/');
    if trimmed.is_empty() {
        "$".to_string()
    } else {
        trimmed.replace('/', ".")
    }
}

fn semantic_issues(catalog: &Catalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if catalog.updated_at.trim().is_empty() {
        issues.push(ValidationIssue::new(
            "updatedAt",
            "must not be empty or whitespace-only",
        ));
    }

    // Build id -> first version group the id appeared under. The map survives
    // the whole traversal so collisions across groups are caught, not just
    // collisions within one group.
    let mut first_seen: BTreeMap<BuildId, McVersion> = BTreeMap::new();

    for (mc_version, builds) in &catalog.versions {
        for (index, build) in builds.iter().enumerate() {
            let base = format!("versions.{}.{}", mc_version.0, index);
            check_build(build, &base, &mut issues);

            if let Some(original) = first_seen.get(&build.id) {
                issues.push(ValidationIssue::new(
                    format!("{base}.id"),
                    format!(
                        "duplicate build id '{}' (already used under version group '{}')",
                        build.id.0, original.0
                    ),
                ));
            } else {
                first_seen.insert(build.id.clone(), mc_version.clone());
            }
        }
    }

    issues
}

fn check_build(build: &Build, base: &str, issues: &mut Vec<ValidationIssue>) {
    check_non_blank(&build.id.0, &format!("{base}.id"), issues);
    check_non_blank(&build.repo, &format!("{base}.repo"), issues);
    check_non_blank(&build.fork, &format!("{base}.fork"), issues);
    check_non_blank(&build.commit, &format!("{base}.commit"), issues);
    check_non_blank(&build.mod_version, &format!("{base}.modVersion"), issues);

    for (index, extension) in build.extensions.iter().enumerate() {
        check_non_blank(extension, &format!("{base}.extensions.{index}"), issues);
    }
    if let Some(notes) = &build.notes {
        check_non_blank(notes, &format!("{base}.notes"), issues);
    }

    for (index, download) in build.downloads.iter().enumerate() {
        check_download(download, &format!("{base}.downloads.{index}"), issues);
    }
}

fn check_download(download: &Download, base: &str, issues: &mut Vec<ValidationIssue>) {
    check_non_blank(&download.name, &format!("{base}.name"), issues);
    if let Some(checksum) = &download.checksum {
        check_non_blank(checksum, &format!("{base}.checksum"), issues);
    }
    if let Some(notes) = &download.notes {
        check_non_blank(notes, &format!("{base}.notes"), issues);
    }

    if let Err(err) = Url::parse(&download.url) {
        issues.push(ValidationIssue::new(
            format!("{base}.url"),
            format!("'{}' is not a valid absolute URL: {err}", download.url),
        ));
    }
}

fn check_non_blank(value: &str, path: &str, issues: &mut Vec<ValidationIssue>) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(path, "must not be empty or whitespace-only"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_build(id: &str) -> Value {
        json!({
            "id": id,
            "repo": "openscript-mc/openscript",
            "fork": "openscript",
            "commit": "9f2c1ab44d",
            "modVersion": "1.140.0",
            "modLoader": ["fabric"],
            "extensions": ["luaj"],
            "downloads": [{
                "name": "openscript.jar",
                "platform": "fabric",
                "url": "https://builds.openscript-mc.dev/openscript.jar"
            }],
            "releaseType": "release"
        })
    }

    fn sample_catalog(builds: Value) -> Value {
        json!({
            "updatedAt": "August 2026",
            "versions": { "1.21.1": builds }
        })
    }

    #[test]
    fn valid_catalog_passes() {
        let value = sample_catalog(json!([sample_build("b1")]));
        let catalog = validate_catalog_value(&value).expect("catalog should validate");
        assert_eq!(catalog.versions.len(), 1);
    }

    #[test]
    fn schema_violations_are_collected_with_dotted_paths() {
        let mut build = sample_build("b1");
        build["commit"] = json!("abc");
        build["modLoader"] = json!([]);
        build["releaseType"] = json!("stable");
        let value = sample_catalog(json!([build]));

        let issues = validate_catalog_value(&value).expect_err("schema violations expected");
        assert!(issues.len() >= 3, "expected all violations, got {issues:?}");
        assert!(issues.iter().any(|i| i.path == "versions.1.21.1.0.commit"));
        assert!(issues.iter().any(|i| i.path == "versions.1.21.1.0.modLoader"));
        assert!(issues.iter().any(|i| i.path == "versions.1.21.1.0.releaseType"));
    }

    #[test]
    fn published_at_must_match_date_pattern() {
        let mut build = sample_build("b1");
        build["publishedAt"] = json!("2026/03/18");
        let value = sample_catalog(json!([build]));
        let issues = validate_catalog_value(&value).expect_err("bad date expected");
        assert!(issues.iter().any(|i| i.path == "versions.1.21.1.0.publishedAt"));
    }

    #[test]
    fn unknown_platform_values_are_allowed_by_model_but_gated_by_schema() {
        let mut build = sample_build("b1");
        build["downloads"][0]["platform"] = json!("quilt");
        let value = sample_catalog(json!([build.clone()]));
        // quilt is in the schema's wider platform set even though the narrow
        // Platform enum treats it as a custom value.
        assert!(validate_catalog_value(&value).is_ok());

        build["downloads"][0]["platform"] = json!("bedrock");
        let value = sample_catalog(json!([build]));
        let issues = validate_catalog_value(&value).expect_err("off-list platform expected");
        assert!(
            issues
                .iter()
                .any(|i| i.path == "versions.1.21.1.0.downloads.0.platform")
        );
    }

    #[test]
    fn relative_urls_are_rejected() {
        let mut build = sample_build("b1");
        build["downloads"][0]["url"] = json!("builds/openscript.jar");
        let value = sample_catalog(json!([build]));
        let issues = validate_catalog_value(&value).expect_err("relative url expected");
        assert!(
            issues
                .iter()
                .any(|i| i.path == "versions.1.21.1.0.downloads.0.url")
        );
    }

    #[test]
    fn whitespace_only_strings_are_rejected() {
        let mut build = sample_build("b1");
        build["fork"] = json!("   ");
        build["notes"] = json!(" ");
        let value = sample_catalog(json!([build]));
        let issues = validate_catalog_value(&value).expect_err("blank strings expected");
        assert!(issues.iter().any(|i| i.path == "versions.1.21.1.0.fork"));
        assert!(issues.iter().any(|i| i.path == "versions.1.21.1.0.notes"));
    }

    #[test]
    fn duplicate_ids_across_groups_name_id_and_first_group() {
        let value = json!({
            "updatedAt": "August 2026",
            "versions": {
                "1.19.1": [sample_build("dup")],
                "1.21.1": [sample_build("dup")]
            }
        });
        let issues = validate_catalog_value(&value).expect_err("duplicate id expected");
        let issue = issues
            .iter()
            .find(|i| i.message.contains("duplicate build id"))
            .expect("duplicate issue present");
        assert!(issue.message.contains("'dup'"));
        assert!(issue.message.contains("'1.19.1'"));
        assert!(issue.path.starts_with("versions.1.21.1"));
    }

    #[test]
    fn dotted_path_handles_root_and_nested_pointers() {
        assert_eq!(dotted_path(""), "$");
        assert_eq!(dotted_path("/updatedAt"), "updatedAt");
        assert_eq!(
            dotted_path("/versions/1.21.1/0/commit"),
            "versions.1.21.1.0.commit"
        );
    }
}

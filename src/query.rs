//! Pure query helpers over a flattened build collection.
//!
//! Everything here is synchronous and side-effect-free: callers own the
//! selection state and pass it in on every call together with the entry
//! slice, which is never mutated. Malformed version components degrade to 0
//! rather than erroring; this layer trusts upstream validation and prefers a
//! best-effort ordering over a failure.

use crate::catalog::{EnrichedBuild, McVersion, ModLoader};
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
/// Column an entry list can be ordered by.
pub enum SortKey {
    /// Missing dates sort before any present date.
    PublishedAt,
    /// Dotted-numeric order on the version group tag.
    McVersion,
    /// Plain string order: mod versions carry non-numeric suffixes, so
    /// lexicographic is deliberate here.
    ModVersion,
}

/// Compare two dotted version strings numerically, component by component.
///
/// Non-numeric or missing components count as 0. When all shared components
/// are equal the shorter string orders first, so `1.2` sorts before `1.2.0`.
/// This is a general dotted-numeric order, not semver; pre-release suffixes
/// get no special treatment.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<u64> = numeric_components(a);
    let right: Vec<u64> = numeric_components(b);
    for (l, r) in left.iter().zip(right.iter()) {
        match l.cmp(r) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }
    left.len().cmp(&right.len())
}

fn numeric_components(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|part| part.parse::<u64>().unwrap_or(0))
        .collect()
}

/// Distinct version group tags across the entries, in version order.
pub fn mc_version_facet(entries: &[EnrichedBuild], direction: SortDirection) -> Vec<McVersion> {
    let distinct: BTreeSet<McVersion> = entries.iter().map(|e| e.mc_version.clone()).collect();
    let mut versions: Vec<McVersion> = distinct.into_iter().collect();
    versions.sort_by(|a, b| directed(compare_versions(&a.0, &b.0), direction));
    versions
}

/// Distinct loaders across the entries, in lexicographic order.
pub fn loader_facet(entries: &[EnrichedBuild]) -> Vec<ModLoader> {
    let distinct: BTreeSet<ModLoader> = entries
        .iter()
        .flat_map(|e| e.build.mod_loader.iter().copied())
        .collect();
    distinct.into_iter().collect()
}

/// Distinct extension identifiers across the entries, in lexicographic order.
pub fn extension_facet(entries: &[EnrichedBuild]) -> Vec<String> {
    let distinct: BTreeSet<String> = entries
        .iter()
        .flat_map(|e| e.build.extensions.iter().cloned())
        .collect();
    distinct.into_iter().collect()
}

#[derive(Clone, Debug, Default)]
/// Guided-narrowing criteria. `None` (or an empty extension list) means the
/// criterion is unset and matches everything; a sentinel empty string would
/// be ambiguous, so absence is explicit.
pub struct BuildFilter {
    pub mc_version: Option<McVersion>,
    pub loader: Option<ModLoader>,
    /// All-of semantics: an entry matches only when its extension set
    /// contains every name listed here.
    pub extensions: Vec<String>,
}

impl BuildFilter {
    pub fn matches(&self, entry: &EnrichedBuild) -> bool {
        if let Some(version) = &self.mc_version {
            if &entry.mc_version != version {
                return false;
            }
        }
        if let Some(loader) = self.loader {
            if !entry.build.mod_loader.contains(&loader) {
                return false;
            }
        }
        self.extensions
            .iter()
            .all(|required| entry.build.extensions.iter().any(|e| e == required))
    }
}

/// Apply the guided filter, keeping the original entry order.
pub fn filter_builds<'a>(entries: &'a [EnrichedBuild], filter: &BuildFilter) -> Vec<&'a EnrichedBuild> {
    entries.iter().filter(|entry| filter.matches(entry)).collect()
}

/// Case-insensitive substring test over a fixed field list.
///
/// The haystack is the space-joined concatenation of group tag, mod version,
/// fork, repo, release type, loaders, extensions, and notes. An empty query
/// matches every entry. No tokenization, no ranking.
pub fn matches_query(entry: &EnrichedBuild, query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    search_haystack(entry).contains(&needle)
}

/// Apply the free-text search, keeping the original entry order.
pub fn search_builds<'a>(entries: &'a [EnrichedBuild], query: &str) -> Vec<&'a EnrichedBuild> {
    entries.iter().filter(|entry| matches_query(entry, query)).collect()
}

fn search_haystack(entry: &EnrichedBuild) -> String {
    let build = &entry.build;
    let loaders = build
        .mod_loader
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let extensions = build.extensions.join(" ");
    [
        entry.mc_version.0.as_str(),
        build.mod_version.as_str(),
        build.fork.as_str(),
        build.repo.as_str(),
        build.release_type.as_str(),
        loaders.as_str(),
        extensions.as_str(),
        build.notes.as_deref().unwrap_or(""),
    ]
    .join(" ")
    .to_lowercase()
}

/// Produce a new sequence ordered by `key`, stable for equal-key entries.
pub fn sort_builds(
    entries: &[EnrichedBuild],
    key: SortKey,
    direction: SortDirection,
) -> Vec<EnrichedBuild> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| directed(compare_by_key(a, b, key), direction));
    sorted
}

fn compare_by_key(a: &EnrichedBuild, b: &EnrichedBuild, key: SortKey) -> Ordering {
    match key {
        // YYYY-MM-DD compares chronologically as a string; None < Some puts
        // undated builds before any dated build.
        SortKey::PublishedAt => a
            .build
            .published_at
            .as_deref()
            .cmp(&b.build.published_at.as_deref()),
        SortKey::McVersion => compare_versions(&a.mc_version.0, &b.mc_version.0),
        SortKey::ModVersion => a.build.mod_version.cmp(&b.build.mod_version),
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

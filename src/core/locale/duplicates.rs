//! Duplicate-value detection and removal.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    core::locale::{marker::PendingMarker, tree::LocaleTree},
    utils::normalize_whitespace,
};

/// Keys of one tree whose values read the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub value: String,
    /// In file order. The first key is the one that survives removal.
    pub keys: Vec<String>,
}

impl DuplicateGroup {
    pub fn kept_key(&self) -> &str {
        &self.keys[0]
    }

    pub fn redundant_keys(&self) -> &[String] {
        &self.keys[1..]
    }
}

/// Groups of keys whose values are identical once the pending marker is
/// stripped and whitespace normalized. Empty values are not grouped.
pub fn find_duplicate_values(tree: &LocaleTree, marker: &PendingMarker) -> Vec<DuplicateGroup> {
    let mut by_value: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in tree.text_entries() {
        let normalized = normalize_whitespace(marker.strip(value));
        if normalized.is_empty() {
            continue;
        }
        by_value.entry(normalized).or_default().push(key);
    }

    by_value
        .into_iter()
        .filter(|(_, keys)| keys.len() > 1)
        .map(|(value, keys)| DuplicateGroup { value, keys })
        .collect()
}

/// A copy of `tree` without the redundant keys of every group.
///
/// Sections left empty by a removal are pruned. Returns the keys that were
/// actually present and removed.
pub fn remove_duplicates(tree: &LocaleTree, groups: &[DuplicateGroup]) -> (LocaleTree, Vec<String>) {
    let mut cleaned = tree.clone();
    let mut removed = Vec::new();
    for group in groups {
        for key in group.redundant_keys() {
            if cleaned.remove(key).is_some() {
                removed.push(key.clone());
            }
        }
    }
    (cleaned, removed)
}

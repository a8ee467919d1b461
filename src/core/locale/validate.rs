//! Validation report over a project's locale trees.
//!
//! Findings here are not errors: missing, untranslated and orphan keys are
//! listed per language for a human to act on.

use std::{collections::HashSet, path::PathBuf};

use serde::Serialize;

use crate::core::locale::{
    duplicates::{DuplicateGroup, find_duplicate_values},
    marker::PendingMarker,
    tree::LocaleTree,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageReport {
    pub lang: String,
    pub file: PathBuf,
    pub file_exists: bool,
    pub is_source: bool,
    /// Number of leaves in this language's file.
    pub total: usize,
    /// Present in the source language, absent here.
    pub missing: Vec<String>,
    /// Present here but still carrying the pending marker.
    pub untranslated: Vec<String>,
    /// Present here, absent from the source language.
    pub orphaned: Vec<String>,
}

impl LanguageReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.untranslated.is_empty() && self.orphaned.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub source_language: String,
    pub languages: Vec<LanguageReport>,
    /// Duplicate values inside the source-language tree.
    pub duplicates: Vec<DuplicateGroup>,
}

impl ValidationReport {
    pub fn missing_count(&self) -> usize {
        self.languages.iter().map(|l| l.missing.len()).sum()
    }

    pub fn untranslated_count(&self) -> usize {
        self.languages.iter().map(|l| l.untranslated.len()).sum()
    }

    pub fn orphaned_count(&self) -> usize {
        self.languages.iter().map(|l| l.orphaned.len()).sum()
    }

    pub fn has_missing(&self) -> bool {
        self.missing_count() > 0
    }
}

/// One language's input to [`build_report`]. `tree` is `None` when the
/// language file does not exist.
pub struct LanguageInput {
    pub lang: String,
    pub file: PathBuf,
    pub tree: Option<LocaleTree>,
}

/// Compare every language against the source language.
///
/// A language without a file reports every source key as missing. The
/// source itself can only have untranslated entries (keys backfilled from
/// another language that still wait for source text).
pub fn build_report(
    source_language: &str,
    inputs: &[LanguageInput],
    marker: &PendingMarker,
) -> ValidationReport {
    let empty = LocaleTree::new();
    let source_tree = inputs
        .iter()
        .find(|input| input.lang == source_language)
        .and_then(|input| input.tree.as_ref())
        .unwrap_or(&empty);
    let source_keys: HashSet<String> = source_tree.leaf_keys().into_iter().collect();

    let languages = inputs
        .iter()
        .map(|input| {
            let tree = input.tree.as_ref().unwrap_or(&empty);
            let is_source = input.lang == source_language;
            let keys: HashSet<String> = tree.leaf_keys().into_iter().collect();

            let mut untranslated: Vec<String> = tree
                .text_entries()
                .into_iter()
                .filter(|(_, value)| marker.is_pending(value))
                .map(|(key, _)| key)
                .collect();
            untranslated.sort();

            let (mut missing, mut orphaned) = if is_source {
                (Vec::new(), Vec::new())
            } else {
                (
                    source_keys.difference(&keys).cloned().collect::<Vec<_>>(),
                    keys.difference(&source_keys).cloned().collect::<Vec<_>>(),
                )
            };
            missing.sort();
            orphaned.sort();

            LanguageReport {
                lang: input.lang.clone(),
                file: input.file.clone(),
                file_exists: input.tree.is_some(),
                is_source,
                total: keys.len(),
                missing,
                untranslated,
                orphaned,
            }
        })
        .collect();

    ValidationReport {
        source_language: source_language.to_string(),
        languages,
        duplicates: find_duplicate_values(source_tree, marker),
    }
}

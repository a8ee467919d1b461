//! On-disk locale files: `<locales_dir>/<lang>.json`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    core::{
        keygen::KeyMapping,
        locale::{
            duplicates::{DuplicateGroup, find_duplicate_values, remove_duplicates},
            marker::PendingMarker,
            sync::{LanguageSync, sync_trees},
            tree::{KeyAction, LocaleTree},
            validate::{LanguageInput, ValidationReport, build_report},
        },
    },
    utils::{build_line_index, offset_to_line, write_atomic},
};

/// File stems in the locales directory that are not languages.
const NON_LANGUAGE_STEMS: &[&str] = &["index", "config"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageWrite {
    pub lang: String,
    pub added: Vec<String>,
    /// Keys whose path is occupied by a value of a different shape.
    pub blocked: Vec<String>,
    pub created: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub languages: Vec<LanguageSync>,
    /// Whether the merged trees were written back.
    pub applied: bool,
}

impl SyncSummary {
    pub fn total_added(&self) -> usize {
        self.languages.iter().map(|l| l.added.len()).sum()
    }

    pub fn changed_languages(&self) -> Vec<&str> {
        self.languages
            .iter()
            .filter(|l| l.changed())
            .map(|l| l.lang.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupeSummary {
    pub groups: Vec<DuplicateGroup>,
    /// `(lang, removed keys)` for each language file touched.
    pub removed: Vec<(String, Vec<String>)>,
    pub applied: bool,
}

/// Reads and writes the locale files of one project.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    dir: PathBuf,
    marker: PendingMarker,
}

impl LocaleStore {
    pub fn new(dir: impl Into<PathBuf>, marker: PendingMarker) -> Self {
        Self {
            dir: dir.into(),
            marker,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn marker(&self) -> &PendingMarker {
        &self.marker
    }

    pub fn path_for(&self, lang: &str) -> PathBuf {
        self.dir.join(format!("{}.json", lang))
    }

    /// Language codes with a file in the locales directory, sorted.
    pub fn languages(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut languages = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read directory: {}", self.dir.display()))?
        {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && !NON_LANGUAGE_STEMS.contains(&stem)
            {
                languages.push(stem.to_string());
            }
        }
        languages.sort();
        Ok(languages)
    }

    /// Load one language. A missing or blank file is an empty tree.
    pub fn load(&self, lang: &str) -> Result<LocaleTree> {
        Ok(self.load_existing(lang)?.unwrap_or_default())
    }

    /// Load one language, `None` when its file does not exist.
    pub fn load_existing(&self, lang: &str) -> Result<Option<LocaleTree>> {
        let path = self.path_for(lang);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Some(LocaleTree::new()));
        }
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
        if !value.is_object() {
            bail!("Root of JSON file must be an object: {}", path.display());
        }
        let tree = serde_json::from_value(value)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
        Ok(Some(tree))
    }

    /// Load several languages, keeping the given order.
    pub fn load_all(&self, languages: &[String]) -> Result<IndexMap<String, LocaleTree>> {
        languages
            .iter()
            .map(|lang| Ok((lang.clone(), self.load(lang)?)))
            .collect()
    }

    /// Write a tree with 2-space indentation and a trailing newline.
    pub fn save(&self, lang: &str, tree: &LocaleTree) -> Result<()> {
        let path = self.path_for(lang);
        let content = serde_json::to_string_pretty(tree).context("Failed to serialize JSON")?;
        write_atomic(&path, &format!("{}\n", content))?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Make sure every key of `mapping` exists in every language.
    ///
    /// The source language gets the literal text, every other language the
    /// marked text. Existing values are never touched; missing files are
    /// created.
    pub fn write_keys_to_languages(
        &self,
        mapping: &KeyMapping,
        languages: &[String],
        source_language: &str,
    ) -> Result<Vec<LanguageWrite>> {
        let mut writes = Vec::new();
        for lang in with_source(languages, source_language) {
            let existing = self.load_existing(&lang)?;
            let created = existing.is_none();
            let mut tree = existing.unwrap_or_default();
            let mut write = LanguageWrite {
                lang: lang.clone(),
                created,
                ..Default::default()
            };

            for (key, entry) in mapping.iter() {
                let value = if lang == source_language {
                    entry.text.clone()
                } else {
                    self.marker.wrap(&entry.text)
                };
                match tree.insert_if_absent(key, &value) {
                    KeyAction::Added => write.added.push(key.clone()),
                    KeyAction::Blocked => write.blocked.push(key.clone()),
                    KeyAction::Updated | KeyAction::Unchanged => {}
                }
            }

            if created || !write.added.is_empty() {
                self.save(&lang, &tree)?;
            }
            tracing::info!("{}: {} keys added", lang, write.added.len());
            writes.push(write);
        }
        Ok(writes)
    }

    /// Give every language the union of all keys. Only changed files are
    /// written, and only when `apply` is set.
    pub fn sync_all_keys(
        &self,
        languages: &[String],
        source_language: &str,
        apply: bool,
    ) -> Result<SyncSummary> {
        let languages = with_source(languages, source_language);
        let trees = self.load_all(&languages)?;
        let (merged, reports) = sync_trees(&trees, source_language, &self.marker);

        if apply {
            for report in &reports {
                let file_missing = !self.path_for(&report.lang).exists();
                if (report.changed() || file_missing)
                    && let Some(tree) = merged.get(&report.lang)
                {
                    self.save(&report.lang, tree)?;
                }
            }
        }
        for report in &reports {
            for key in &report.conflicts {
                tracing::warn!("{}: '{}' has a different shape than in other languages", report.lang, key);
            }
        }

        Ok(SyncSummary {
            languages: reports,
            applied: apply,
        })
    }

    /// Duplicate values of the source language, optionally removed from
    /// every language so all files keep the same keys.
    pub fn dedupe(
        &self,
        languages: &[String],
        source_language: &str,
        apply: bool,
    ) -> Result<DedupeSummary> {
        let source = self.load(source_language)?;
        let groups = find_duplicate_values(&source, &self.marker);
        let mut summary = DedupeSummary {
            groups,
            removed: Vec::new(),
            applied: apply,
        };
        if !apply || summary.groups.is_empty() {
            return Ok(summary);
        }

        for lang in with_source(languages, source_language) {
            let Some(tree) = self.load_existing(&lang)? else {
                continue;
            };
            let (cleaned, removed) = remove_duplicates(&tree, &summary.groups);
            if !removed.is_empty() {
                self.save(&lang, &cleaned)?;
                summary.removed.push((lang, removed));
            }
        }
        Ok(summary)
    }

    /// Compare every language against the source language.
    pub fn validate(&self, languages: &[String], source_language: &str) -> Result<ValidationReport> {
        let mut inputs = Vec::new();
        for lang in with_source(languages, source_language) {
            inputs.push(LanguageInput {
                file: self.path_for(&lang),
                tree: self.load_existing(&lang)?,
                lang,
            });
        }
        Ok(build_report(source_language, &inputs, &self.marker))
    }
}

/// `languages` with the source language first and no repeats.
pub fn with_source(languages: &[String], source_language: &str) -> Vec<String> {
    let mut ordered = vec![source_language.to_string()];
    for lang in languages {
        if !ordered.contains(lang) {
            ordered.push(lang.clone());
        }
    }
    ordered
}

/// Locates dotted keys inside the raw text of a locale file.
pub struct KeyLocator {
    content: String,
    line_index: Vec<usize>,
}

impl KeyLocator {
    pub fn open(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        let line_index = build_line_index(&content);
        Some(Self {
            content,
            line_index,
        })
    }

    pub fn line_of(&self, key: &str) -> usize {
        find_key_line(&self.content, key, &self.line_index)
    }
}

/// Find the line number where a key appears in the JSON content.
///
/// Searches for each key part in sequence, so `auth.title` finds the
/// `"title"` that comes after `"auth"`, not one in another section. Only
/// matches followed by `:` count as keys. Returns 1 when not found.
pub fn find_key_line(content: &str, key_path: &str, line_index: &[usize]) -> usize {
    let mut search_start = 0;
    for part in key_path.split('.') {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();
            if remaining[after_pattern..].trim_start().starts_with(':') {
                search_start += after_pattern;
                found = true;
                break;
            }
            pos = abs_pos + 1;
        }

        if !found {
            break;
        }
    }

    if search_start > 0 {
        offset_to_line(line_index, search_start)
    } else {
        1
    }
}

//! Deterministic translation-key assignment.
//!
//! Keys have the shape `section.keyName`. The section comes from the file
//! path, the key name from the first capitalized words of the text.

use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
    sync::LazyLock,
};

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::{
    core::{
        extract::Candidate,
        locale::{LocaleTree, PendingMarker},
        patterns::TextContext,
    },
    utils::normalize_whitespace,
};

pub const DEFAULT_SECTION: &str = "common";
pub const FALLBACK_KEY_NAME: &str = "text";
const MAX_KEY_WORDS: usize = 3;

/// Path keyword to section, first match wins.
const SECTION_RULES: &[(&str, &str)] = &[
    ("nav", "nav"),
    ("footer", "footer"),
    ("header", "header"),
    ("home", "home"),
    ("about", "about"),
    ("contact", "contact"),
    ("auth", "auth"),
    ("login", "auth"),
    ("signup", "auth"),
    ("register", "auth"),
    ("form", "form"),
    ("button", "button"),
    ("modal", "modal"),
    ("dialog", "modal"),
    ("settings", "settings"),
    ("profile", "profile"),
    ("dashboard", "dashboard"),
];

static CAPITALIZED_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+").unwrap());

/// Section for a source path, from the keyword table above.
///
/// ```
/// use locsmith::core::keygen::section_for_path;
///
/// assert_eq!(section_for_path("pages/auth/Login.tsx"), "auth");
/// assert_eq!(section_for_path("components/LoginForm.tsx"), "auth");
/// assert_eq!(section_for_path("lib/Widget.tsx"), "common");
/// ```
pub fn section_for_path(rel_path: &str) -> &'static str {
    let lower = rel_path.to_lowercase();
    SECTION_RULES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map_or(DEFAULT_SECTION, |(_, section)| section)
}

/// Up to three capitalized words, lower-cased and joined.
///
/// ```
/// use locsmith::core::keygen::base_key_name;
///
/// assert_eq!(base_key_name("Welcome Back Friend, Again"), "welcomebackfriend");
/// assert_eq!(base_key_name("only lower case"), "text");
/// ```
pub fn base_key_name(text: &str) -> String {
    let words: Vec<String> = CAPITALIZED_WORD
        .find_iter(text)
        .take(MAX_KEY_WORDS)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    if words.is_empty() {
        FALLBACK_KEY_NAME.to_string()
    } else {
        words.concat()
    }
}

/// One place a keyed text occurs in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub file: PathBuf,
    pub rel_path: String,
    pub line: usize,
    pub context: TextContext,
}

impl From<&Candidate> for Occurrence {
    fn from(candidate: &Candidate) -> Self {
        Self {
            file: candidate.file.clone(),
            rel_path: candidate.rel_path.clone(),
            line: candidate.line,
            context: candidate.context,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEntry {
    /// Whitespace-normalized text.
    pub text: String,
    /// File of the first occurrence.
    pub file: PathBuf,
    pub context: TextContext,
    pub section: String,
    pub key_name: String,
    /// The key already existed in the source-language file for this text.
    pub reused: bool,
    pub occurrences: Vec<Occurrence>,
}

impl KeyEntry {
    pub fn key(&self) -> String {
        format!("{}.{}", self.section, self.key_name)
    }
}

/// Different texts that reduced to the same base key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyCollision {
    pub base_key: String,
    /// `(key, text)` for every holder, first holder first.
    pub holders: Vec<(String, String)>,
}

/// Bridge between detection and the locale files / rewriter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMapping {
    entries: IndexMap<String, KeyEntry>,
    collisions: Vec<KeyCollision>,
}

impl KeyMapping {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&KeyEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &KeyEntry)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn collisions(&self) -> &[KeyCollision] {
        &self.collisions
    }

    /// Split into the entries whose key passes `keep` and the keys that do not.
    pub fn partition(&self, keep: impl Fn(&str) -> bool) -> (KeyMapping, Vec<String>) {
        let mut kept = KeyMapping {
            entries: IndexMap::new(),
            collisions: self.collisions.clone(),
        };
        let mut dropped = Vec::new();
        for (key, entry) in &self.entries {
            if keep(key) {
                kept.entries.insert(key.clone(), entry.clone());
            } else {
                dropped.push(key.clone());
            }
        }
        (kept, dropped)
    }

    /// Per file, per context: normalized text to key. Files in first-seen order.
    pub fn by_file(&self) -> IndexMap<PathBuf, HashMap<TextContext, HashMap<String, String>>> {
        let mut files: IndexMap<PathBuf, HashMap<TextContext, HashMap<String, String>>> =
            IndexMap::new();
        for (key, entry) in &self.entries {
            for occurrence in &entry.occurrences {
                files
                    .entry(occurrence.file.clone())
                    .or_default()
                    .entry(occurrence.context)
                    .or_default()
                    .insert(entry.text.clone(), key.clone());
            }
        }
        files
    }
}

/// Assigns keys, optionally aware of the keys already in the source locale.
#[derive(Debug, Default)]
pub struct KeyGenerator {
    /// section -> normalized text -> key name, from the existing source tree.
    known: HashMap<String, HashMap<String, String>>,
    /// Every fully-qualified key of the existing source tree with its text.
    taken: HashMap<String, String>,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse keys of `source_tree` for texts it already holds and never hand
    /// out one of its keys for a different text.
    pub fn with_existing(source_tree: &LocaleTree, marker: &PendingMarker) -> Self {
        let mut generator = Self::new();
        for key in source_tree.leaf_keys() {
            let text = source_tree
                .get_text(&key)
                .map(|value| normalize_whitespace(marker.strip(value)))
                .unwrap_or_default();
            if let Some((section, key_name)) = key.split_once('.')
                && !key_name.contains('.')
                && !text.is_empty()
            {
                generator
                    .known
                    .entry(section.to_string())
                    .or_default()
                    .entry(text.clone())
                    .or_insert_with(|| key_name.to_string());
            }
            generator.taken.insert(key, text);
        }
        generator
    }

    pub fn generate(&self, candidates: &[Candidate]) -> KeyMapping {
        let mut entries: IndexMap<String, KeyEntry> = IndexMap::new();
        let mut key_by_text: HashMap<String, String> = HashMap::new();
        let mut used: HashSet<String> = self.taken.keys().cloned().collect();
        let mut holders: IndexMap<String, Vec<(String, String)>> = IndexMap::new();

        for candidate in candidates {
            let text = normalize_whitespace(&candidate.text);
            if let Some(key) = key_by_text.get(&text)
                && let Some(entry) = entries.get_mut(key)
            {
                entry.occurrences.push(Occurrence::from(candidate));
                continue;
            }

            let section = section_for_path(&candidate.rel_path).to_string();
            let (key_name, reused) = match self.known.get(&section).and_then(|t| t.get(&text)) {
                Some(existing) => (existing.clone(), true),
                None => {
                    let base = base_key_name(&text);
                    let base_key = format!("{}.{}", section, base);
                    let holder_list = holders.entry(base_key.clone()).or_default();
                    if holder_list.is_empty()
                        && let Some(existing_text) = self.taken.get(&base_key)
                    {
                        holder_list.push((base_key.clone(), existing_text.clone()));
                    }
                    let key_name = next_free_name(&section, &base, &used);
                    holder_list.push((format!("{}.{}", section, key_name), text.clone()));
                    (key_name, false)
                }
            };

            let entry = KeyEntry {
                text: text.clone(),
                file: candidate.file.clone(),
                context: candidate.context,
                section,
                key_name,
                reused,
                occurrences: vec![Occurrence::from(candidate)],
            };
            let key = entry.key();
            used.insert(key.clone());
            key_by_text.insert(text, key.clone());
            entries.insert(key, entry);
        }

        let collisions = holders
            .into_iter()
            .filter(|(_, list)| list.len() > 1)
            .map(|(base_key, holders)| KeyCollision { base_key, holders })
            .collect();

        tracing::debug!("Generated {} keys", entries.len());
        KeyMapping {
            entries,
            collisions,
        }
    }
}

fn next_free_name(section: &str, base: &str, used: &HashSet<String>) -> String {
    if !used.contains(&format!("{}.{}", section, base)) {
        return base.to_string();
    }
    let mut counter = 1;
    loop {
        let candidate = format!("{}{}", base, counter);
        if !used.contains(&format!("{}.{}", section, candidate)) {
            return candidate;
        }
        counter += 1;
    }
}

/// Keys for `candidates` with no knowledge of existing locale files.
pub fn generate_keys(candidates: &[Candidate]) -> KeyMapping {
    KeyGenerator::new().generate(candidates)
}

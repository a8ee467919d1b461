//! Structural synchronization of locale trees.
//!
//! Sync is a pure merge: [`build_master`] computes the union of every key
//! seen in any language together with its seed text, and [`apply_master`]
//! returns a new tree for one language holding every master key. Existing
//! values are never overwritten, except pending values whose seed text has
//! changed.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::locale::{
    marker::PendingMarker,
    tree::{LocaleNode, LocaleTree, join_key},
};

/// What [`apply_master`] did to one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSync {
    pub lang: String,
    pub added: Vec<String>,
    pub refreshed: Vec<String>,
    /// Keys that are a section in one language and a leaf in this one.
    pub conflicts: Vec<String>,
}

impl LanguageSync {
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.refreshed.is_empty()
    }
}

/// Union of the key shapes of all trees, seeded with source-language text.
///
/// The source tree is visited first so its shape and text win; keys only
/// present in other languages take their first-seen value. Seed texts never
/// carry the pending marker.
pub fn build_master(
    trees: &IndexMap<String, LocaleTree>,
    source_language: &str,
    marker: &PendingMarker,
) -> LocaleTree {
    let mut master = LocaleTree::new();
    if let Some(source) = trees.get(source_language) {
        merge_shape(&mut master, source, marker);
    }
    for (lang, tree) in trees {
        if lang != source_language {
            merge_shape(&mut master, tree, marker);
        }
    }
    master
}

fn merge_shape(master: &mut LocaleTree, tree: &LocaleTree, marker: &PendingMarker) {
    for (name, node) in tree.iter() {
        if master.child(name).is_none() {
            let seeded = match node {
                LocaleNode::Section(section) => {
                    let mut fresh = LocaleTree::new();
                    merge_shape(&mut fresh, section, marker);
                    LocaleNode::Section(fresh)
                }
                LocaleNode::Text(text) => LocaleNode::Text(marker.strip(text).to_string()),
                LocaleNode::Other(value) => LocaleNode::Other(value.clone()),
            };
            master.insert_child(name, seeded);
            continue;
        }

        if let (Some(LocaleNode::Section(existing)), LocaleNode::Section(section)) =
            (master.child_mut(name), node)
        {
            merge_shape(existing, section, marker);
        }
    }
}

/// Bring `target` up to the master shape, returning the merged tree.
///
/// Missing leaves are added as `marker + seed` in every language, the source
/// included: a key missing from the source was discovered in another
/// language and still needs source text from a human. Pending leaves of
/// non-source languages are re-seeded when the source text moved on.
pub fn apply_master(
    master: &LocaleTree,
    target: &LocaleTree,
    lang: &str,
    is_source: bool,
    marker: &PendingMarker,
) -> (LocaleTree, LanguageSync) {
    let mut merged = target.clone();
    let mut report = LanguageSync {
        lang: lang.to_string(),
        ..Default::default()
    };
    merge_into(master, &mut merged, "", is_source, marker, &mut report);
    (merged, report)
}

fn merge_into(
    master: &LocaleTree,
    target: &mut LocaleTree,
    prefix: &str,
    is_source: bool,
    marker: &PendingMarker,
    report: &mut LanguageSync,
) {
    for (name, master_node) in master.iter() {
        let key = join_key(prefix, name);

        if target.child(name).is_none() {
            let node = seed_node(master_node, &key, marker, report);
            target.insert_child(name, node);
            continue;
        }

        let Some(existing) = target.child_mut(name) else {
            continue;
        };
        match (master_node, existing) {
            (LocaleNode::Section(master_section), LocaleNode::Section(section)) => {
                merge_into(master_section, section, &key, is_source, marker, report);
            }
            (LocaleNode::Section(_), _) | (_, LocaleNode::Section(_)) => {
                report.conflicts.push(key);
            }
            (LocaleNode::Text(seed), LocaleNode::Text(value)) => {
                if !is_source && marker.is_pending(value) && marker.strip(value) != seed {
                    *value = marker.wrap(seed);
                    report.refreshed.push(key);
                }
            }
            _ => {}
        }
    }
}

fn seed_node(
    master_node: &LocaleNode,
    key: &str,
    marker: &PendingMarker,
    report: &mut LanguageSync,
) -> LocaleNode {
    match master_node {
        LocaleNode::Section(section) => {
            let mut fresh = LocaleTree::new();
            for (name, child) in section.iter() {
                let child_key = join_key(key, name);
                let node = seed_node(child, &child_key, marker, report);
                fresh.insert_child(name, node);
            }
            LocaleNode::Section(fresh)
        }
        LocaleNode::Text(seed) => {
            report.added.push(key.to_string());
            LocaleNode::Text(marker.wrap(seed))
        }
        LocaleNode::Other(value) => {
            report.added.push(key.to_string());
            LocaleNode::Other(value.clone())
        }
    }
}

/// Synchronize every tree against the union of all keys.
///
/// Returns the merged trees in input order together with one report per
/// language. Running it again on its own output changes nothing.
pub fn sync_trees(
    trees: &IndexMap<String, LocaleTree>,
    source_language: &str,
    marker: &PendingMarker,
) -> (IndexMap<String, LocaleTree>, Vec<LanguageSync>) {
    let master = build_master(trees, source_language, marker);
    let mut merged = IndexMap::new();
    let mut reports = Vec::new();
    for (lang, tree) in trees {
        let (tree, report) = apply_master(&master, tree, lang, lang == source_language, marker);
        merged.insert(lang.clone(), tree);
        reports.push(report);
    }
    (merged, reports)
}

//! Typed locale tree: a nested map of section names to text leaves.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One node of a locale file.
///
/// `Other` keeps non-string values (numbers, arrays, ...) that a hand-edited
/// file may contain, so loading and saving never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleNode {
    Text(String),
    Section(LocaleTree),
    Other(Value),
}

impl LocaleNode {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            LocaleNode::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, LocaleNode::Section(_))
    }
}

/// Outcome of inserting a leaf at a dotted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
    Unchanged,
    /// A leaf sits where a section is needed (or the other way round).
    Blocked,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Added => "added",
            KeyAction::Updated => "updated",
            KeyAction::Unchanged => "unchanged",
            KeyAction::Blocked => "blocked",
        }
    }
}

/// The content of one `<lang>.json` file. Key order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTree(IndexMap<String, LocaleNode>);

impl LocaleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree whose top level holds the given empty sections.
    pub fn with_sections<'a>(sections: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tree = Self::new();
        for section in sections {
            tree.0
                .insert(section.to_string(), LocaleNode::Section(LocaleTree::new()));
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LocaleNode)> {
        self.0.iter()
    }

    pub fn child(&self, name: &str) -> Option<&LocaleNode> {
        self.0.get(name)
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut LocaleNode> {
        self.0.get_mut(name)
    }

    pub(crate) fn insert_child(&mut self, name: &str, node: LocaleNode) {
        self.0.insert(name.to_string(), node);
    }

    /// Node at a dotted key such as `common.hello`.
    pub fn get(&self, key: &str) -> Option<&LocaleNode> {
        let mut parts = key.split('.');
        let mut node = self.0.get(parts.next()?)?;
        for part in parts {
            match node {
                LocaleNode::Section(section) => node = section.0.get(part)?,
                _ => return None,
            }
        }
        Some(node)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(LocaleNode::as_text)
    }

    /// True when a leaf (not a section) exists at `key`.
    pub fn contains_leaf(&self, key: &str) -> bool {
        self.get(key).is_some_and(|node| !node.is_section())
    }

    /// Set the text at `key`, creating intermediate sections.
    pub fn insert_text(&mut self, key: &str, value: &str) -> KeyAction {
        let parts: Vec<&str> = key.split('.').collect();
        insert_nested(self, &parts, value, true)
    }

    /// Like [`insert_text`](Self::insert_text) but never touches an existing leaf.
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> KeyAction {
        let parts: Vec<&str> = key.split('.').collect();
        insert_nested(self, &parts, value, false)
    }

    /// Remove the leaf at `key` and drop every section the removal emptied.
    pub fn remove(&mut self, key: &str) -> Option<LocaleNode> {
        let parts: Vec<&str> = key.split('.').collect();
        remove_nested(self, &parts)
    }

    /// Fully-qualified keys of every leaf, in file order.
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.walk("", &mut |key, _| keys.push(key.to_string()));
        keys
    }

    /// `(key, text)` for every string leaf, in file order.
    pub fn text_entries(&self) -> Vec<(String, &str)> {
        let mut entries = Vec::new();
        self.walk("", &mut |key, node| {
            if let LocaleNode::Text(text) = node {
                entries.push((key.to_string(), text.as_str()));
            }
        });
        entries
    }

    /// Visit every string leaf mutably.
    pub fn for_each_text_mut(&mut self, f: &mut impl FnMut(&str, &mut String)) {
        self.walk_mut("", f);
    }

    fn walk<'a>(&'a self, prefix: &str, f: &mut impl FnMut(&str, &'a LocaleNode)) {
        for (name, node) in &self.0 {
            let key = join_key(prefix, name);
            match node {
                LocaleNode::Section(section) => section.walk(&key, f),
                leaf => f(&key, leaf),
            }
        }
    }

    fn walk_mut(&mut self, prefix: &str, f: &mut impl FnMut(&str, &mut String)) {
        for (name, node) in self.0.iter_mut() {
            let key = join_key(prefix, name);
            match node {
                LocaleNode::Section(section) => section.walk_mut(&key, f),
                LocaleNode::Text(text) => f(&key, text),
                LocaleNode::Other(_) => {}
            }
        }
    }
}

pub(crate) fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn insert_nested(tree: &mut LocaleTree, path: &[&str], value: &str, overwrite: bool) -> KeyAction {
    let Some((first, rest)) = path.split_first() else {
        return KeyAction::Blocked;
    };

    if rest.is_empty() {
        if !tree.0.contains_key(*first) {
            tree.insert_child(first, LocaleNode::Text(value.to_string()));
            return KeyAction::Added;
        }
        return match tree.0.get_mut(*first) {
            None => KeyAction::Blocked,
            Some(LocaleNode::Section(_)) => KeyAction::Blocked,
            Some(LocaleNode::Text(existing)) if existing.as_str() == value => KeyAction::Unchanged,
            Some(node) => {
                if overwrite {
                    *node = LocaleNode::Text(value.to_string());
                    KeyAction::Updated
                } else {
                    KeyAction::Unchanged
                }
            }
        };
    }

    let next = tree
        .0
        .entry(first.to_string())
        .or_insert_with(|| LocaleNode::Section(LocaleTree::new()));
    match next {
        LocaleNode::Section(section) => insert_nested(section, rest, value, overwrite),
        _ => KeyAction::Blocked,
    }
}

fn remove_nested(tree: &mut LocaleTree, path: &[&str]) -> Option<LocaleNode> {
    let (first, rest) = path.split_first()?;

    if rest.is_empty() {
        let is_leaf = tree.0.get(*first).is_some_and(|node| !node.is_section());
        return if is_leaf {
            tree.0.shift_remove(*first)
        } else {
            None
        };
    }

    let LocaleNode::Section(section) = tree.0.get_mut(*first)? else {
        return None;
    };
    let removed = remove_nested(section, rest)?;
    if section.is_empty() {
        tree.0.shift_remove(*first);
    }
    Some(removed)
}

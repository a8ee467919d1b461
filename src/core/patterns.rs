//! The closed set of syntactic contexts text is extracted from, and how each
//! one is matched and rewritten.
//!
//! Extraction and rewriting share one compiled [`PatternSet`], so a rewrite
//! only ever touches text in the same position it was detected in.

use std::{collections::HashMap, fmt};

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde::Serialize;

use crate::{config::Config, utils::normalize_whitespace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TextContext {
    /// Text between two JSX tags: `<h1>Welcome</h1>`.
    #[serde(rename = "jsx_text")]
    JsxText,
    /// A quoted JSX attribute value: `placeholder="Your name"`.
    #[serde(rename = "jsx_attr")]
    Attribute,
    /// A quoted object property value: `label: "Save"`.
    #[serde(rename = "obj_property")]
    ObjectProperty,
}

impl TextContext {
    /// Extraction order inside a file.
    pub const ALL: [TextContext; 3] = [
        TextContext::JsxText,
        TextContext::Attribute,
        TextContext::ObjectProperty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextContext::JsxText => "jsx_text",
            TextContext::Attribute => "jsx_attr",
            TextContext::ObjectProperty => "obj_property",
        }
    }

    /// The source text that replaces one match once its text has a key.
    fn replacement(&self, caps: &Captures, key: &str) -> String {
        let call = format!("t(\"{}\")", key);
        match self {
            TextContext::JsxText => {
                let raw = caps.get(1).map_or("", |m| m.as_str());
                let leading = &raw[..raw.len() - raw.trim_start().len()];
                let trailing = &raw[raw.trim_end().len()..];
                format!(">{}{{{}}}{}<", leading, call, trailing)
            }
            TextContext::Attribute => {
                format!("{}{}={{{}}}", &caps[1], &caps[2], call)
            }
            TextContext::ObjectProperty => {
                format!("{}{}{}{}: {}", &caps[1], &caps[2], &caps[3], &caps[4], call)
            }
        }
    }
}

impl fmt::Display for TextContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One matched text inside a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMatch<'a> {
    /// The captured text, untrimmed.
    pub raw: &'a str,
    /// Byte offset of `raw` in the file.
    pub offset: usize,
}

/// Compiled extraction patterns for one configuration.
#[derive(Debug, Clone)]
pub struct PatternSet {
    jsx_text: Regex,
    attribute: Regex,
    object_property: Regex,
}

impl PatternSet {
    pub fn new(attributes: &[String], properties: &[String]) -> Result<Self> {
        let jsx_text = Regex::new(r">([^<>{}]+)<").context("Failed to compile JSX text pattern")?;

        let attribute = Regex::new(&format!(
            r#"(^|\s)({})\s*=\s*(?:"([^"\n]*)"|'([^'\n]*)')"#,
            alternation(attributes)
        ))
        .context("Failed to compile attribute pattern")?;

        let object_property = Regex::new(&format!(
            r#"(^|[\s{{,(])(["']?)({})(["']?)\s*:\s*(?:"([^"\n]*)"|'([^'\n]*)')"#,
            alternation(properties)
        ))
        .context("Failed to compile object property pattern")?;

        Ok(Self {
            jsx_text,
            attribute,
            object_property,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.text_attributes, &config.text_properties)
    }

    fn regex(&self, context: TextContext) -> &Regex {
        match context {
            TextContext::JsxText => &self.jsx_text,
            TextContext::Attribute => &self.attribute,
            TextContext::ObjectProperty => &self.object_property,
        }
    }

    /// Every text captured by `context` in `content`, in source order.
    pub fn find_all<'a>(&self, context: TextContext, content: &'a str) -> Vec<TextMatch<'a>> {
        self.regex(context)
            .captures_iter(content)
            .filter(|caps| !is_skipped_match(context, caps, content))
            .filter_map(|caps| text_group(context, &caps))
            .map(|m| TextMatch {
                raw: m.as_str(),
                offset: m.start(),
            })
            .collect()
    }

    /// Replace every `context` match whose normalized text has a key in
    /// `keys`. Returns the new content and the number of replacements.
    pub fn rewrite(
        &self,
        context: TextContext,
        content: &str,
        keys: &HashMap<String, String>,
    ) -> (String, usize) {
        let mut count = 0;
        let rewritten = self
            .regex(context)
            .replace_all(content, |caps: &Captures| {
                let whole = caps[0].to_string();
                if is_skipped_match(context, caps, content) {
                    return whole;
                }
                let Some(text) = text_group(context, caps) else {
                    return whole;
                };
                match keys.get(&normalize_whitespace(text.as_str())) {
                    Some(key) => {
                        count += 1;
                        context.replacement(caps, key)
                    }
                    None => whole,
                }
            })
            .into_owned();
        (rewritten, count)
    }
}

fn alternation(names: &[String]) -> String {
    names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|")
}

fn text_group<'a>(context: TextContext, caps: &Captures<'a>) -> Option<regex::Match<'a>> {
    match context {
        TextContext::JsxText => caps.get(1),
        TextContext::Attribute => caps.get(3).or_else(|| caps.get(4)),
        TextContext::ObjectProperty => caps.get(5).or_else(|| caps.get(6)),
    }
}

/// `=>` and `->` end in `>` but never open JSX text.
fn is_skipped_match(context: TextContext, caps: &Captures, content: &str) -> bool {
    if context != TextContext::JsxText {
        return false;
    }
    let Some(whole) = caps.get(0) else {
        return true;
    };
    matches!(content[..whole.start()].chars().last(), Some('=') | Some('-'))
        || whole.as_str()[1..whole.len() - 1].trim().is_empty()
}

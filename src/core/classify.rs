//! Decides whether a string literal is user-facing copy.
//!
//! The checks run cheapest-rejection first and never fail: anything that
//! does not look like natural-language UI text is rejected.

use std::sync::LazyLock;

use regex::{Regex, RegexSet};

use crate::utils::alphabetic_ratio;

const MAX_TEXT_CHARS: usize = 500;
const MIN_ALPHA_RATIO: f64 = 0.4;
const SINGLE_WORD_ALPHA_RATIO: f64 = 0.8;

/// Single characters that are commonly shown on their own in a UI.
const UI_GLYPHS: &[char] = &['?', '!', '×', '✓', '✔', '✕', '✗', '…', '←', '→', '•'];

/// One-word actions accepted even when written in lower case.
const COMMON_UI_WORDS: &[&str] = &[
    "ok", "yes", "no", "save", "cancel", "delete", "edit", "close", "submit", "back", "next",
    "previous", "continue", "confirm", "apply", "reset", "search", "login", "logout", "register",
    "send", "add", "remove", "update", "create", "done", "retry", "open", "more", "less",
    "loading", "help", "settings", "profile", "upload", "download", "share", "copy", "accept",
    "decline", "skip", "finish", "start", "stop", "refresh", "undo", "redo", "view", "details",
];

static CODE_MARKERS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"===|!==|==|!=|&&|\|\||=>|\?\.",
        r"(?m)^\s*(?:if|else|return|case|switch|const|let|var|function|import|export|await|typeof|throw)(?:\s|\(|$)",
        r"\b(?:const|let|var)\s+[A-Za-z_$][\w$]*\s*=",
        r"[A-Za-z_$][\w$]*\.[A-Za-z_$][\w$]*\(",
        r"^[A-Za-z_$][\w$]*\(",
        r"[\w\])]\[",
        r"[{}]",
        r";(?:\s|$)",
        r"^[A-Za-z_$][\w$.]*\s*=\s*\S",
        r"\s=\s",
        r"\?\s*['\x22`][^'\x22`]*['\x22`]\s*:",
    ])
    .unwrap()
});

static IDENTIFIER_SHAPES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // lowercase, snake_case
        r"^[a-z][a-z0-9_]*$",
        // ALL_CAPS
        r"^[A-Z][A-Z0-9_]+$",
        // camelCase
        r"^[a-z]+[A-Z][A-Za-z0-9]*$",
        // PascalCase compounds
        r"^[A-Z][a-z0-9]+[A-Z][A-Za-z0-9]*$",
        r"^[A-Za-z0-9]*_[A-Za-z0-9_]*$",
        // kebab-case
        r"^[a-z0-9]+(?:-[a-z0-9]+)+$",
        // dotted keys
        r"^[A-Za-z_][\w]*(?:\.[\w]+)+$",
    ])
    .unwrap()
});

static TECHNICAL_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // utility-class prefixes
        r"^-?(?:bg|text|font|flex|grid|p|px|py|pt|pb|pl|pr|m|mx|my|mt|mb|ml|mr|w|h|min-w|min-h|max-w|max-h|border|rounded|shadow|gap|space-[xy]|items|justify|self|overflow|z|top|bottom|left|right|inset|opacity|transition|duration|ease|cursor|hover|focus|active|disabled|sm|md|lg|xl|2xl|dark|col|row|ring|outline|leading|tracking|whitespace|animate|translate|scale|rotate|fill|stroke|object|aspect|divide|place|order|basis|grow|shrink)[-:]",
        // file extensions
        r"(?i)\.(?:tsx?|jsx?|mjs|css|scss|sass|less|json|html?|svg|png|jpe?g|gif|webp|ico|md|txt|pdf|woff2?|ttf|mp4|mp3|xml|ya?ml|csv)$",
        // paths
        r"^(?:\.{1,2}/|/|~/|[A-Za-z]:\\)",
        r"^[a-z0-9_.@-]+(?:/[a-z0-9_.@\[\]-]+)+/?$",
        // urls, mail, anchors
        r"^[a-zA-Z][a-zA-Z0-9+.-]*://",
        r"^(?:www\.|mailto:|tel:)",
        r"^[\w.+-]+@[\w-]+\.[\w.]+$",
        // colors
        r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$",
        r"^(?:rgba?|hsla?)\(",
        // http methods
        r"^(?:GET|POST|PUT|PATCH|DELETE|HEAD|OPTIONS)$",
        // already looked up
        r"(?:^|[^\w$])\$?t\(\s*[\x22'`]",
        // uuids, hashes
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        r"^[0-9a-fA-F]{16,}$",
        // numbers, css lengths
        r"^[-+]?\d[\d,.\s]*%?$",
        r"^-?\d*\.?\d+(?:px|em|rem|vh|vw|vmin|vmax|%|s|ms|deg|fr|pt|ch)$",
        // css / html / js keywords
        r"^(?:none|auto|inherit|initial|unset|block|inline|inline-block|flex|grid|hidden|visible|absolute|relative|fixed|sticky|static|center|left|right|top|bottom|bold|normal|italic|underline|pointer|transparent|solid|dashed|true|false|null|undefined|_blank|_self)$",
        r"^(?:noopener|noreferrer|nofollow)(?:\s+(?:noopener|noreferrer|nofollow))*$",
        // date format tokens
        r"^(?:Y{2,4}|M{1,4}|D{1,4}|d{1,4}|H{1,2}|h{1,2}|m{1,2}|s{1,2})(?:[-/.: ]+(?:Y{2,4}|M{1,4}|D{1,4}|d{1,4}|H{1,2}|h{1,2}|m{1,2}|s{1,2}|A|a))+$",
    ])
    .unwrap()
});

static CLASS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!?-?[a-z0-9][a-z0-9:/\[\]().#%_-]*$").unwrap());

/// Returns true if `text` reads like natural-language UI copy.
///
/// # Examples
///
/// ```
/// use locsmith::core::classify::is_user_facing_text;
///
/// assert!(is_user_facing_text("Welcome back"));
/// assert!(is_user_facing_text("Save"));
/// assert!(!is_user_facing_text("flex items-center"));
/// assert!(!is_user_facing_text("#ff0000"));
/// assert!(!is_user_facing_text("userName"));
/// ```
pub fn is_user_facing_text(text: &str) -> bool {
    let text = text.trim();
    let char_count = text.chars().count();

    if char_count == 0 || char_count > MAX_TEXT_CHARS {
        return false;
    }
    if char_count == 1 {
        return text
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || UI_GLYPHS.contains(&c));
    }

    if CODE_MARKERS.is_match(text) || has_unbalanced_parens(text) {
        return false;
    }

    let single_word = !text.contains(char::is_whitespace);
    let common_word = single_word && is_common_ui_word(text);
    if single_word && !common_word && IDENTIFIER_SHAPES.is_match(text) {
        return false;
    }

    if TECHNICAL_PATTERNS.is_match(text) || looks_like_class_list(text) {
        return false;
    }

    let ratio = alphabetic_ratio(text);
    if ratio < MIN_ALPHA_RATIO {
        return false;
    }

    if !single_word {
        return true;
    }

    common_word || (starts_like_copy(text) && ratio >= SINGLE_WORD_ALPHA_RATIO)
}

fn is_common_ui_word(text: &str) -> bool {
    COMMON_UI_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(text))
}

/// Upper-case initial, or a script without letter case (CJK, Arabic, ...).
fn starts_like_copy(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || (c.is_alphabetic() && !c.is_lowercase()))
}

fn has_unbalanced_parens(text: &str) -> bool {
    let open = text.matches('(').count();
    let close = text.matches(')').count();
    open != close
}

/// `"flex items-center gap-2"`: every token is class-like and at least one
/// carries a `-` or `:` modifier.
fn looks_like_class_list(text: &str) -> bool {
    let mut tokens = text.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return false;
    }
    let mut has_modifier = false;
    for token in tokens {
        if !CLASS_TOKEN.is_match(token) {
            return false;
        }
        has_modifier |= token.contains('-') || token.contains(':');
    }
    has_modifier
}

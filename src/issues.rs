//! Reportable findings.
//!
//! Stage results (detection, key generation, validation, translation,
//! rewriting) are turned into [`Issue`]s so the CLI can print them in one
//! format. Each issue carries everything the reporter needs.

use std::path::Path;

use enum_dispatch::enum_dispatch;

use crate::{
    core::{
        extract::{Candidate, DetectResult},
        keygen::KeyMapping,
        locale::{KeyLocator, LocaleStore, ValidationReport},
        patterns::TextContext,
        rewrite::RewriteReport,
        translate::FillStats,
    },
    utils::display_path,
};

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    HardcodedText,
    MissingKey,
    Untranslated,
    OrphanKey,
    DuplicateValue,
    KeyCollision,
    TranslationFailed,
    SkippedFile,
    BackupFailed,
    UnwrittenKey,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::HardcodedText => write!(f, "hardcoded"),
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::Untranslated => write!(f, "untranslated"),
            Rule::OrphanKey => write!(f, "orphan-key"),
            Rule::DuplicateValue => write!(f, "duplicate-value"),
            Rule::KeyCollision => write!(f, "key-collision"),
            Rule::TranslationFailed => write!(f, "translation-failed"),
            Rule::SkippedFile => write!(f, "skipped-file"),
            Rule::BackupFailed => write!(f, "backup-failed"),
            Rule::UnwrittenKey => write!(f, "unwritten-key"),
        }
    }
}

// ============================================================
// Locations
// ============================================================

/// A position in a source file, with the line's text for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub source_line: String,
}

impl SourceContext {
    pub fn from_candidate(candidate: &Candidate, root: &Path) -> Self {
        Self {
            file_path: display_path(root, &candidate.file),
            line: candidate.line,
            col: candidate.col,
            source_line: candidate.source_line.clone(),
        }
    }
}

/// A key inside a locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub file_path: String,
    pub line: usize,
    pub key: String,
}

// ============================================================
// Issue Types
// ============================================================

/// User-facing text written directly in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardcodedTextIssue {
    pub context: SourceContext,
    pub text: String,
    pub text_context: TextContext,
}

/// Key of the source language absent from other languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    /// Where the key lives in the source-language file.
    pub context: MessageContext,
    pub missing_in: Vec<String>,
}

/// Value still carrying the pending-translation marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    pub context: MessageContext,
    pub lang: String,
}

/// Key present in a language but not in the source language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanKeyIssue {
    pub context: MessageContext,
    pub lang: String,
}

/// Several source-language keys holding the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateValueIssue {
    /// Location of the key that would be kept.
    pub context: MessageContext,
    pub value: String,
    pub redundant: Vec<String>,
}

/// Different texts that reduced to the same base key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollisionIssue {
    pub base_key: String,
    /// `(assigned key, text)` in assignment order.
    pub holders: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFailedIssue {
    pub context: MessageContext,
    pub lang: String,
    pub error: String,
}

/// Source file that could not be read during detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFileIssue {
    pub file_path: String,
    pub reason: String,
}

/// Source file left unchanged because it could not be backed up or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFailedIssue {
    pub file_path: String,
    pub reason: String,
}

/// Key the source locale file does not hold; its texts were not rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwrittenKeyIssue {
    pub key: String,
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    HardcodedText(HardcodedTextIssue),
    MissingKey(MissingKeyIssue),
    Untranslated(UntranslatedIssue),
    OrphanKey(OrphanKeyIssue),
    DuplicateValue(DuplicateValueIssue),
    KeyCollision(KeyCollisionIssue),
    TranslationFailed(TranslationFailedIssue),
    SkippedFile(SkippedFileIssue),
    BackupFailed(BackupFailedIssue),
    UnwrittenKey(UnwrittenKeyIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

pub enum ReportLocation<'a> {
    /// Source code location, shown with the line and a caret.
    Source(&'a SourceContext),
    /// Locale file location.
    Message(&'a MessageContext),
    /// Whole file, no line.
    File { path: &'a str },
    /// Not tied to a file.
    Detached,
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message (text, key, error).
    fn message(&self) -> String;

    fn severity(&self) -> Severity;

    fn rule(&self) -> Rule;

    fn hint(&self) -> Option<&str> {
        None
    }

    /// Content of the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for HardcodedTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::HardcodedText
    }

    fn details(&self) -> Option<String> {
        Some(format!("context: {}", self.text_context))
    }
}

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn rule(&self) -> Rule {
        Rule::MissingKey
    }

    fn hint(&self) -> Option<&str> {
        Some("run `locsmith sync --apply` to add it")
    }

    fn details(&self) -> Option<String> {
        Some(format!("missing in: {}", self.missing_in.join(", ")))
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::Untranslated
    }

    fn details(&self) -> Option<String> {
        Some(format!("pending translation in {}", self.lang))
    }
}

impl Report for OrphanKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::OrphanKey
    }

    fn details(&self) -> Option<String> {
        Some(format!("in {} only, not in the source language", self.lang))
    }
}

impl Report for DuplicateValueIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.value.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::DuplicateValue
    }

    fn hint(&self) -> Option<&str> {
        Some("run `locsmith dedupe --apply` to keep only the first key")
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} also under: {}",
            self.context.key,
            self.redundant.join(", ")
        ))
    }
}

impl Report for KeyCollisionIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Detached
    }

    fn message(&self) -> String {
        self.base_key.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::KeyCollision
    }

    fn hint(&self) -> Option<&str> {
        Some("review these keys, different texts got numbered names")
    }

    fn details(&self) -> Option<String> {
        let holders: Vec<String> = self
            .holders
            .iter()
            .map(|(key, text)| format!("{} = \"{}\"", key, text))
            .collect();
        Some(holders.join("; "))
    }
}

impl Report for TranslationFailedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::TranslationFailed
    }

    fn details(&self) -> Option<String> {
        Some(format!("{}: {}", self.lang, self.error))
    }
}

impl Report for SkippedFileIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.reason.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::SkippedFile
    }
}

impl Report for BackupFailedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.reason.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn rule(&self) -> Rule {
        Rule::BackupFailed
    }

    fn hint(&self) -> Option<&str> {
        Some("the file was left unchanged")
    }
}

impl Report for UnwrittenKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Detached
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::UnwrittenKey
    }

    fn hint(&self) -> Option<&str> {
        Some("run `locsmith generate --apply` to add it to the locale files")
    }

    fn details(&self) -> Option<String> {
        Some("not in the source locale file, its texts were left as they are".to_string())
    }
}

// ============================================================
// Building issues from stage results
// ============================================================

pub fn detect_issues(result: &DetectResult, root: &Path) -> Vec<Issue> {
    let mut issues: Vec<Issue> = result
        .candidates
        .iter()
        .map(|candidate| {
            HardcodedTextIssue {
                context: SourceContext::from_candidate(candidate, root),
                text: candidate.text.clone(),
                text_context: candidate.context,
            }
            .into()
        })
        .collect();
    issues.extend(result.skipped.iter().map(|skipped| {
        Issue::from(SkippedFileIssue {
            file_path: display_path(root, &skipped.file),
            reason: skipped.reason.clone(),
        })
    }));
    issues
}

pub fn collision_issues(mapping: &KeyMapping) -> Vec<Issue> {
    mapping
        .collisions()
        .iter()
        .map(|collision| {
            KeyCollisionIssue {
                base_key: collision.base_key.clone(),
                holders: collision.holders.clone(),
            }
            .into()
        })
        .collect()
}

/// Missing keys are grouped per key and shown at their source-language
/// location; the other findings point into their own language file.
pub fn validation_issues(report: &ValidationReport, store: &LocaleStore, root: &Path) -> Vec<Issue> {
    let source_path = store.path_for(&report.source_language);
    let source_file = display_path(root, &source_path);
    let source_locator = KeyLocator::open(&source_path);
    let source_line = |key: &str| source_locator.as_ref().map_or(1, |l| l.line_of(key));

    let mut issues = Vec::new();
    let mut missing: indexmap::IndexMap<&str, Vec<String>> = indexmap::IndexMap::new();
    for lang in &report.languages {
        for key in &lang.missing {
            missing.entry(key.as_str()).or_default().push(lang.lang.clone());
        }

        let file_path = display_path(root, &lang.file);
        let locator = KeyLocator::open(&lang.file);
        let context = |key: &String| MessageContext {
            file_path: file_path.clone(),
            line: locator.as_ref().map_or(1, |l| l.line_of(key)),
            key: key.clone(),
        };
        for key in &lang.untranslated {
            issues.push(
                UntranslatedIssue {
                    context: context(key),
                    lang: lang.lang.clone(),
                }
                .into(),
            );
        }
        for key in &lang.orphaned {
            issues.push(
                OrphanKeyIssue {
                    context: context(key),
                    lang: lang.lang.clone(),
                }
                .into(),
            );
        }
    }

    for (key, missing_in) in missing {
        issues.push(
            MissingKeyIssue {
                context: MessageContext {
                    file_path: source_file.clone(),
                    line: source_line(key),
                    key: key.to_string(),
                },
                missing_in,
            }
            .into(),
        );
    }

    for group in &report.duplicates {
        issues.push(
            DuplicateValueIssue {
                context: MessageContext {
                    file_path: source_file.clone(),
                    line: source_line(group.kept_key()),
                    key: group.kept_key().to_string(),
                },
                value: group.value.clone(),
                redundant: group.redundant_keys().to_vec(),
            }
            .into(),
        );
    }
    issues
}

pub fn translation_issues(stats: &[FillStats], store: &LocaleStore, root: &Path) -> Vec<Issue> {
    let mut issues = Vec::new();
    for lang_stats in stats.iter().filter(|s| !s.failed.is_empty()) {
        let path = store.path_for(&lang_stats.lang);
        let file_path = display_path(root, &path);
        let locator = KeyLocator::open(&path);
        for failed in &lang_stats.failed {
            issues.push(
                TranslationFailedIssue {
                    context: MessageContext {
                        file_path: file_path.clone(),
                        line: locator.as_ref().map_or(1, |l| l.line_of(&failed.key)),
                        key: failed.key.clone(),
                    },
                    lang: lang_stats.lang.clone(),
                    error: failed.error.clone(),
                }
                .into(),
            );
        }
    }
    issues
}

pub fn rewrite_issues(report: &RewriteReport, root: &Path) -> Vec<Issue> {
    let failures = report.failures.iter().map(|failure| {
        Issue::from(BackupFailedIssue {
            file_path: display_path(root, &failure.file),
            reason: failure.reason.clone(),
        })
    });
    let unwritten = report
        .unwritten_keys
        .iter()
        .map(|key| Issue::from(UnwrittenKeyIssue { key: key.clone() }));
    failures.chain(unwritten).collect()
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_key(&self) -> (Option<&str>, usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (Some(&ctx.file_path), ctx.line, ctx.col),
            ReportLocation::Message(ctx) => (Some(&ctx.file_path), ctx.line, 0),
            ReportLocation::File { path } => (Some(path), 0, 0),
            ReportLocation::Detached => (None, 0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        let (a_file, a_line, a_col) = self.sort_key();
        let (b_file, b_line, b_col) = other.sort_key();
        match (a_file, b_file) {
            (Some(a), Some(b)) => a
                .cmp(b)
                .then(a_line.cmp(&b_line))
                .then(a_col.cmp(&b_col))
                .then_with(|| self.rule().cmp(&other.rule()))
                .then_with(|| self.message().cmp(&other.message())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self
                .rule()
                .cmp(&other.rule())
                .then_with(|| self.message().cmp(&other.message())),
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

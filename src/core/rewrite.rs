//! Rewrites source files to look texts up through `t("key")`.
//!
//! Every file is copied into a timestamped backup directory before it is
//! touched. A file whose backup fails is left alone.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result};
use chrono::Local;
use regex::Regex;
use serde::Serialize;

use crate::{
    core::{
        Progress, ProgressFn, Stage,
        keygen::KeyMapping,
        patterns::{PatternSet, TextContext},
    },
    utils::write_atomic,
};

pub const IMPORT_LINE: &str = "import { useTranslation } from 'react-i18next';";
pub const HOOK_LINE: &str = "const { t } = useTranslation();";

static REACT_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^[^\n]*from\s+['"]react['"];?[ \t]*\r?$"#).unwrap());

static USE_CLIENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*['"]use client['"];?[ \t]*\r?$"#).unwrap());

static EXISTING_HOOK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"const\s*\{\s*t\b[^}]*\}\s*=\s*useTranslation").unwrap());

/// Component signatures, most specific first. Each match ends at the `{`
/// opening the component body.
static COMPONENT_SIGNATURES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    const RETURN_TYPE: &str = r"(?:\s*:\s*[\w.<>\[\]| ]+)?";
    [
        format!(r"export\s+default\s+function\s*\w*\s*\([^)]*\){}\s*\{{", RETURN_TYPE),
        format!(r"export\s+function\s+[A-Z]\w*\s*\([^)]*\){}\s*\{{", RETURN_TYPE),
        format!(r"function\s+[A-Z]\w*\s*\([^)]*\){}\s*\{{", RETURN_TYPE),
        format!(
            r"const\s+[A-Z]\w*(?:\s*:\s*[\w.<>]+)?\s*=\s*\([^)]*\){}\s*=>\s*\{{",
            RETURN_TYPE
        ),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub content: String,
    pub replacements: usize,
    pub import_added: bool,
    pub hook_added: bool,
    /// Replacements were made but no component body was found for the hook.
    pub missing_hook: bool,
}

/// Rewrite one file's content. Pure: nothing is read or written.
pub fn rewrite_content(
    content: &str,
    keys: &HashMap<TextContext, HashMap<String, String>>,
    patterns: &PatternSet,
) -> RewriteOutcome {
    let mut rewritten = content.to_string();
    let mut replacements = 0;
    for context in TextContext::ALL {
        if let Some(context_keys) = keys.get(&context) {
            let (next, count) = patterns.rewrite(context, &rewritten, context_keys);
            rewritten = next;
            replacements += count;
        }
    }

    let mut outcome = RewriteOutcome {
        content: rewritten,
        replacements,
        import_added: false,
        hook_added: false,
        missing_hook: false,
    };
    if replacements == 0 {
        outcome.content = content.to_string();
        return outcome;
    }

    if !EXISTING_HOOK.is_match(content) {
        match inject_hook(&outcome.content) {
            Some(with_hook) => {
                outcome.content = with_hook;
                outcome.hook_added = true;
            }
            None => outcome.missing_hook = true,
        }
    }
    if !content.contains("useTranslation") {
        outcome.content = inject_import(&outcome.content);
        outcome.import_added = true;
    }
    outcome
}

fn inject_import(content: &str) -> String {
    let anchor = REACT_IMPORT
        .find(content)
        .or_else(|| USE_CLIENT.find(content));
    match anchor {
        Some(line) => {
            let (head, tail) = content.split_at(line.end());
            format!("{}\n{}{}", head, IMPORT_LINE, tail)
        }
        None => format!("{}\n{}", IMPORT_LINE, content),
    }
}

fn inject_hook(content: &str) -> Option<String> {
    let signature = COMPONENT_SIGNATURES
        .iter()
        .find_map(|pattern| pattern.find(content))?;
    let (head, tail) = content.split_at(signature.end());
    Some(format!("{}\n  {}{}", head, HOOK_LINE, tail))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewrittenFile {
    pub file: PathBuf,
    pub replacements: usize,
    pub import_added: bool,
    pub hook_added: bool,
    pub missing_hook: bool,
    pub backup: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteFailure {
    pub file: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteReport {
    /// The run's timestamped backup directory, once a backup was made.
    pub backup_dir: Option<PathBuf>,
    pub files: Vec<RewrittenFile>,
    pub failures: Vec<RewriteFailure>,
    /// Keys missing from the source locale file. Their texts stay as they are.
    pub unwritten_keys: Vec<String>,
    pub applied: bool,
}

impl RewriteReport {
    pub fn total_replacements(&self) -> usize {
        self.files.iter().map(|f| f.replacements).sum()
    }
}

/// Rewrites the files referenced by a key mapping.
pub struct SourceRewriter<'a> {
    patterns: &'a PatternSet,
    project_root: &'a Path,
    backup_root: PathBuf,
}

impl<'a> SourceRewriter<'a> {
    /// `backup_root` is the parent of the per-run timestamped directories.
    pub fn new(patterns: &'a PatternSet, project_root: &'a Path, backup_root: PathBuf) -> Self {
        Self {
            patterns,
            project_root,
            backup_root,
        }
    }

    /// Rewrite every file of `mapping`. Without `apply` nothing is written and
    /// the report shows what would change.
    pub fn rewrite(
        &self,
        mapping: &KeyMapping,
        apply: bool,
        progress: Option<&ProgressFn<'_>>,
    ) -> RewriteReport {
        let by_file = mapping.by_file();
        let total = by_file.len();
        let mut report = RewriteReport {
            applied: apply,
            ..Default::default()
        };

        for (done, (file, keys)) in by_file.iter().enumerate() {
            self.rewrite_file(file, keys, apply, &mut report);
            if let Some(callback) = progress {
                callback(Progress::new(Stage::Replace, done + 1, total));
            }
        }

        tracing::info!(
            "{} replacements in {} files, {} failed",
            report.total_replacements(),
            report.files.len(),
            report.failures.len()
        );
        report
    }

    fn rewrite_file(
        &self,
        file: &Path,
        keys: &HashMap<TextContext, HashMap<String, String>>,
        apply: bool,
        report: &mut RewriteReport,
    ) {
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                record_failure(report, file, format!("cannot read file: {}", e));
                return;
            }
        };

        let outcome = rewrite_content(&content, keys, self.patterns);
        if outcome.replacements == 0 {
            return;
        }
        if outcome.missing_hook {
            tracing::warn!(
                "{}: no component body found for `{}`",
                file.display(),
                HOOK_LINE
            );
        }

        let mut backup = None;
        if apply {
            let saved = match self.backup(file, &mut report.backup_dir) {
                Ok(saved) => saved,
                Err(e) => {
                    record_failure(report, file, format!("backup failed: {:#}", e));
                    return;
                }
            };
            if let Err(e) = write_atomic(file, &outcome.content) {
                record_failure(report, file, format!("write failed: {:#}", e));
                return;
            }
            backup = Some(saved);
        }

        report.files.push(RewrittenFile {
            file: file.to_path_buf(),
            replacements: outcome.replacements,
            import_added: outcome.import_added,
            hook_added: outcome.hook_added,
            missing_hook: outcome.missing_hook,
            backup,
        });
    }

    /// Copy `file` into this run's backup directory, keeping its path
    /// relative to the project root. Returns the backup path.
    fn backup(&self, file: &Path, run_dir: &mut Option<PathBuf>) -> Result<PathBuf> {
        let dir = match run_dir {
            Some(dir) => dir.clone(),
            None => {
                let dir = new_run_dir(&self.backup_root)?;
                *run_dir = Some(dir.clone());
                dir
            }
        };

        let relative = file
            .strip_prefix(self.project_root)
            .ok()
            .map(Path::to_path_buf)
            .or_else(|| file.file_name().map(PathBuf::from))
            .context("File has no name")?;
        let target = dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::copy(file, &target)
            .with_context(|| format!("Failed to copy {} to {}", file.display(), target.display()))?;
        Ok(target)
    }
}

/// `<backup_root>/<YYYYMMDD_HHMMSS>`, suffixed when a run in the same second
/// already claimed the name.
fn new_run_dir(backup_root: &Path) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let mut dir = backup_root.join(&stamp);
    let mut counter = 1;
    while dir.exists() {
        dir = backup_root.join(format!("{}_{}", stamp, counter));
        counter += 1;
    }
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create backup directory: {}", dir.display()))?;
    Ok(dir)
}

fn record_failure(report: &mut RewriteReport, file: &Path, reason: String) {
    tracing::warn!("Skipping {}: {}", file.display(), reason);
    report.failures.push(RewriteFailure {
        file: file.to_path_buf(),
        reason,
    });
}

//! Detection of hardcoded text in source files.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::{
        LazyLock,
        atomic::{AtomicUsize, Ordering},
    },
};

use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

use crate::{
    config::Config,
    core::{
        Progress, ProgressFn, Stage,
        classify::is_user_facing_text,
        file_scanner::scan_files,
        patterns::{PatternSet, TextContext},
    },
    utils::{build_line_index, display_path, line_text, offset_to_position},
};

/// Arguments of existing lookup calls: `t("...")`, `i18n.t('...')`.
static LOOKUP_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bt\(\s*["'`]([^"'`]+)["'`]"#).unwrap());

/// A detected string occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Trimmed literal content.
    pub text: String,
    pub file: PathBuf,
    /// Path relative to the source root, always `/`-separated.
    pub rel_path: String,
    pub line: usize,
    pub col: usize,
    pub context: TextContext,
    pub source_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedFile {
    pub file: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResult {
    pub candidates: Vec<Candidate>,
    pub skipped: Vec<SkippedFile>,
    pub files_scanned: usize,
}

/// Walk `source_root` and collect every user-facing text candidate.
///
/// Files are read in parallel but results keep file order, then pattern
/// order, then match order. Unreadable files are recorded in `skipped`.
pub fn detect(
    source_root: &Path,
    config: &Config,
    patterns: &PatternSet,
    progress: Option<&ProgressFn<'_>>,
) -> DetectResult {
    let scan = scan_files(source_root, config);
    let total = scan.files.len();
    let done = AtomicUsize::new(0);

    let per_file: Vec<Result<Vec<Candidate>, SkippedFile>> = scan
        .files
        .par_iter()
        .map(|file| {
            let outcome = match fs::read_to_string(file) {
                Ok(content) => {
                    let rel_path = display_path(source_root, file);
                    Ok(extract_from_content(
                        &content,
                        file,
                        &rel_path,
                        patterns,
                        &config.ignore_texts,
                    ))
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", file.display(), e);
                    Err(SkippedFile {
                        file: file.clone(),
                        reason: e.to_string(),
                    })
                }
            };
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(report) = progress {
                report(Progress::new(Stage::Detect, finished, total));
            }
            outcome
        })
        .collect();

    let mut result = DetectResult {
        files_scanned: total,
        ..Default::default()
    };
    for outcome in per_file {
        match outcome {
            Ok(candidates) => result.candidates.extend(candidates),
            Err(skipped) => result.skipped.push(skipped),
        }
    }

    tracing::info!(
        "Detected {} candidates in {} files",
        result.candidates.len(),
        total
    );
    result
}

/// Candidates found in one file's content.
pub fn extract_from_content(
    content: &str,
    file: &Path,
    rel_path: &str,
    patterns: &PatternSet,
    ignore_texts: &[String],
) -> Vec<Candidate> {
    let looked_up: HashSet<&str> = LOOKUP_CALL
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .collect();
    let line_index = build_line_index(content);

    let mut candidates = Vec::new();
    for context in TextContext::ALL {
        for found in patterns.find_all(context, content) {
            let text = found.raw.trim();
            if looked_up.contains(text)
                || ignore_texts.iter().any(|ignored| ignored == text)
                || !is_user_facing_text(text)
            {
                continue;
            }

            let leading = found.raw.len() - found.raw.trim_start().len();
            let (line, col) = offset_to_position(content, &line_index, found.offset + leading);
            candidates.push(Candidate {
                text: text.to_string(),
                file: file.to_path_buf(),
                rel_path: rel_path.to_string(),
                line,
                col,
                context,
                source_line: line_text(content, &line_index, line).to_string(),
            });
        }
    }
    candidates
}

//! Report formatting and printing utilities.
//!
//! Issues are shown in cargo style; every command then prints its own
//! summary. Kept out of the core so locsmith can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, DetectSummary, GenerateSummary, InitSummary, RunSummary,
    TranslateSummary,
};
use crate::core::{
    locale::{DedupeSummary, SyncSummary, ValidationReport},
    project::SetupResult,
    rewrite::RewriteReport,
    session::WorkflowSummary,
};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of keys listed per group in summaries.
const MAX_KEYS_DISPLAY: usize = 5;

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    report_to(&result.issues, writer);
    match &result.summary {
        CommandSummary::Init(summary) => print_init(summary, writer),
        CommandSummary::Setup(summary) => print_setup(summary, writer),
        CommandSummary::Detect(summary) => print_detect(summary, writer),
        CommandSummary::Generate(summary) => print_generate(summary, writer),
        CommandSummary::Sync(summary) => print_sync(summary, writer),
        CommandSummary::Translate(summary) => print_translate(summary, writer),
        CommandSummary::Replace(summary) => {
            print_written_keys(&summary.keys, writer);
            print_replace(&summary.report, writer);
        }
        CommandSummary::Validate(summary) => print_validate(summary, writer),
        CommandSummary::Dedupe(summary) => print_dedupe(summary, writer),
        CommandSummary::Run(RunSummary::Preview(summary)) => {
            print_generate(summary, writer);
        }
        CommandSummary::Run(RunSummary::Applied(summary)) => print_workflow(summary, writer),
    }
}

/// Print issues to a custom writer, sorted by location.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);
    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }
    print_summary(&sorted, writer);
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(ctx) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path,
                ctx.line,
                ctx.col
            );
            print_source_line(
                writer,
                &ctx.source_line,
                ctx.line,
                ctx.col,
                severity,
                max_line_width,
            );
        }
        ReportLocation::Message(ctx) => {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), ctx.file_path, ctx.line);
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::Detached => {}
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_source_line<W: Write>(
    writer: &mut W,
    source_line: &str,
    line: usize,
    col: usize,
    severity: Severity,
    max_line_width: usize,
) {
    let caret_char = match severity {
        Severity::Error => "^".red(),
        Severity::Warning => "^".yellow(),
    };

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    // Caret pointing to the column (col is 1-based)
    let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret_char,
        width = max_line_width,
        padding = caret_padding
    );
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})\n",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line),
            _ => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Command summaries
// ============================================================

fn success<W: Write>(writer: &mut W, message: &str) {
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

fn key_list(keys: &[String]) -> String {
    let shown: Vec<&str> = keys
        .iter()
        .take(MAX_KEYS_DISPLAY)
        .map(String::as_str)
        .collect();
    let remaining = keys.len().saturating_sub(MAX_KEYS_DISPLAY);
    if remaining > 0 {
        format!("{} (and {} more)", shown.join(", "), remaining)
    } else {
        shown.join(", ")
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    success(writer, &format!("Created {}", summary.path.display()));
}

fn print_setup<W: Write>(summary: &SetupResult, writer: &mut W) {
    for path in &summary.created {
        let _ = writeln!(writer, "  {} {}", "created".green(), path.display());
    }
    for path in &summary.kept {
        let _ = writeln!(writer, "  {} {}", "kept".dimmed(), path.display());
    }
    success(
        writer,
        &format!("i18n set up ({} created)", plural(summary.created.len(), "file", "files")),
    );
    let _ = writeln!(
        writer,
        "Next: install {} and import the i18n directory in your app entry.",
        "react-i18next i18next".cyan()
    );
}

fn print_detect<W: Write>(summary: &DetectSummary, writer: &mut W) {
    if summary.candidates == 0 {
        success(
            writer,
            &format!(
                "Scanned {} - no hardcoded text found",
                plural(summary.files_scanned, "source file", "source files")
            ),
        );
    } else {
        let _ = writeln!(
            writer,
            "Found {} in {}.",
            plural(summary.candidates, "hardcoded text", "hardcoded texts"),
            plural(summary.files_scanned, "source file", "source files")
        );
    }
}

fn print_generate<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    if summary.mapping.is_empty() {
        success(writer, "No new text to key");
        return;
    }

    let width = summary
        .mapping
        .iter()
        .map(|(key, _)| UnicodeWidthStr::width(key.as_str()))
        .max()
        .unwrap_or(0);
    for (key, entry) in summary.mapping.iter() {
        let sites = if entry.occurrences.len() > 1 {
            format!(" ({} sites)", entry.occurrences.len())
        } else {
            String::new()
        };
        let reused = if entry.reused {
            " existing".dimmed().to_string()
        } else {
            String::new()
        };
        let padding = width - UnicodeWidthStr::width(key.as_str());
        let _ = writeln!(
            writer,
            "  {}{:padding$}  \"{}\"{}{}",
            key.cyan(),
            "",
            entry.text,
            sites,
            reused,
            padding = padding
        );
    }
    let _ = writeln!(writer);

    if summary.is_apply {
        let added: usize = summary.writes.iter().map(|w| w.added.len()).sum();
        success(
            writer,
            &format!(
                "Wrote {} across {}",
                plural(added, "key", "keys"),
                plural(summary.writes.len(), "language file", "language files")
            ),
        );
        if let Some(sync) = &summary.sync {
            print_sync(sync, writer);
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {}.",
            "Would write".yellow().bold(),
            plural(summary.mapping.len(), "key", "keys")
        );
        let _ = writeln!(
            writer,
            "Run with {} to write them to the locale files.",
            "--apply".cyan()
        );
    }
}

fn print_sync<W: Write>(summary: &SyncSummary, writer: &mut W) {
    let changed: Vec<_> = summary.languages.iter().filter(|l| l.changed()).collect();
    if changed.is_empty() {
        success(writer, "All locale files have the same keys");
        return;
    }

    let verb = if summary.applied {
        "Added".green().bold()
    } else {
        "Would add".yellow().bold()
    };
    for lang in &changed {
        if !lang.added.is_empty() {
            let _ = writeln!(
                writer,
                "{} {} to {}: {}",
                verb,
                plural(lang.added.len(), "key", "keys"),
                lang.lang,
                key_list(&lang.added)
            );
        }
        if !lang.refreshed.is_empty() {
            let _ = writeln!(
                writer,
                "  {} {} pending in {}: {}",
                "refresh".cyan(),
                plural(lang.refreshed.len(), "value", "values"),
                lang.lang,
                key_list(&lang.refreshed)
            );
        }
        if !lang.conflicts.is_empty() {
            let _ = writeln!(
                writer,
                "  {} {} in {} kept as they are: {}",
                "conflict".red(),
                plural(lang.conflicts.len(), "key", "keys"),
                lang.lang,
                key_list(&lang.conflicts)
            );
        }
    }
    if !summary.applied {
        let _ = writeln!(writer, "Run with {} to write these keys.", "--apply".cyan());
    }
}

fn print_translate<W: Write>(summary: &TranslateSummary, writer: &mut W) {
    if summary.stats.is_empty() {
        success(writer, "No target languages to translate");
        return;
    }
    for stats in &summary.stats {
        let mark = if stats.failed.is_empty() {
            SUCCESS_MARK.green()
        } else {
            FAILURE_MARK.red()
        };
        let _ = writeln!(
            writer,
            "{} {}: {} translated, {} failed",
            mark,
            stats.lang,
            stats.translated,
            stats.failed.len()
        );
    }
    let _ = writeln!(writer, "Provider: {}", summary.provider.dimmed());
}

fn print_written_keys<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let added: usize = summary.writes.iter().map(|w| w.added.len()).sum();
    if !summary.is_apply || added == 0 {
        return;
    }
    success(
        writer,
        &format!(
            "Wrote {} across {}",
            plural(added, "key", "keys"),
            plural(summary.writes.len(), "language file", "language files")
        ),
    );
}

fn print_replace<W: Write>(report: &RewriteReport, writer: &mut W) {
    if report.files.is_empty() {
        if report.failures.is_empty() {
            success(writer, "Nothing to replace");
        }
        return;
    }

    for file in &report.files {
        let mut notes = Vec::new();
        if file.import_added {
            notes.push("import");
        }
        if file.hook_added {
            notes.push("hook");
        }
        let extra = if notes.is_empty() {
            String::new()
        } else {
            format!(" (+{})", notes.join(", "))
        };
        let _ = writeln!(
            writer,
            "  {} {}{}",
            file.file.display(),
            plural(file.replacements, "replacement", "replacements").dimmed(),
            extra
        );
        if file.missing_hook {
            let _ = writeln!(
                writer,
                "    {} no component found, add `const {{ t }} = useTranslation();` by hand",
                "note:".bold()
            );
        }
    }

    let replacements = report.total_replacements();
    if report.applied {
        success(
            writer,
            &format!(
                "Replaced {} in {}",
                plural(replacements, "text", "texts"),
                plural(report.files.len(), "file", "files")
            ),
        );
        if let Some(dir) = &report.backup_dir {
            let _ = writeln!(writer, "Backups: {}", dir.display());
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} in {}.",
            "Would replace".yellow().bold(),
            plural(replacements, "text", "texts"),
            plural(report.files.len(), "file", "files")
        );
        let _ = writeln!(writer, "Run with {} to rewrite these files.", "--apply".cyan());
    }
}

fn print_validate<W: Write>(report: &ValidationReport, writer: &mut W) {
    for lang in &report.languages {
        let mark = if lang.is_clean() {
            SUCCESS_MARK.green()
        } else {
            FAILURE_MARK.red()
        };
        let source = if lang.is_source { " (source)" } else { "" };
        if !lang.file_exists {
            let _ = writeln!(writer, "{} {}{}: file missing", mark, lang.lang, source);
            continue;
        }
        let _ = writeln!(
            writer,
            "{} {}{}: {}, {} missing, {} untranslated, {} orphan",
            mark,
            lang.lang,
            source,
            plural(lang.total, "key", "keys"),
            lang.missing.len(),
            lang.untranslated.len(),
            lang.orphaned.len()
        );
    }
    if !report.duplicates.is_empty() {
        let _ = writeln!(
            writer,
            "{} in {}",
            plural(report.duplicates.len(), "duplicate value", "duplicate values"),
            report.source_language
        );
    }
}

fn print_dedupe<W: Write>(summary: &DedupeSummary, writer: &mut W) {
    if summary.groups.is_empty() {
        success(writer, "No duplicate values");
        return;
    }

    for group in &summary.groups {
        let _ = writeln!(
            writer,
            "  \"{}\": keep {}, {} {}",
            group.value,
            group.kept_key().cyan(),
            if summary.applied { "removed" } else { "remove" },
            group.redundant_keys().join(", ")
        );
    }
    let redundant: usize = summary.groups.iter().map(|g| g.redundant_keys().len()).sum();
    if summary.applied {
        success(
            writer,
            &format!(
                "Removed {} from {}",
                plural(redundant, "key", "keys"),
                plural(summary.removed.len(), "language file", "language files")
            ),
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} from every language.",
            "Would remove".yellow().bold(),
            plural(redundant, "key", "keys")
        );
        let _ = writeln!(writer, "Run with {} to remove them.", "--apply".cyan());
    }
}

fn print_workflow<W: Write>(summary: &WorkflowSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}, {}",
        "detect".bold(),
        plural(summary.candidates, "text", "texts"),
        plural(summary.keys, "key", "keys")
    );
    let added: usize = summary.writes.iter().map(|w| w.added.len()).sum();
    let _ = writeln!(
        writer,
        "{} {} written, {} synced",
        "locales".bold(),
        plural(added, "key", "keys"),
        summary.sync.total_added() + summary.resync.total_added()
    );
    for stats in &summary.translations {
        let _ = writeln!(
            writer,
            "{} {}: {} translated, {} failed",
            "translate".bold(),
            stats.lang,
            stats.translated,
            stats.failed.len()
        );
    }
    print_replace(&summary.rewrite, writer);
}

// ============================================================
// Tests
// ============================================================

use std::path::PathBuf;

use crate::{
    core::{
        keygen::KeyMapping,
        locale::{DedupeSummary, LanguageWrite, SyncSummary, ValidationReport},
        project::SetupResult,
        rewrite::RewriteReport,
        session::WorkflowSummary,
        translate::FillStats,
    },
    issues::Issue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Init,
    Setup,
    Detect,
    Generate,
    Sync,
    Translate,
    Replace,
    Validate,
    Dedupe,
    Run,
}

#[derive(Debug)]
pub enum CommandSummary {
    Init(InitSummary),
    Setup(SetupResult),
    Detect(DetectSummary),
    Generate(GenerateSummary),
    Sync(SyncSummary),
    Translate(TranslateSummary),
    Replace(ReplaceSummary),
    Validate(ValidationReport),
    Dedupe(DedupeSummary),
    Run(RunSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct DetectSummary {
    pub files_scanned: usize,
    pub candidates: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub mapping: KeyMapping,
    /// Empty on dry runs.
    pub writes: Vec<LanguageWrite>,
    pub sync: Option<SyncSummary>,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct ReplaceSummary {
    /// Keys written to the locale files ahead of the rewrite.
    pub keys: GenerateSummary,
    pub report: RewriteReport,
}

#[derive(Debug)]
pub struct TranslateSummary {
    pub provider: &'static str,
    pub stats: Vec<FillStats>,
}

#[derive(Debug)]
pub enum RunSummary {
    /// Without `--apply` only the keys are previewed.
    Preview(GenerateSummary),
    Applied(Box<WorkflowSummary>),
}

/// Result of running a locsmith command
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 is returned when error_count > 0.
    pub exit_on_errors: bool,
    /// Findings to print in cargo style, sorted.
    pub issues: Vec<Issue>,
}

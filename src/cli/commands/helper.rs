use super::{CommandKind, CommandResult, CommandSummary};
use crate::{
    cli::args::CommonArgs,
    config::load_config,
    core::WorkflowSession,
    issues::{Issue, Report, Severity},
};
use anyhow::Result;

/// Load the project's config, apply the command-line overrides and open a
/// session on it.
pub fn open_session(common: &CommonArgs) -> Result<WorkflowSession> {
    let mut config = load_config(&common.project)?.config;
    if let Some(lang) = &common.source_language {
        config.source_language = lang.clone();
    }
    if !common.languages.is_empty() {
        config.target_languages = common.languages.clone();
    }
    WorkflowSession::open(&common.project, config)
}

pub fn finish(
    kind: CommandKind,
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    CommandResult {
        kind,
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
    }
}

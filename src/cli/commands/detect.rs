use anyhow::Result;

use super::super::args::ProjectCommand;
use super::helper::{finish, open_session};
use super::{CommandKind, CommandResult, CommandSummary, DetectSummary};
use crate::issues::detect_issues;

pub fn detect(cmd: ProjectCommand) -> Result<CommandResult> {
    let mut session = open_session(&cmd.common)?;
    let root = session.project().project_root.clone();
    let result = session.detect(None);

    let summary = DetectSummary {
        files_scanned: result.files_scanned,
        candidates: result.candidates.len(),
        skipped: result.skipped.len(),
    };
    let issues = detect_issues(result, &root);
    Ok(finish(
        CommandKind::Detect,
        CommandSummary::Detect(summary),
        issues,
        false,
    ))
}

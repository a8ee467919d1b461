use anyhow::Result;

use super::super::args::ProjectCommand;
use super::helper::{finish, open_session};
use super::{CommandKind, CommandResult, CommandSummary};
use crate::issues::validation_issues;

pub fn validate(cmd: ProjectCommand) -> Result<CommandResult> {
    let session = open_session(&cmd.common)?;
    let report = session.validate()?;
    let issues = validation_issues(
        &report,
        session.store(),
        &session.project().project_root,
    );
    Ok(finish(
        CommandKind::Validate,
        CommandSummary::Validate(report),
        issues,
        true,
    ))
}

use anyhow::Result;

use super::super::args::ApplyCommand;
use super::generate::generate_keys;
use super::helper::{finish, open_session};
use super::{CommandKind, CommandResult, CommandSummary, ReplaceSummary};
use crate::issues::{collision_issues, rewrite_issues};

/// With `--apply` the keys are written to the locale files before any
/// source file is rewritten.
pub fn replace(cmd: ApplyCommand) -> Result<CommandResult> {
    let mut session = open_session(&cmd.common)?;
    let root = session.project().project_root.clone();
    let keys = generate_keys(&mut session, cmd.apply)?;
    let mut issues = collision_issues(&keys.mapping);
    let report = session.replace(cmd.apply, None)?;

    issues.extend(rewrite_issues(&report, &root));
    Ok(finish(
        CommandKind::Replace,
        CommandSummary::Replace(ReplaceSummary { keys, report }),
        issues,
        true,
    ))
}

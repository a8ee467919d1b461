use anyhow::Result;

use super::super::args::ApplyCommand;
use super::helper::{finish, open_session};
use super::{CommandKind, CommandResult, CommandSummary, GenerateSummary};
use crate::{core::WorkflowSession, issues::collision_issues};

pub fn generate(cmd: ApplyCommand) -> Result<CommandResult> {
    let mut session = open_session(&cmd.common)?;
    let summary = generate_keys(&mut session, cmd.apply)?;
    let issues = collision_issues(&summary.mapping);
    Ok(finish(
        CommandKind::Generate,
        CommandSummary::Generate(summary),
        issues,
        false,
    ))
}

/// Generate keys and, when applying, write them to every language and sync.
pub fn generate_keys(session: &mut WorkflowSession, apply: bool) -> Result<GenerateSummary> {
    let mapping = session.generate(None)?.clone();
    let (writes, sync) = if apply {
        let writes = session.write_keys(None)?;
        let sync = session.sync(true, None)?;
        (writes, Some(sync))
    } else {
        (Vec::new(), None)
    };

    Ok(GenerateSummary {
        mapping,
        writes,
        sync,
        is_apply: apply,
    })
}

use anyhow::Result;

use super::super::args::ApplyCommand;
use super::helper::{finish, open_session};
use super::{CommandKind, CommandResult, CommandSummary};

pub fn dedupe(cmd: ApplyCommand) -> Result<CommandResult> {
    let session = open_session(&cmd.common)?;
    let summary = session.dedupe(cmd.apply)?;
    Ok(finish(
        CommandKind::Dedupe,
        CommandSummary::Dedupe(summary),
        Vec::new(),
        false,
    ))
}

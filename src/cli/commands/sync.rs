use anyhow::Result;

use super::super::args::ApplyCommand;
use super::helper::{finish, open_session};
use super::{CommandKind, CommandResult, CommandSummary};

pub fn sync(cmd: ApplyCommand) -> Result<CommandResult> {
    let session = open_session(&cmd.common)?;
    let summary = session.sync(cmd.apply, None)?;
    Ok(finish(
        CommandKind::Sync,
        CommandSummary::Sync(summary),
        Vec::new(),
        false,
    ))
}

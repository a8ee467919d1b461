use anyhow::Result;

use super::super::args::ProjectCommand;
use super::helper::{finish, open_session};
use super::{CommandKind, CommandResult, CommandSummary};

pub fn setup(cmd: ProjectCommand) -> Result<CommandResult> {
    let session = open_session(&cmd.common)?;
    let result = session.setup()?;
    Ok(finish(
        CommandKind::Setup,
        CommandSummary::Setup(result),
        Vec::new(),
        false,
    ))
}

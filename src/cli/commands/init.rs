use std::fs;

use anyhow::{Result, bail};

use super::super::args::InitCommand;
use super::helper::finish;
use super::{CommandKind, CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init(cmd: InitCommand) -> Result<CommandResult> {
    let path = cmd.project.join(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    fs::write(&path, default_config_json()?)?;
    Ok(finish(
        CommandKind::Init,
        CommandSummary::Init(InitSummary { path }),
        Vec::new(),
        false,
    ))
}

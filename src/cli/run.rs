//! Dispatches parsed arguments to the command handlers.

use anyhow::{Result, bail};
use tracing::Level;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, dedupe::dedupe, detect::detect, generate::generate, init::init,
        replace::replace, setup::setup, sync::sync, translate::translate, validate::validate,
        workflow::workflow,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Init(cmd)) => init(cmd),
        Some(Command::Setup(cmd)) => setup(cmd),
        Some(Command::Detect(cmd)) => detect(cmd),
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Replace(cmd)) => replace(cmd),
        Some(Command::Validate(cmd)) => validate(cmd),
        Some(Command::Dedupe(cmd)) => dedupe(cmd),
        Some(Command::Run(cmd)) => workflow(cmd),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            bail!("Serve command should be handled before run()")
        }
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

/// Log to stderr: warnings by default, debug detail with `-v`.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `init`: write a default `.locsmithrc.json`
//! - `setup`: scaffold the i18n directory and locale files
//! - `detect`: list hardcoded user-facing text
//! - `generate`: assign translation keys (and write them with `--apply`)
//! - `sync`: give every locale file the same keys
//! - `translate`: fill pending entries through a translation provider
//! - `replace`: rewrite source files to use `t("key")`
//! - `validate`: report missing, untranslated, orphan and duplicate entries
//! - `dedupe`: remove keys holding duplicate values
//! - `run`: the complete workflow
//! - `serve`: start the MCP server

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::ProviderKind;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Setup(cmd))
            | Some(Command::Detect(cmd))
            | Some(Command::Validate(cmd)) => cmd.common.verbose,
            Some(Command::Generate(cmd))
            | Some(Command::Sync(cmd))
            | Some(Command::Replace(cmd))
            | Some(Command::Dedupe(cmd)) => cmd.common.verbose,
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::Run(cmd)) => cmd.common.verbose,
            Some(Command::Init(_)) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all project commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory
    #[arg(long, short = 'p', default_value = ".")]
    pub project: PathBuf,

    /// Source language (overrides config file)
    #[arg(long)]
    pub source_language: Option<String>,

    /// Target languages, comma separated (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to write the config file into
    #[arg(long, short = 'p', default_value = ".")]
    pub project: PathBuf,
}

#[derive(Debug, Args)]
pub struct ProjectCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ApplyCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the changes (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Translation provider (overrides config file)
    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,
}

#[derive(Debug, Args)]
pub struct RunCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Run every stage and write the results (default only previews keys)
    #[arg(long)]
    pub apply: bool,

    /// Translation provider (overrides config file)
    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a new .locsmithrc.json configuration file
    Init(InitCommand),
    /// Create i18n config and skeleton locale files in the source directory
    Setup(ProjectCommand),
    /// Find hardcoded user-facing text
    Detect(ProjectCommand),
    /// Assign translation keys to detected text
    Generate(ApplyCommand),
    /// Make every locale file hold the same keys
    Sync(ApplyCommand),
    /// Translate pending entries of every non-source language
    Translate(TranslateCommand),
    /// Replace hardcoded text in source files with t("key") lookups
    Replace(ApplyCommand),
    /// Report missing, untranslated, orphan and duplicate locale entries
    Validate(ProjectCommand),
    /// Remove keys whose value duplicates another key's value
    Dedupe(ApplyCommand),
    /// Detect, generate, write, sync, translate and replace in one go
    Run(RunCommand),
    /// Start MCP server for AI coding agents
    Serve,
}

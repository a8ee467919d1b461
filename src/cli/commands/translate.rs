use anyhow::Result;

use super::super::args::TranslateCommand;
use super::helper::{finish, open_session};
use super::{CommandKind, CommandResult, CommandSummary, TranslateSummary};
use crate::{
    config::ProviderKind,
    core::{
        WorkflowSession,
        translate::{Translate, Translator},
    },
    issues::translation_issues,
};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let session = open_session(&cmd.common)?;
    let translator = translator_for(&session, cmd.provider);
    let stats = session.translate(&translator, None)?;

    let issues = translation_issues(
        &stats,
        session.store(),
        &session.project().project_root,
    );
    Ok(finish(
        CommandKind::Translate,
        CommandSummary::Translate(TranslateSummary {
            provider: translator.name(),
            stats,
        }),
        issues,
        false,
    ))
}

/// The configured translator, with the provider optionally overridden.
pub fn translator_for(session: &WorkflowSession, provider: Option<ProviderKind>) -> Translator {
    let mut config = session.config().translator.clone();
    if let Some(provider) = provider {
        config.provider = provider;
    }
    Translator::from_config(&config)
}

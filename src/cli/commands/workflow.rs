use anyhow::Result;

use super::super::args::RunCommand;
use super::generate::generate_keys;
use super::helper::{finish, open_session};
use super::translate::translator_for;
use super::{CommandKind, CommandResult, CommandSummary, RunSummary};
use crate::issues::{collision_issues, rewrite_issues, translation_issues};

pub fn workflow(cmd: RunCommand) -> Result<CommandResult> {
    let mut session = open_session(&cmd.common)?;
    let root = session.project().project_root.clone();

    if !cmd.apply {
        let preview = generate_keys(&mut session, false)?;
        let issues = collision_issues(&preview.mapping);
        return Ok(finish(
            CommandKind::Run,
            CommandSummary::Run(RunSummary::Preview(preview)),
            issues,
            false,
        ));
    }

    let translator = translator_for(&session, cmd.provider);
    let summary = session.run_workflow(&translator, None)?;

    let mut issues = Vec::new();
    if let Some(mapping) = session.mapping() {
        issues.extend(collision_issues(mapping));
    }
    issues.extend(translation_issues(
        &summary.translations,
        session.store(),
        &root,
    ));
    issues.extend(rewrite_issues(&summary.rewrite, &root));
    Ok(finish(
        CommandKind::Run,
        CommandSummary::Run(RunSummary::Applied(Box::new(summary))),
        issues,
        true,
    ))
}

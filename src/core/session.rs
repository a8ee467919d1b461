//! One project's workflow state, shared by the CLI and the MCP server.
//!
//! Stages run strictly in order and each one works on the complete output of
//! the one before it. A stage that needs an earlier result it does not have
//! yet runs that earlier stage first.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::{
    config::Config,
    core::{
        Progress, ProgressFn, Stage,
        extract::{DetectResult, detect},
        keygen::{KeyGenerator, KeyMapping},
        locale::{
            DedupeSummary, LanguageWrite, LocaleStore, PendingMarker, SyncSummary,
            ValidationReport,
        },
        patterns::PatternSet,
        project::{ProjectContext, SetupResult, validate_language},
        rewrite::{RewriteReport, SourceRewriter},
        translate::{FillStats, Translate, translate_language},
    },
};

/// What a full workflow run did, stage by stage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSummary {
    pub candidates: usize,
    pub keys: usize,
    pub collisions: usize,
    pub writes: Vec<LanguageWrite>,
    pub sync: SyncSummary,
    pub translations: Vec<FillStats>,
    pub resync: SyncSummary,
    pub rewrite: RewriteReport,
}

pub struct WorkflowSession {
    config: Config,
    project: ProjectContext,
    patterns: PatternSet,
    store: LocaleStore,
    detected: Option<DetectResult>,
    mapping: Option<KeyMapping>,
}

impl WorkflowSession {
    pub fn open(project_root: &Path, config: Config) -> Result<Self> {
        config.validate()?;
        let project = ProjectContext::detect(project_root, &config)?;
        let patterns = PatternSet::from_config(&config)?;
        let store = project.store(PendingMarker::new(config.pending_marker.clone()));
        Ok(Self {
            config,
            project,
            patterns,
            store,
            detected: None,
            mapping: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn project(&self) -> &ProjectContext {
        &self.project
    }

    pub fn store(&self) -> &LocaleStore {
        &self.store
    }

    pub fn source_language(&self) -> &str {
        &self.project.source_language
    }

    pub fn target_languages(&self) -> &[String] {
        &self.project.target_languages
    }

    pub fn add_target_language(&mut self, lang: &str) -> Result<()> {
        validate_language(lang)?;
        if lang != self.project.source_language
            && !self.project.target_languages.iter().any(|l| l == lang)
        {
            self.project.target_languages.push(lang.to_string());
        }
        Ok(())
    }

    pub fn remove_target_language(&mut self, lang: &str) {
        self.project.target_languages.retain(|l| l != lang);
    }

    pub fn set_target_languages(&mut self, languages: &[String]) -> Result<()> {
        self.project.target_languages.clear();
        for lang in languages {
            self.add_target_language(lang)?;
        }
        Ok(())
    }

    /// Every language the locale stages work on, source first.
    pub fn languages(&self) -> Result<Vec<String>> {
        self.project.all_languages()
    }

    pub fn detected(&self) -> Option<&DetectResult> {
        self.detected.as_ref()
    }

    pub fn mapping(&self) -> Option<&KeyMapping> {
        self.mapping.as_ref()
    }

    pub fn setup(&self) -> Result<SetupResult> {
        self.project.init_i18n(&self.project.target_languages)
    }

    /// Scan the source tree. Drops any key mapping of an earlier scan.
    pub fn detect(&mut self, progress: Option<&ProgressFn<'_>>) -> &DetectResult {
        let result = detect(
            &self.project.source_root,
            &self.config,
            &self.patterns,
            progress,
        );
        self.mapping = None;
        self.detected.insert(result)
    }

    /// Assign keys to the detected candidates, reusing keys the source
    /// locale file already holds.
    pub fn generate(&mut self, progress: Option<&ProgressFn<'_>>) -> Result<&KeyMapping> {
        if self.detected.is_none() {
            self.detect(progress);
        }
        let source_tree = self.store.load(&self.project.source_language)?;
        let generator = KeyGenerator::with_existing(&source_tree, self.store.marker());
        let candidates = self
            .detected
            .as_ref()
            .map(|d| d.candidates.as_slice())
            .unwrap_or_default();
        let mapping = generator.generate(candidates);
        if let Some(report) = progress {
            report(Progress::new(Stage::Generate, mapping.len(), mapping.len()));
        }
        for collision in mapping.collisions() {
            tracing::warn!(
                "Key collision on '{}': {} texts share the base name",
                collision.base_key,
                collision.holders.len()
            );
        }
        Ok(self.mapping.insert(mapping))
    }

    fn ensure_mapping(&mut self, progress: Option<&ProgressFn<'_>>) -> Result<()> {
        if self.mapping.is_none() {
            self.generate(progress)?;
        }
        Ok(())
    }

    /// Add the generated keys to every language file.
    pub fn write_keys(
        &mut self,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<Vec<LanguageWrite>> {
        self.project.require_configured()?;
        self.ensure_mapping(progress)?;
        let languages = self.languages()?;
        let Some(mapping) = &self.mapping else {
            return Ok(Vec::new());
        };
        let writes = self.store.write_keys_to_languages(
            mapping,
            &languages,
            &self.project.source_language,
        )?;
        if let Some(report) = progress {
            report(Progress::new(Stage::Write, writes.len(), languages.len()));
        }
        Ok(writes)
    }

    pub fn sync(&self, apply: bool, progress: Option<&ProgressFn<'_>>) -> Result<SyncSummary> {
        self.project.require_configured()?;
        let languages = self.languages()?;
        let summary = self
            .store
            .sync_all_keys(&languages, &self.project.source_language, apply)?;
        if let Some(report) = progress {
            report(Progress::new(Stage::Sync, languages.len(), languages.len()));
        }
        Ok(summary)
    }

    /// Fill pending entries of every non-source language.
    pub fn translate<T: Translate + ?Sized>(
        &self,
        translator: &T,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<Vec<FillStats>> {
        self.project.require_configured()?;
        let source = &self.project.source_language;
        let mut stats = Vec::new();
        for lang in self.languages()?.iter().filter(|l| *l != source) {
            stats.push(translate_language(
                &self.store,
                source,
                lang,
                translator,
                progress,
            )?);
        }
        Ok(stats)
    }

    /// Rewrite the source files of the current key mapping.
    ///
    /// When applying, only keys the source locale file already holds are
    /// written into the sources. The rest are listed in `unwritten_keys`.
    pub fn replace(
        &mut self,
        apply: bool,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<RewriteReport> {
        self.ensure_mapping(progress)?;
        let Some(mapping) = &self.mapping else {
            return Ok(RewriteReport::default());
        };
        let backup_root = self.project.project_root.join(&self.config.backup_dir);
        let rewriter = SourceRewriter::new(&self.patterns, &self.project.project_root, backup_root);
        if !apply {
            return Ok(rewriter.rewrite(mapping, false, progress));
        }

        self.project.require_configured()?;
        let source_tree = self.store.load(&self.project.source_language)?;
        let (known, unwritten) = mapping.partition(|key| source_tree.contains_leaf(key));
        for key in &unwritten {
            tracing::warn!("Not rewriting '{}': the source locale file lacks it", key);
        }
        let mut report = rewriter.rewrite(&known, true, progress);
        report.unwritten_keys = unwritten;
        Ok(report)
    }

    pub fn validate(&self) -> Result<ValidationReport> {
        self.project.require_configured()?;
        self.store
            .validate(&self.languages()?, &self.project.source_language)
    }

    pub fn dedupe(&self, apply: bool) -> Result<DedupeSummary> {
        self.project.require_configured()?;
        self.store
            .dedupe(&self.languages()?, &self.project.source_language, apply)
    }

    /// detect → generate → write → sync → translate → sync → replace.
    pub fn run_workflow<T: Translate + ?Sized>(
        &mut self,
        translator: &T,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<WorkflowSummary> {
        self.project.require_configured()?;
        let candidates = self.detect(progress).candidates.len();
        let (keys, collisions) = {
            let mapping = self.generate(progress)?;
            (mapping.len(), mapping.collisions().len())
        };
        let writes = self.write_keys(progress)?;
        let sync = self.sync(true, progress)?;
        let translations = self.translate(translator, progress)?;
        let resync = self.sync(true, progress)?;
        let rewrite = self.replace(true, progress)?;

        tracing::info!(
            "Workflow finished: {} keys, {} files rewritten",
            keys,
            rewrite.files.len()
        );
        Ok(WorkflowSummary {
            candidates,
            keys,
            collisions,
            writes,
            sync,
            translations,
            resync,
            rewrite,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    use crate::core::{
        project::ProjectError, session::*, translate::IdentityTranslator,
    };

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        dir
    }

    const HERO: &str = "import React from 'react';\n\nexport default function Hero() {\n  return <h1>Welcome Back</h1>;\n}\n";

    fn configured() -> TempDir {
        project(&[
            ("src/pages/home/Hero.tsx", HERO),
            ("src/i18n/config.ts", "export default {};\n"),
            ("src/i18n/locales/en.json", "{}"),
        ])
    }

    #[test]
    fn test_target_language_accessors() {
        let dir = configured();
        let mut session = WorkflowSession::open(dir.path(), Config::default()).unwrap();

        session.add_target_language("nl").unwrap();
        session.add_target_language("nl").unwrap();
        session.add_target_language("en").unwrap();
        session.add_target_language("de").unwrap();
        assert_eq!(session.target_languages(), ["nl", "de"]);

        session.remove_target_language("nl");
        assert_eq!(session.target_languages(), ["de"]);
        assert!(session.add_target_language("Dutch").is_err());
        assert_eq!(session.languages().unwrap(), vec!["en", "de"]);
    }

    #[test]
    fn test_generate_runs_detect_first() {
        let dir = configured();
        let mut session = WorkflowSession::open(dir.path(), Config::default()).unwrap();

        let mapping = session.generate(None).unwrap();

        assert_eq!(mapping.keys(), vec!["home.welcomeback"]);
        assert!(session.detected().is_some());
    }

    #[test]
    fn test_locale_stages_require_setup() {
        let dir = project(&[("src/App.tsx", HERO)]);
        let mut session = WorkflowSession::open(dir.path(), Config::default()).unwrap();

        let err = session.write_keys(None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProjectError>(),
            Some(ProjectError::NotConfigured { .. })
        ));
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_run_workflow_end_to_end() {
        let dir = configured();
        let mut session = WorkflowSession::open(dir.path(), Config::default()).unwrap();
        session.add_target_language("nl").unwrap();

        let summary = session.run_workflow(&IdentityTranslator, None).unwrap();

        assert_eq!(summary.keys, 1);
        assert_eq!(summary.translations[0].translated, 1);
        assert_eq!(summary.rewrite.files.len(), 1);
        let en = session.store().load("en").unwrap();
        let nl = session.store().load("nl").unwrap();
        assert_eq!(en.get_text("home.welcomeback"), Some("Welcome Back"));
        assert_eq!(nl.get_text("home.welcomeback"), Some("Welcome Back"));
        let hero = fs::read_to_string(dir.path().join("src/pages/home/Hero.tsx")).unwrap();
        assert!(hero.contains("<h1>{t(\"home.welcomeback\")}</h1>"));
        assert!(hero.contains("const { t } = useTranslation();"));
    }

    #[test]
    fn test_replace_skips_keys_missing_from_source_locale() {
        let dir = configured();
        let mut session = WorkflowSession::open(dir.path(), Config::default()).unwrap();

        let report = session.replace(true, None).unwrap();

        assert_eq!(report.unwritten_keys, vec!["home.welcomeback"]);
        assert!(report.files.is_empty());
        assert!(report.backup_dir.is_none());
        let hero = fs::read_to_string(dir.path().join("src/pages/home/Hero.tsx")).unwrap();
        assert_eq!(hero, HERO);
    }

    #[test]
    fn test_replace_after_write_uses_written_keys() {
        let dir = configured();
        let mut session = WorkflowSession::open(dir.path(), Config::default()).unwrap();
        session.write_keys(None).unwrap();

        let report = session.replace(true, None).unwrap();

        assert!(report.unwritten_keys.is_empty());
        assert_eq!(report.total_replacements(), 1);
        let en = session.store().load("en").unwrap();
        assert!(en.contains_leaf("home.welcomeback"));
    }

    #[test]
    fn test_replace_dry_run_previews_every_key() {
        let dir = configured();
        let mut session = WorkflowSession::open(dir.path(), Config::default()).unwrap();

        let report = session.replace(false, None).unwrap();

        assert_eq!(report.total_replacements(), 1);
        assert!(report.unwritten_keys.is_empty());
        let hero = fs::read_to_string(dir.path().join("src/pages/home/Hero.tsx")).unwrap();
        assert_eq!(hero, HERO);
    }

    #[test]
    fn test_second_run_is_stable() {
        let dir = configured();
        let mut session = WorkflowSession::open(dir.path(), Config::default()).unwrap();
        session.run_workflow(&IdentityTranslator, None).unwrap();
        let en_before = fs::read_to_string(session.store().path_for("en")).unwrap();

        let summary = session.run_workflow(&IdentityTranslator, None).unwrap();

        assert_eq!(summary.candidates, 0);
        assert!(summary.rewrite.files.is_empty());
        assert_eq!(fs::read_to_string(session.store().path_for("en")).unwrap(), en_before);
    }

    #[test]
    fn test_progress_reports_stages_in_order() {
        let dir = configured();
        let mut session = WorkflowSession::open(dir.path(), Config::default()).unwrap();
        let stages = std::sync::Mutex::new(Vec::new());
        let progress = |p: Progress| {
            let mut stages = stages.lock().unwrap();
            if stages.last() != Some(&p.stage) {
                stages.push(p.stage);
            }
        };

        session.run_workflow(&IdentityTranslator, Some(&progress)).unwrap();

        assert_eq!(
            stages.into_inner().unwrap(),
            vec![
                Stage::Detect,
                Stage::Generate,
                Stage::Write,
                Stage::Sync,
                Stage::Replace
            ]
        );
    }
}

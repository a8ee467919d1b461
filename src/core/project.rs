//! Project layout: where the sources and locale files live.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    config::Config,
    core::locale::{LocaleStore, LocaleTree, PendingMarker},
    utils::write_atomic,
};

/// Conventional source directories, tried in order.
pub const SOURCE_DIR_CANDIDATES: &[&str] = &["src", "app", "client", "frontend"];

/// Sections every freshly scaffolded locale file starts with.
pub const SKELETON_SECTIONS: &[&str] = &["common", "nav", "button", "form", "message"];

const CONFIG_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("no source directory found in {} (tried: {})", root.display(), tried.join(", "))]
    NoSourceDir { root: PathBuf, tried: Vec<String> },
    #[error("i18n is not configured in {} (run `locsmith setup` first)", source_root.display())]
    NotConfigured { source_root: PathBuf },
    #[error("invalid language code '{0}'")]
    InvalidLanguage(String),
}

/// `en`, `nl`, `pt-BR`, `zh_TW`, `zh-Hant`.
pub fn validate_language(code: &str) -> Result<(), ProjectError> {
    let mut parts = code.split(['-', '_']);
    let primary = parts.next().unwrap_or_default();
    let primary_ok = (2..=3).contains(&primary.len())
        && primary.chars().all(|c| c.is_ascii_lowercase());
    let rest_ok = parts.all(|part| {
        (2..=8).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric())
    });
    if primary_ok && rest_ok {
        Ok(())
    } else {
        Err(ProjectError::InvalidLanguage(code.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub project_root: PathBuf,
    pub source_root: PathBuf,
    pub locales_dir: PathBuf,
    pub source_language: String,
    pub target_languages: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupResult {
    pub created: Vec<PathBuf>,
    /// Files that already existed and were left alone.
    pub kept: Vec<PathBuf>,
}

impl ProjectContext {
    /// Locate the source directory of `project_root`. A configured
    /// `sourceRoot` wins over the conventional names.
    pub fn detect(project_root: &Path, config: &Config) -> Result<Self, ProjectError> {
        validate_language(&config.source_language)?;
        for lang in &config.target_languages {
            validate_language(lang)?;
        }

        let source_root = match &config.source_root {
            Some(dir) => {
                let dir = project_root.join(dir);
                if !dir.is_dir() {
                    return Err(ProjectError::NoSourceDir {
                        root: project_root.to_path_buf(),
                        tried: vec![dir.display().to_string()],
                    });
                }
                dir
            }
            None => SOURCE_DIR_CANDIDATES
                .iter()
                .map(|name| project_root.join(name))
                .find(|dir| dir.is_dir())
                .ok_or_else(|| ProjectError::NoSourceDir {
                    root: project_root.to_path_buf(),
                    tried: SOURCE_DIR_CANDIDATES.iter().map(|s| s.to_string()).collect(),
                })?,
        };

        let locales_dir = source_root.join("i18n").join("locales");
        tracing::debug!("Source root: {}", source_root.display());
        Ok(Self {
            project_root: project_root.to_path_buf(),
            source_root,
            locales_dir,
            source_language: config.source_language.clone(),
            target_languages: config
                .target_languages
                .iter()
                .filter(|lang| **lang != config.source_language)
                .cloned()
                .collect(),
        })
    }

    pub fn i18n_dir(&self) -> PathBuf {
        self.source_root.join("i18n")
    }

    /// An i18n config file plus a locales directory.
    pub fn is_configured(&self) -> bool {
        let i18n_dir = self.i18n_dir();
        let has_config = CONFIG_EXTENSIONS
            .iter()
            .any(|ext| i18n_dir.join(format!("config.{}", ext)).is_file());
        has_config && self.locales_dir.is_dir()
    }

    pub fn require_configured(&self) -> Result<(), ProjectError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ProjectError::NotConfigured {
                source_root: self.source_root.clone(),
            })
        }
    }

    pub fn store(&self, marker: PendingMarker) -> LocaleStore {
        LocaleStore::new(&self.locales_dir, marker)
    }

    /// Languages with a locale file, source language first.
    pub fn existing_languages(&self) -> Result<Vec<String>> {
        let found = LocaleStore::new(&self.locales_dir, PendingMarker::default()).languages()?;
        let mut languages = Vec::with_capacity(found.len());
        if found.contains(&self.source_language) {
            languages.push(self.source_language.clone());
        }
        languages.extend(found.into_iter().filter(|l| *l != self.source_language));
        Ok(languages)
    }

    /// Existing locale languages plus the configured targets, source first.
    pub fn all_languages(&self) -> Result<Vec<String>> {
        let mut languages = vec![self.source_language.clone()];
        for lang in self
            .existing_languages()?
            .into_iter()
            .chain(self.target_languages.iter().cloned())
        {
            if !languages.contains(&lang) {
                languages.push(lang);
            }
        }
        Ok(languages)
    }

    /// Scaffold `i18n/config.ts`, `i18n/index.ts` and a skeleton locale file
    /// per language. Existing files are never overwritten.
    pub fn init_i18n(&self, languages: &[String]) -> Result<SetupResult> {
        for lang in languages {
            validate_language(lang)?;
        }
        let i18n_dir = self.i18n_dir();
        fs::create_dir_all(&self.locales_dir).with_context(|| {
            format!("Failed to create directory: {}", self.locales_dir.display())
        })?;

        let mut result = SetupResult::default();
        let has_config = CONFIG_EXTENSIONS
            .iter()
            .any(|ext| i18n_dir.join(format!("config.{}", ext)).is_file());
        let config_path = i18n_dir.join("config.ts");
        if has_config {
            result.kept.push(config_path);
        } else {
            write_atomic(&config_path, &i18next_config(&self.source_language))?;
            result.created.push(config_path);
        }

        let index_path = i18n_dir.join("index.ts");
        write_if_absent(&index_path, "export { default } from './config';\n", &mut result)?;

        let skeleton = LocaleTree::with_sections(SKELETON_SECTIONS.iter().copied());
        let content = format!(
            "{}\n",
            serde_json::to_string_pretty(&skeleton).context("Failed to serialize JSON")?
        );
        let mut all = vec![self.source_language.clone()];
        all.extend(languages.iter().filter(|l| **l != self.source_language).cloned());
        for lang in &all {
            let path = self.locales_dir.join(format!("{}.json", lang));
            write_if_absent(&path, &content, &mut result)?;
        }

        tracing::info!("Scaffolded {} files", result.created.len());
        Ok(result)
    }
}

fn write_if_absent(path: &Path, content: &str, result: &mut SetupResult) -> Result<()> {
    if path.exists() {
        result.kept.push(path.to_path_buf());
    } else {
        write_atomic(path, content)?;
        result.created.push(path.to_path_buf());
    }
    Ok(())
}

fn i18next_config(source_language: &str) -> String {
    format!(
        r#"import i18n from 'i18next';
import {{ initReactI18next }} from 'react-i18next';
import source from './locales/{lang}.json';

i18n.use(initReactI18next).init({{
  resources: {{ '{lang}': {{ translation: source }} }},
  lng: '{lang}',
  fallbackLng: '{lang}',
  interpolation: {{ escapeValue: false }},
}});

export default i18n;
"#,
        lang = source_language
    )
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::locale::DEFAULT_PENDING_MARKER;

pub const CONFIG_FILE_NAME: &str = ".locsmithrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default)]
    pub target_languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default = "default_text_attributes")]
    pub text_attributes: Vec<String>,
    #[serde(default = "default_text_properties")]
    pub text_properties: Vec<String>,
    #[serde(default = "default_pending_marker")]
    pub pending_marker: String,
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
    #[serde(default)]
    pub translator: TranslatorConfig,
}

/// Which translation provider fills pending entries, and how it is reached.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatorConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default = "default_translator_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause between two provider calls, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Google,
    Identity,
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_extensions() -> Vec<String> {
    ["tsx", "jsx", "ts", "js"].map(String::from).to_vec()
}

fn default_exclude_dirs() -> Vec<String> {
    [
        "node_modules",
        "dist",
        "build",
        ".git",
        "coverage",
        ".next",
        "out",
        "i18n",
    ]
    .map(String::from)
    .to_vec()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_text_attributes() -> Vec<String> {
    [
        "title",
        "alt",
        "placeholder",
        "aria-label",
        "aria-description",
        "label",
        "description",
        "tooltip",
        "caption",
        "heading",
        "subtitle",
        "helperText",
    ]
    .map(String::from)
    .to_vec()
}

fn default_text_properties() -> Vec<String> {
    [
        "label",
        "title",
        "description",
        "message",
        "error",
        "header",
        "heading",
        "subtitle",
        "content",
        "tooltip",
        "text",
        "caption",
        "body",
        "footer",
        "placeholder",
    ]
    .map(String::from)
    .to_vec()
}

fn default_pending_marker() -> String {
    DEFAULT_PENDING_MARKER.to_string()
}

fn default_backup_dir() -> String {
    ".locsmith/backups".to_string()
}

fn default_translator_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_delay_ms() -> u64 {
    50
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            endpoint: default_translator_endpoint(),
            timeout_secs: default_timeout_secs(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_languages: Vec::new(),
            source_root: None,
            extensions: default_extensions(),
            exclude_dirs: default_exclude_dirs(),
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
            ignore_texts: Vec::new(),
            text_attributes: default_text_attributes(),
            text_properties: default_text_properties(),
            pending_marker: default_pending_marker(),
            backup_dir: default_backup_dir(),
            translator: TranslatorConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores`, an empty
    /// pending marker, or attribute/property names that are not identifiers.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.pending_marker.trim().is_empty() {
            anyhow::bail!("'pendingMarker' must contain at least one visible character");
        }

        if self.text_attributes.is_empty() {
            anyhow::bail!("'textAttributes' must name at least one attribute");
        }
        if self.text_properties.is_empty() {
            anyhow::bail!("'textProperties' must name at least one property");
        }

        for name in self.text_attributes.iter().chain(&self.text_properties) {
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                anyhow::bail!(
                    "Invalid name in 'textAttributes'/'textProperties': \"{}\"",
                    name
                );
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

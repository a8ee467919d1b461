use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod dedupe;
mod detect;
mod generate;
mod init;
mod replace;
mod run;
mod setup;
mod sync;
mod validate;

const BIN_NAME: &str = "locsmith";

pub const HERO: &str = r#"import React from 'react';

export default function Hero() {
  return (
    <section>
      <h1>Welcome Back</h1>
      <input placeholder="Search Products" />
    </section>
  );
}
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// A project with `src/components/Hero.tsx` and i18n already set up for
    /// English with Dutch as target language.
    pub fn configured() -> Result<Self> {
        let test = Self::with_file("src/components/Hero.tsx", HERO)?;
        test.write_file(
            ".locsmithrc.json",
            r#"{ "sourceLanguage": "en", "targetLanguages": ["nl"] }"#,
        )?;
        test.write_file("src/i18n/config.ts", "export default {};\n")?;
        test.write_file("src/i18n/locales/en.json", "{}\n")?;
        test.write_file("src/i18n/locales/nl.json", "{}\n")?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// Run `locsmith <args>` in the project directory.
    pub fn run(&self, args: &[&str]) -> Result<CliOutput> {
        let output = self
            .command()
            .args(args)
            .output()
            .with_context(|| format!("Failed to run locsmith {}", args.join(" ")))?;
        Ok(CliOutput::from(output))
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }
}

pub struct CliOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for CliOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

use anyhow::{Context, Result};
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Created"));
    assert!(test.root().join(".locsmithrc.json").exists());

    let content = test.read_file(".locsmithrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceLanguage"], "en");
    assert_eq!(parsed["pendingMarker"], "[SRC] ");
    assert!(parsed["targetLanguages"].is_array());
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".locsmithrc.json", "{}")?;

    let output = test.run(&["init"])?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("already exists"));
    assert_eq!(test.read_file(".locsmithrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["--help"])?;
    assert_eq!(output.code, Some(0));
    for command in ["init", "setup", "detect", "generate", "sync", "translate", "replace"] {
        assert!(output.stdout.contains(command), "help should list {}", command);
    }

    Ok(())
}

use anyhow::Result;
use serde_json::json;

use crate::CliTest;

fn lagging() -> Result<CliTest> {
    let test = CliTest::configured()?;
    test.write_file(
        "src/i18n/locales/en.json",
        r#"{"common": {"save": "Save", "cancel": "Cancel"}}"#,
    )?;
    test.write_file("src/i18n/locales/nl.json", r#"{"common": {"save": "Opslaan"}}"#)?;
    Ok(test)
}

#[test]
fn test_sync_dry_run() -> Result<()> {
    let test = lagging()?;

    let output = test.run(&["sync"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Would add 1 key to nl: common.cancel"));
    assert_eq!(
        test.read_json("src/i18n/locales/nl.json")?,
        json!({"common": {"save": "Opslaan"}})
    );

    Ok(())
}

#[test]
fn test_sync_apply_fills_with_marker() -> Result<()> {
    let test = lagging()?;

    let output = test.run(&["sync", "--apply"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Added 1 key to nl"));
    assert_eq!(
        test.read_json("src/i18n/locales/nl.json")?,
        json!({"common": {"save": "Opslaan", "cancel": "[SRC] Cancel"}})
    );

    let again = test.run(&["sync"])?;
    assert!(again.stdout.contains("All locale files have the same keys"));

    Ok(())
}

#[test]
fn test_sync_requires_setup() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "")?;

    let output = test.run(&["sync"])?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("locsmith setup"));

    Ok(())
}

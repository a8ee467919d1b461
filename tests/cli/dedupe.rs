use anyhow::Result;
use serde_json::json;

use crate::CliTest;

fn duplicated() -> Result<CliTest> {
    let test = CliTest::configured()?;
    test.write_file(
        "src/i18n/locales/en.json",
        r#"{"common": {"save": "Save"}, "button": {"save": "Save", "close": "Close"}}"#,
    )?;
    test.write_file(
        "src/i18n/locales/nl.json",
        r#"{"common": {"save": "Opslaan"}, "button": {"save": "Bewaren", "close": "Sluiten"}}"#,
    )?;
    Ok(test)
}

#[test]
fn test_dedupe_dry_run() -> Result<()> {
    let test = duplicated()?;

    let output = test.run(&["dedupe"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("\"Save\": keep common.save, remove button.save"));
    assert!(output.stdout.contains("Would remove 1 key from every language."));
    assert_eq!(
        test.read_json("src/i18n/locales/en.json")?["button"]["save"],
        "Save"
    );

    Ok(())
}

#[test]
fn test_dedupe_apply_removes_from_all_languages() -> Result<()> {
    let test = duplicated()?;

    let output = test.run(&["dedupe", "--apply"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Removed 1 key from 2 language files"));
    assert_eq!(
        test.read_json("src/i18n/locales/en.json")?,
        json!({"common": {"save": "Save"}, "button": {"close": "Close"}})
    );
    assert_eq!(
        test.read_json("src/i18n/locales/nl.json")?,
        json!({"common": {"save": "Opslaan"}, "button": {"close": "Sluiten"}})
    );

    Ok(())
}

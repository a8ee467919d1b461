use anyhow::Result;

use crate::CliTest;

#[test]
fn test_validate_missing_key_fails() -> Result<()> {
    let test = CliTest::configured()?;
    test.write_file(
        "src/i18n/locales/en.json",
        "{\n  \"common\": {\n    \"save\": \"Save\",\n    \"cancel\": \"Cancel\"\n  }\n}\n",
    )?;
    test.write_file("src/i18n/locales/nl.json", r#"{"common": {"save": "Opslaan"}}"#)?;

    let output = test.run(&["validate"])?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("error: \"common.cancel\"  missing-key"));
    assert!(output.stdout.contains("--> src/i18n/locales/en.json:4"));
    assert!(output.stdout.contains("= note: missing in: nl"));
    assert!(output.stdout.contains("nl: 1 key, 1 missing, 0 untranslated, 0 orphan"));

    Ok(())
}

#[test]
fn test_validate_pending_translation_is_warning() -> Result<()> {
    let test = CliTest::configured()?;
    test.write_file("src/i18n/locales/en.json", r#"{"common": {"save": "Save"}}"#)?;
    test.write_file("src/i18n/locales/nl.json", r#"{"common": {"save": "[SRC] Save"}}"#)?;

    let output = test.run(&["validate"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("untranslated"));
    assert!(output.stdout.contains("pending translation in nl"));

    Ok(())
}

#[test]
fn test_validate_clean() -> Result<()> {
    let test = CliTest::configured()?;
    test.write_file("src/i18n/locales/en.json", r#"{"common": {"save": "Save"}}"#)?;
    test.write_file("src/i18n/locales/nl.json", r#"{"common": {"save": "Opslaan"}}"#)?;

    let output = test.run(&["validate"])?;
    assert_eq!(output.code, Some(0));
    assert!(!output.stdout.contains("problems"));
    assert!(output.stdout.contains("en (source): 1 key"));

    Ok(())
}

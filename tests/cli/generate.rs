use anyhow::Result;
use serde_json::json;

use crate::CliTest;

#[test]
fn test_generate_dry_run_lists_keys() -> Result<()> {
    let test = CliTest::configured()?;

    let output = test.run(&["generate"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("common.welcomeback"));
    assert!(output.stdout.contains("\"Welcome Back\""));
    assert!(output.stdout.contains("common.searchproducts"));
    assert!(output.stdout.contains("Would write 2 keys."));
    assert_eq!(test.read_file("src/i18n/locales/en.json")?, "{}\n");

    Ok(())
}

#[test]
fn test_generate_apply_writes_every_language() -> Result<()> {
    let test = CliTest::configured()?;

    let output = test.run(&["generate", "--apply"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Wrote 4 keys across 2 language files"));

    insta::assert_snapshot!(test.read_file("src/i18n/locales/en.json")?, @r#"
    {
      "common": {
        "welcomeback": "Welcome Back",
        "searchproducts": "Search Products"
      }
    }
    "#);
    assert_eq!(
        test.read_json("src/i18n/locales/nl.json")?,
        json!({"common": {
            "welcomeback": "[SRC] Welcome Back",
            "searchproducts": "[SRC] Search Products"
        }})
    );

    Ok(())
}

#[test]
fn test_generate_reuses_existing_keys() -> Result<()> {
    let test = CliTest::configured()?;
    test.write_file(
        "src/i18n/locales/en.json",
        r#"{"common": {"greeting": "Welcome Back"}}"#,
    )?;

    let output = test.run(&["generate"])?;
    assert!(output.stdout.contains("common.greeting"));
    assert!(output.stdout.contains("existing"));
    assert!(!output.stdout.contains("common.welcomeback"));

    Ok(())
}

#[test]
fn test_generate_reports_collisions() -> Result<()> {
    let test = CliTest::configured()?;
    test.write_file(
        "src/components/Card.tsx",
        "export function Card() {\n  return <p>Welcome Back, friend</p>;\n}\n",
    )?;

    let output = test.run(&["generate"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("common.welcomeback1"));
    assert!(output.stdout.contains("key-collision"));

    Ok(())
}

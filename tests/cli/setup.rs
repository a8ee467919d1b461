use anyhow::Result;

use crate::CliTest;

#[test]
fn test_setup_scaffolds_i18n() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "export default function App() { return null; }\n")?;

    let output = test.run(&["setup", "--languages", "nl,de"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("i18n set up (5 files created)"));

    let config = test.read_file("src/i18n/config.ts")?;
    assert!(config.contains("from 'react-i18next'"));
    assert!(config.contains("lng: 'en'"));
    for lang in ["en", "nl", "de"] {
        let locale = test.read_json(&format!("src/i18n/locales/{}.json", lang))?;
        assert!(locale["common"].is_object());
        assert!(locale["message"].is_object());
    }

    Ok(())
}

#[test]
fn test_setup_keeps_existing_files() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "")?;
    test.write_file("src/i18n/locales/en.json", "{\"common\": {\"ok\": \"OK\"}}\n")?;

    let output = test.run(&["setup"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("kept"));
    assert_eq!(test.read_json("src/i18n/locales/en.json")?["common"]["ok"], "OK");

    Ok(())
}

#[test]
fn test_setup_without_source_dir() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["setup"])?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("no source directory found"));

    Ok(())
}

#[test]
fn test_setup_rejects_bad_language() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "")?;

    let output = test.run(&["setup", "--languages", "Dutch"])?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("invalid language code 'Dutch'"));

    Ok(())
}

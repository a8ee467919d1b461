use std::fs;

use anyhow::{Context, Result};

use crate::{CliTest, HERO};

#[test]
fn test_replace_dry_run_leaves_sources() -> Result<()> {
    let test = CliTest::configured()?;

    let output = test.run(&["replace"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("src/components/Hero.tsx"));
    assert!(output.stdout.contains("Would replace 2 texts in 1 file."));
    assert_eq!(test.read_file("src/components/Hero.tsx")?, HERO);
    assert!(!test.root().join(".locsmith").exists());

    Ok(())
}

#[test]
fn test_replace_apply_rewrites_and_backs_up() -> Result<()> {
    let test = CliTest::configured()?;

    let output = test.run(&["replace", "--apply"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Wrote 4 keys across 2 language files"));
    assert!(output.stdout.contains("Replaced 2 texts in 1 file"));
    assert!(output.stdout.contains("Backups:"));

    let en = test.read_json("src/i18n/locales/en.json")?;
    assert_eq!(en["common"]["welcomeback"], "Welcome Back");
    assert_eq!(en["common"]["searchproducts"], "Search Products");
    let nl = test.read_json("src/i18n/locales/nl.json")?;
    assert_eq!(nl["common"]["welcomeback"], "[SRC] Welcome Back");

    let rewritten = test.read_file("src/components/Hero.tsx")?;
    assert!(rewritten.contains("import { useTranslation } from 'react-i18next';"));
    assert!(rewritten.contains("const { t } = useTranslation();"));
    assert!(rewritten.contains("<h1>{t(\"common.welcomeback\")}</h1>"));
    assert!(rewritten.contains("placeholder={t(\"common.searchproducts\")}"));

    for key in rewritten.split("t(\"").skip(1).filter_map(|rest| rest.split('"').next()) {
        let (section, name) = key.split_once('.').context("key without section")?;
        assert!(en[section][name].is_string(), "{} missing from en.json", key);
    }

    let runs: Vec<_> = fs::read_dir(test.root().join(".locsmith/backups"))?
        .collect::<Result<_, _>>()?;
    assert_eq!(runs.len(), 1);
    let backup = fs::read_to_string(runs[0].path().join("src/components/Hero.tsx"))?;
    assert_eq!(backup, HERO);

    Ok(())
}

#[test]
fn test_replace_keeps_existing_locale_values() -> Result<()> {
    let test = CliTest::configured()?;
    test.write_file(
        "src/i18n/locales/nl.json",
        r#"{ "common": { "welcomeback": "Welkom terug" } }"#,
    )?;

    let output = test.run(&["replace", "--apply"])?;
    assert_eq!(output.code, Some(0));

    let nl = test.read_json("src/i18n/locales/nl.json")?;
    assert_eq!(nl["common"]["welcomeback"], "Welkom terug");
    assert_eq!(nl["common"]["searchproducts"], "[SRC] Search Products");

    Ok(())
}

#[test]
fn test_replace_nothing_to_do() -> Result<()> {
    let test = CliTest::configured()?;
    test.write_file("src/components/Hero.tsx", "export const x = 1;\n")?;

    let output = test.run(&["replace", "--apply"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Nothing to replace"));

    Ok(())
}

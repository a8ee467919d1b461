use anyhow::Result;
use serde_json::json;

use crate::{CliTest, HERO};

#[test]
fn test_run_without_apply_only_previews() -> Result<()> {
    let test = CliTest::configured()?;

    let output = test.run(&["run"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("common.welcomeback"));
    assert!(output.stdout.contains("Would write 2 keys."));
    assert_eq!(test.read_file("src/components/Hero.tsx")?, HERO);

    Ok(())
}

#[test]
fn test_run_apply_full_workflow() -> Result<()> {
    let test = CliTest::configured()?;

    let output = test.run(&["run", "--apply", "--provider", "identity"])?;
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("detect 2 texts, 2 keys"));
    assert!(output.stdout.contains("translate nl: 2 translated, 0 failed"));
    assert!(output.stdout.contains("Replaced 2 texts in 1 file"));

    assert_eq!(
        test.read_json("src/i18n/locales/nl.json")?,
        json!({"common": {"welcomeback": "Welcome Back", "searchproducts": "Search Products"}})
    );
    let rewritten = test.read_file("src/components/Hero.tsx")?;
    assert!(rewritten.contains("{t(\"common.welcomeback\")}"));

    // Nothing left to do on a second run.
    let again = test.run(&["run", "--apply", "--provider", "identity"])?;
    assert_eq!(again.code, Some(0));
    assert!(again.stdout.contains("detect 0 texts, 0 keys"));

    Ok(())
}

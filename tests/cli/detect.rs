use anyhow::Result;

use crate::{CliTest, HERO};

#[test]
fn test_detect_reports_hardcoded_text() -> Result<()> {
    let test = CliTest::with_file("src/components/Hero.tsx", HERO)?;

    let output = test.run(&["detect"])?;
    assert_eq!(output.code, Some(0));

    let stdout = &output.stdout;
    assert!(stdout.contains("warning: \"Welcome Back\"  hardcoded"));
    assert!(stdout.contains("--> src/components/Hero.tsx:6:11"));
    assert!(stdout.contains("= note: context: jsx_text"));
    assert!(stdout.contains("warning: \"Search Products\"  hardcoded"));
    assert!(stdout.contains("= note: context: jsx_attr"));
    assert!(stdout.contains("2 problems (0 errors, 2 warnings)"));
    assert!(stdout.contains("Found 2 hardcoded texts in 1 source file."));

    Ok(())
}

#[test]
fn test_detect_clean_project() -> Result<()> {
    let test = CliTest::with_file(
        "src/Button.tsx",
        "export function Button() {\n  return <button>{t(\"button.submit\")}</button>;\n}\n",
    )?;

    let output = test.run(&["detect"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("no hardcoded text found"));
    assert!(!output.stdout.contains("problems"));

    Ok(())
}

#[test]
fn test_detect_honors_ignores() -> Result<()> {
    let test = CliTest::with_file("src/generated/Banner.tsx", "<p>Generated Banner Text</p>\n")?;
    test.write_file(".locsmithrc.json", r#"{ "ignores": ["**/generated/**"] }"#)?;

    let output = test.run(&["detect"])?;
    assert_eq!(output.code, Some(0));
    assert!(!output.stdout.contains("Generated Banner Text"));

    Ok(())
}

#[test]
fn test_detect_skips_test_files() -> Result<()> {
    let test = CliTest::with_file("src/Hero.test.tsx", "<h1>Welcome Back</h1>\n")?;

    let output = test.run(&["detect"])?;
    assert!(!output.stdout.contains("Welcome Back"));

    Ok(())
}

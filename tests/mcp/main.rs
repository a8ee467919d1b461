use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tempfile::TempDir;

mod tools;

pub const LOCALES_DIR: &str = "src/i18n/locales";

/// Test fixture for MCP integration tests
///
/// Manages a temporary React project with i18n set up under `src/i18n`.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create a project with an empty `src/` and no i18n setup
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;
        fs::create_dir_all(project_root.join("src"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a configured project with locale files
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_locales(vec![
    ///     ("en", json!({"common": {"save": "Save"}})),
    ///     ("nl", json!({"common": {"save": "Opslaan"}})),
    /// ])?;
    /// ```
    pub fn with_locales(locales: Vec<(&str, Value)>) -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write_source_file("src/i18n/config.ts", "export default {};\n")?;
        let targets: Vec<&str> = locales
            .iter()
            .map(|(lang, _)| *lang)
            .filter(|lang| *lang != "en")
            .collect();
        fixture.write_config(&json!({ "sourceLanguage": "en", "targetLanguages": targets }))?;
        for (lang, content) in locales {
            fixture.write_locale_file(lang, &content)?;
        }
        Ok(fixture)
    }

    /// Write a locale JSON file to src/i18n/locales/<lang>.json
    pub fn write_locale_file(&self, lang: &str, content: &Value) -> Result<()> {
        let path = self.locale_path(lang);
        fs::create_dir_all(self.project_root.join(LOCALES_DIR))?;
        let json_str = serde_json::to_string_pretty(content)
            .with_context(|| format!("Failed to serialize JSON for locale: {}", lang))?;
        fs::write(&path, format!("{}\n", json_str))
            .with_context(|| format!("Failed to write locale file: {}", path.display()))?;
        Ok(())
    }

    /// Read a locale JSON file from src/i18n/locales/<lang>.json
    pub fn read_locale_file(&self, lang: &str) -> Result<Value> {
        let path = self.locale_path(lang);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read locale file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {}", path.display()))
    }

    /// Write a TSX/TS file relative to the project root
    pub fn write_source_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write source file: {}", path.display()))?;
        Ok(())
    }

    /// Write a .locsmithrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".locsmithrc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    fn locale_path(&self, lang: &str) -> PathBuf {
        self.project_root
            .join(LOCALES_DIR)
            .join(format!("{}.json", lang))
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// English source with a Dutch file lagging one key behind
pub fn fixture_with_lag() -> Result<McpTestFixture> {
    McpTestFixture::with_locales(vec![
        (
            "en",
            json!({
                "common": {
                    "save": "Save",
                    "cancel": "Cancel"
                }
            }),
        ),
        (
            "nl",
            json!({
                "common": {
                    "save": "Opslaan"
                }
            }),
        ),
    ])
}

/// Source file with three hardcoded texts across two contexts
pub fn fixture_with_hardcoded() -> Result<McpTestFixture> {
    let fixture = McpTestFixture::with_locales(vec![("en", json!({}))])?;
    fixture.write_source_file(
        "src/components/Hero.tsx",
        r#"export default function Hero() {
  return (
    <section>
      <h1>Welcome Back</h1>
      <p>Start Your Journey</p>
      <input placeholder="Search Products" />
    </section>
  );
}
"#,
    )?;
    Ok(fixture)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert pagination fields in a paginated result
pub fn assert_pagination(
    result: &Value,
    expected_offset: usize,
    expected_limit: usize,
    expected_has_more: bool,
) {
    let pagination = &result["pagination"];
    assert_eq!(
        pagination["offset"].as_u64().unwrap(),
        expected_offset as u64,
        "Pagination offset mismatch"
    );
    assert_eq!(
        pagination["limit"].as_u64().unwrap(),
        expected_limit as u64,
        "Pagination limit mismatch"
    );
    assert_eq!(
        pagination["hasMore"].as_bool().unwrap(),
        expected_has_more,
        "Pagination hasMore mismatch"
    );
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}

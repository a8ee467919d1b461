use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Parameters
// ============================================================

/// Parameters for tools that only need the project location
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    /// Absolute path of the project root (the directory holding .locsmithrc.json)
    pub project_root_path: String,
}

/// Parameters for paginated tools
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedParams {
    /// Absolute path of the project root (the directory holding .locsmithrc.json)
    pub project_root_path: String,
    /// Maximum number of items to return (default 20, max 100)
    pub limit: Option<u32>,
    /// Number of items to skip (default 0)
    pub offset: Option<u32>,
}

/// Parameters for tools that can write to the locale files
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyParams {
    /// Absolute path of the project root (the directory holding .locsmithrc.json)
    pub project_root_path: String,
    /// Write the changes; without it the tool only reports what would change
    #[serde(default)]
    pub apply: bool,
}

// ============================================================
// Project Types (get_project)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResult {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub source_root: String,
    pub locales_dir: String,
    pub source_language: String,
    pub target_languages: Vec<String>,
    /// True once the i18n config and locales directory exist
    pub configured: bool,
    pub locales: Vec<LocaleInfo>,
}

/// Information about a single locale file
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub lang: String,
    pub file_path: String,
    pub key_count: usize,
}

// ============================================================
// Detection Types (detect_text)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectTextResult {
    pub total_count: usize,
    pub total_file_count: usize,
    pub files_scanned: usize,
    pub items: Vec<DetectedItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectedItem {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub text: String,
    /// "jsx_text", "jsx_attr" or "obj_property"
    pub context: String,
    pub source_line: String,
}

// ============================================================
// Key Types (preview_keys)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewKeysResult {
    pub total_count: usize,
    pub items: Vec<KeyItem>,
    /// Base keys that were numbered because different texts shared them
    pub collisions: Vec<String>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyItem {
    pub key: String,
    pub text: String,
    /// True if the source locale already held this text
    pub reused: bool,
    pub occurrences: usize,
}

// ============================================================
// Locale Types (validate_locales, find_duplicates, sync_locales)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResult {
    pub source_language: String,
    pub missing_count: usize,
    pub untranslated_count: usize,
    pub orphaned_count: usize,
    pub duplicate_count: usize,
    pub languages: Vec<LanguageStatus>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStatus {
    pub lang: String,
    pub is_source: bool,
    pub file_exists: bool,
    pub total: usize,
    pub missing: Vec<String>,
    pub untranslated: Vec<String>,
    pub orphaned: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatesResult {
    pub applied: bool,
    pub groups: Vec<DuplicateItem>,
    /// Keys removed per language (empty on dry runs)
    pub removed: Vec<LanguageKeys>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateItem {
    pub value: String,
    pub kept_key: String,
    pub redundant_keys: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageKeys {
    pub lang: String,
    pub keys: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub applied: bool,
    pub total_added: usize,
    pub languages: Vec<LanguageSyncItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSyncItem {
    pub lang: String,
    pub added: Vec<String>,
    pub refreshed: Vec<String>,
    pub conflicts: Vec<String>,
}

// ============================================================
// Common Types
// ============================================================

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

impl Pagination {
    /// Slice `items` by the requested page.
    pub fn page<T>(items: Vec<T>, limit: Option<u32>, offset: Option<u32>) -> (Vec<T>, Self) {
        let limit = limit.map(|v| v as usize).unwrap_or(20).min(100);
        let offset = offset.map(|v| v as usize).unwrap_or(0);
        let total = items.len();
        let page: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + page.len() < total;
        (
            page,
            Self {
                offset,
                limit,
                has_more,
            },
        )
    }
}

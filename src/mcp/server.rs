use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{config::load_config, core::WorkflowSession, utils::display_path};

use super::types::{
    ApplyParams, DetectTextResult, DetectedItem, DuplicateItem, DuplicatesResult, KeyItem,
    LanguageKeys, LanguageStatus, LanguageSyncItem, LocaleInfo, PagedParams, Pagination,
    PreviewKeysResult, ProjectParams, ProjectResult, SyncResult, ValidateResult,
};

fn internal(context: &str, err: anyhow::Error) -> McpError {
    McpError::internal_error(format!("{}: {:#}", context, err), None)
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

fn open_session(path: &str) -> Result<WorkflowSession, McpError> {
    let root = Path::new(path);
    let config = load_config(root)
        .map_err(|e| internal("Failed to load config", e))?
        .config;
    WorkflowSession::open(root, config).map_err(|e| internal("Failed to open project", e))
}

#[derive(Clone)]
pub struct LocsmithMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LocsmithMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LocsmithMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Describe the project layout and its locale files
    #[tool(
        description = "Get the project layout: source root, locales directory, languages and the key count of every locale file."
    )]
    pub async fn get_project(
        &self,
        params: Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let root = Path::new(&params.0.project_root_path);
        let loaded = load_config(root).map_err(|e| internal("Failed to load config", e))?;
        let from_file = loaded.from_file;
        let session = WorkflowSession::open(root, loaded.config)
            .map_err(|e| internal("Failed to open project", e))?;
        let project = session.project();

        let languages = project
            .all_languages()
            .map_err(|e| internal("Failed to list locales", e))?;
        let mut locales = Vec::new();
        for lang in languages {
            let path = session.store().path_for(&lang);
            let tree = session
                .store()
                .load_existing(&lang)
                .map_err(|e| internal("Failed to read locale file", e))?;
            let Some(tree) = tree else {
                continue;
            };
            locales.push(LocaleInfo {
                file_path: display_path(&project.project_root, &path),
                key_count: tree.leaf_keys().len(),
                lang,
            });
        }

        json_result(&ProjectResult {
            from_file,
            source_root: display_path(&project.project_root, &project.source_root),
            locales_dir: display_path(&project.project_root, &project.locales_dir),
            source_language: project.source_language.clone(),
            target_languages: project.target_languages.clone(),
            configured: project.is_configured(),
            locales,
        })
    }

    /// Find hardcoded user-facing text
    #[tool(
        description = "Find hardcoded user-facing text in the React/TypeScript sources. Returns a paginated list with file, line, column and context."
    )]
    pub async fn detect_text(
        &self,
        params: Parameters<PagedParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let mut session = open_session(&params.project_root_path)?;
        let detected = session.detect(None);

        let files: HashSet<&str> = detected
            .candidates
            .iter()
            .map(|c| c.rel_path.as_str())
            .collect();
        let total_file_count = files.len();
        let items: Vec<DetectedItem> = detected
            .candidates
            .iter()
            .map(|c| DetectedItem {
                file_path: c.rel_path.clone(),
                line: c.line,
                col: c.col,
                text: c.text.clone(),
                context: c.context.to_string(),
                source_line: c.source_line.clone(),
            })
            .collect();
        let total_count = items.len();
        let files_scanned = detected.files_scanned;
        let (items, pagination) = Pagination::page(items, params.limit, params.offset);

        json_result(&DetectTextResult {
            total_count,
            total_file_count,
            files_scanned,
            items,
            pagination,
        })
    }

    /// Preview the keys generated for detected text
    #[tool(
        description = "Preview the translation keys locsmith would assign to the detected text (paginated). Nothing is written."
    )]
    pub async fn preview_keys(
        &self,
        params: Parameters<PagedParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let mut session = open_session(&params.project_root_path)?;
        let mapping = session
            .generate(None)
            .map_err(|e| internal("Key generation failed", e))?;

        let items: Vec<KeyItem> = mapping
            .iter()
            .map(|(key, entry)| KeyItem {
                key: key.clone(),
                text: entry.text.clone(),
                reused: entry.reused,
                occurrences: entry.occurrences.len(),
            })
            .collect();
        let collisions = mapping
            .collisions()
            .iter()
            .map(|c| c.base_key.clone())
            .collect();
        let total_count = items.len();
        let (items, pagination) = Pagination::page(items, params.limit, params.offset);

        json_result(&PreviewKeysResult {
            total_count,
            items,
            collisions,
            pagination,
        })
    }

    /// Check locale files against the source language
    #[tool(
        description = "Validate the locale files: keys missing per language, pending translations, orphan keys and duplicate source values."
    )]
    pub async fn validate_locales(
        &self,
        params: Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = open_session(&params.0.project_root_path)?;
        let report = session
            .validate()
            .map_err(|e| internal("Validation failed", e))?;

        json_result(&ValidateResult {
            source_language: report.source_language.clone(),
            missing_count: report.missing_count(),
            untranslated_count: report.untranslated_count(),
            orphaned_count: report.orphaned_count(),
            duplicate_count: report.duplicates.len(),
            languages: report
                .languages
                .into_iter()
                .map(|l| LanguageStatus {
                    lang: l.lang,
                    is_source: l.is_source,
                    file_exists: l.file_exists,
                    total: l.total,
                    missing: l.missing,
                    untranslated: l.untranslated,
                    orphaned: l.orphaned,
                })
                .collect(),
        })
    }

    /// Find (and optionally remove) keys holding duplicate values
    #[tool(
        description = "Find source-language keys that hold the same text. With apply=true the redundant keys are removed from every language, keeping the first key."
    )]
    pub async fn find_duplicates(
        &self,
        params: Parameters<ApplyParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = open_session(&params.0.project_root_path)?;
        let summary = session
            .dedupe(params.0.apply)
            .map_err(|e| internal("Duplicate scan failed", e))?;

        json_result(&DuplicatesResult {
            applied: summary.applied,
            groups: summary
                .groups
                .iter()
                .map(|g| DuplicateItem {
                    value: g.value.clone(),
                    kept_key: g.kept_key().to_string(),
                    redundant_keys: g.redundant_keys().to_vec(),
                })
                .collect(),
            removed: summary
                .removed
                .into_iter()
                .map(|(lang, keys)| LanguageKeys { lang, keys })
                .collect(),
        })
    }

    /// Give every locale file the same keys
    #[tool(
        description = "Synchronize locale files so every language holds every key. Missing entries get the pending marker. With apply=false only reports what would be added."
    )]
    pub async fn sync_locales(
        &self,
        params: Parameters<ApplyParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = open_session(&params.0.project_root_path)?;
        let summary = session
            .sync(params.0.apply, None)
            .map_err(|e| internal("Sync failed", e))?;

        json_result(&SyncResult {
            applied: summary.applied,
            total_added: summary.total_added(),
            languages: summary
                .languages
                .into_iter()
                .map(|l| LanguageSyncItem {
                    lang: l.lang,
                    added: l.added,
                    refreshed: l.refreshed,
                    conflicts: l.conflicts,
                })
                .collect(),
        })
    }
}

#[tool_handler]
impl ServerHandler for LocsmithMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Locsmith MCP helps AI agents migrate React/TypeScript projects to react-i18next.\n\n\
                 Available tools:\n\
                 1. get_project - Get the project layout, languages and locale files\n\
                 2. detect_text - List hardcoded user-facing text (paginated)\n\
                 3. preview_keys - Preview the keys that would be generated (paginated)\n\
                 4. validate_locales - Missing, pending, orphan and duplicate locale entries\n\
                 5. find_duplicates - Keys with duplicate values (apply=true removes them)\n\
                 6. sync_locales - Give every locale file the same keys (apply=true writes)\n\n\
                 Recommended Workflow:\n\
                 1. Use get_project to check that i18n is set up\n\
                 2. Review detect_text and preview_keys before running `locsmith run --apply`\n\
                 3. Use validate_locales and sync_locales to keep the languages in step"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LocsmithMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}

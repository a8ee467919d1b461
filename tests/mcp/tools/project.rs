use locsmith::mcp::{LocsmithMcpServer, types::ProjectParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// get_project tests
// ============================================================================

#[tokio::test]
async fn test_get_project_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocsmithMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_project(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["sourceRoot"], "src");
    assert_eq!(json_result["localesDir"], "src/i18n/locales");
    assert_eq!(json_result["sourceLanguage"], "en");
    assert_eq!(json_result["configured"], false);
    assert_eq!(json_result["locales"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_project_lists_locales() {
    let fixture = McpTestFixture::with_locales(vec![
        ("en", json!({"common": {"save": "Save", "cancel": "Cancel"}})),
        ("nl", json!({"common": {"save": "Opslaan"}})),
    ])
    .unwrap();
    let server = LocsmithMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_project(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["configured"], true);
    assert_eq!(json_result["targetLanguages"], json!(["nl"]));

    let locales = json_result["locales"].as_array().unwrap();
    assert_eq!(locales.len(), 2);
    assert_eq!(locales[0]["lang"], "en");
    assert_eq!(locales[0]["keyCount"], 2);
    assert_eq!(locales[0]["filePath"], "src/i18n/locales/en.json");
    assert_eq!(locales[1]["lang"], "nl");
    assert_eq!(locales[1]["keyCount"], 1);
}

#[tokio::test]
async fn test_get_project_without_source_dir() {
    let fixture = McpTestFixture::new().unwrap();
    std::fs::remove_dir(fixture.root_path().join("src")).unwrap();
    let server = LocsmithMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_project(params).await;
    assert!(result.is_err());
}

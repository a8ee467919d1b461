use locsmith::mcp::{LocsmithMcpServer, types::PagedParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, assert_pagination, extract_tool_result_json, fixture_with_hardcoded};

fn paged(fixture: &McpTestFixture, limit: Option<u32>, offset: Option<u32>) -> Parameters<PagedParams> {
    Parameters(PagedParams {
        project_root_path: fixture.root(),
        limit,
        offset,
    })
}

// ============================================================================
// detect_text tests
// ============================================================================

#[tokio::test]
async fn test_detect_text_no_sources() {
    let fixture = McpTestFixture::with_locales(vec![("en", json!({}))]).unwrap();
    let server = LocsmithMcpServer::new();

    let result = server.detect_text(paged(&fixture, None, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 0);
    assert_eq!(json_result["totalFileCount"], 0);
    assert_pagination(&json_result, 0, 20, false);
}

#[tokio::test]
async fn test_detect_text_items() {
    let fixture = fixture_with_hardcoded().unwrap();
    let server = LocsmithMcpServer::new();

    let result = server.detect_text(paged(&fixture, None, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 3);
    assert_eq!(json_result["totalFileCount"], 1);

    let items = json_result["items"].as_array().unwrap();
    let welcome = items
        .iter()
        .find(|item| item["text"] == "Welcome Back")
        .unwrap();
    assert_eq!(welcome["filePath"], "src/components/Hero.tsx");
    assert_eq!(welcome["line"], 4);
    assert_eq!(welcome["context"], "jsx_text");
    assert_eq!(welcome["sourceLine"], "      <h1>Welcome Back</h1>");

    let search = items
        .iter()
        .find(|item| item["text"] == "Search Products")
        .unwrap();
    assert_eq!(search["context"], "jsx_attr");
}

#[tokio::test]
async fn test_detect_text_pagination() {
    let fixture = fixture_with_hardcoded().unwrap();
    let server = LocsmithMcpServer::new();

    let result = server
        .detect_text(paged(&fixture, Some(2), None))
        .await
        .unwrap();
    let first = extract_tool_result_json(&result);
    assert_eq!(first["items"].as_array().unwrap().len(), 2);
    assert_pagination(&first, 0, 2, true);

    let result = server
        .detect_text(paged(&fixture, Some(2), Some(2)))
        .await
        .unwrap();
    let second = extract_tool_result_json(&result);
    assert_eq!(second["items"].as_array().unwrap().len(), 1);
    assert_pagination(&second, 2, 2, false);
}

#[tokio::test]
async fn test_detect_text_limit_is_capped() {
    let fixture = fixture_with_hardcoded().unwrap();
    let server = LocsmithMcpServer::new();

    let result = server
        .detect_text(paged(&fixture, Some(500), None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_pagination(&json_result, 0, 100, false);
}

// ============================================================================
// preview_keys tests
// ============================================================================

#[tokio::test]
async fn test_preview_keys() {
    let fixture = fixture_with_hardcoded().unwrap();
    let server = LocsmithMcpServer::new();

    let result = server.preview_keys(paged(&fixture, None, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 3);
    let keys: Vec<&str> = json_result["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["key"].as_str().unwrap())
        .collect();
    assert!(keys.contains(&"common.welcomeback"));
    assert!(keys.contains(&"common.startyourjourney"));
    assert!(keys.contains(&"common.searchproducts"));
    assert_eq!(json_result["collisions"], json!([]));

    // Nothing is written.
    assert_eq!(fixture.read_locale_file("en").unwrap(), json!({}));
}

#[tokio::test]
async fn test_preview_keys_reuses_existing() {
    let fixture = fixture_with_hardcoded().unwrap();
    fixture
        .write_locale_file("en", &json!({"common": {"hello": "Welcome Back"}}))
        .unwrap();
    let server = LocsmithMcpServer::new();

    let result = server.preview_keys(paged(&fixture, None, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let items = json_result["items"].as_array().unwrap();
    let welcome = items
        .iter()
        .find(|item| item["text"] == "Welcome Back")
        .unwrap();
    assert_eq!(welcome["key"], "common.hello");
    assert_eq!(welcome["reused"], true);
}

use locsmith::mcp::{
    LocsmithMcpServer,
    types::{ApplyParams, ProjectParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json, fixture_with_lag};

fn apply(fixture: &McpTestFixture, apply: bool) -> Parameters<ApplyParams> {
    Parameters(ApplyParams {
        project_root_path: fixture.root(),
        apply,
    })
}

// ============================================================================
// validate_locales tests
// ============================================================================

#[tokio::test]
async fn test_validate_locales_reports_missing() {
    let fixture = fixture_with_lag().unwrap();
    let server = LocsmithMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: fixture.root(),
    });
    let result = server.validate_locales(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["sourceLanguage"], "en");
    assert_eq!(json_result["missingCount"], 1);
    assert_eq!(json_result["untranslatedCount"], 0);

    let languages = json_result["languages"].as_array().unwrap();
    let nl = languages.iter().find(|l| l["lang"] == "nl").unwrap();
    assert_eq!(nl["missing"], json!(["common.cancel"]));
    assert_eq!(nl["isSource"], false);
}

#[tokio::test]
async fn test_validate_locales_requires_setup() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocsmithMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: fixture.root(),
    });
    assert!(server.validate_locales(params).await.is_err());
}

// ============================================================================
// sync_locales tests
// ============================================================================

#[tokio::test]
async fn test_sync_locales_dry_run() {
    let fixture = fixture_with_lag().unwrap();
    let server = LocsmithMcpServer::new();

    let result = server.sync_locales(apply(&fixture, false)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["applied"], false);
    assert_eq!(json_result["totalAdded"], 1);
    assert_eq!(
        fixture.read_locale_file("nl").unwrap(),
        json!({"common": {"save": "Opslaan"}})
    );
}

#[tokio::test]
async fn test_sync_locales_apply() {
    let fixture = fixture_with_lag().unwrap();
    let server = LocsmithMcpServer::new();

    let result = server.sync_locales(apply(&fixture, true)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["applied"], true);
    let nl = json_result["languages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["lang"] == "nl")
        .unwrap()
        .clone();
    assert_eq!(nl["added"], json!(["common.cancel"]));
    assert_eq!(
        fixture.read_locale_file("nl").unwrap(),
        json!({"common": {"save": "Opslaan", "cancel": "[SRC] Cancel"}})
    );
}

// ============================================================================
// find_duplicates tests
// ============================================================================

#[tokio::test]
async fn test_find_duplicates() {
    let fixture = McpTestFixture::with_locales(vec![
        (
            "en",
            json!({"common": {"ok": "OK", "save": "Save"}, "form": {"submit": "Save"}}),
        ),
        (
            "nl",
            json!({"common": {"ok": "OK", "save": "Opslaan"}, "form": {"submit": "Indienen"}}),
        ),
    ])
    .unwrap();
    let server = LocsmithMcpServer::new();

    let result = server.find_duplicates(apply(&fixture, false)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let groups = json_result["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["value"], "Save");
    assert_eq!(groups[0]["keptKey"], "common.save");
    assert_eq!(groups[0]["redundantKeys"], json!(["form.submit"]));
    assert_eq!(json_result["removed"], json!([]));

    let result = server.find_duplicates(apply(&fixture, true)).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["removed"].as_array().unwrap().len(), 2);
    assert_eq!(
        fixture.read_locale_file("nl").unwrap(),
        json!({"common": {"ok": "OK", "save": "Opslaan"}})
    );
}

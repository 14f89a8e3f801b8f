//! Tests for the MCP tool handlers.
//!
//! The handlers are the error boundary: sync failures come back as an error
//! result carrying the message text, and `record_updated` never fails.

mod mocks;

use attio_apollo_sync::domain::ObjectKind;
use attio_apollo_sync::matching::StageMatcher;
use attio_apollo_sync::models::AttioRecord;
use attio_apollo_sync::server::{PullDealStageParams, RecordParams};
use attio_apollo_sync::services::{RecordUpdatedEvent, SyncServiceImpl};
use attio_apollo_sync::{Metrics, SyncMcpServer, SyncSettings};
use mocks::{MockSourceRepository, MockTargetRepository};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use serde_json::json;
use std::sync::Arc;

fn server(
    source: &MockSourceRepository,
    target: &MockTargetRepository,
    settings: SyncSettings,
) -> SyncMcpServer {
    let service = SyncServiceImpl::new(
        Arc::new(source.clone()),
        Arc::new(target.clone()),
        settings,
        StageMatcher::default(),
        "https://app.apollo.io".to_string(),
        Metrics::new(),
    );
    SyncMcpServer::new(Arc::new(service))
}

fn record(object: &str, record_id: &str) -> Parameters<RecordParams> {
    Parameters(RecordParams {
        object: object.to_string(),
        record_id: record_id.to_string(),
    })
}

fn text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|content| content.as_text())
        .map(|content| content.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn person(record_id: &str, email: Option<&str>) -> AttioRecord {
    let mut values = json!({ "name": [{ "first_name": "Ada", "last_name": "Lovelace" }] });
    if let Some(email) = email {
        values["email_addresses"] = json!([{ "email_address": email }]);
    }
    AttioRecord::new(record_id, values)
}

#[tokio::test]
async fn test_push_missing_email_is_error_result() {
    let source = MockSourceRepository::new();
    let target = MockTargetRepository::new();
    source.add_record(ObjectKind::People, person("person-1", None));

    let result = server(&source, &target, SyncSettings::default())
        .push_to_apollo(record("people", "person-1"))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text(&result),
        "person record person-1 is missing required field: email"
    );
    assert_eq!(target.total_calls(), 0);
}

#[tokio::test]
async fn test_push_returns_status_message() {
    let source = MockSourceRepository::new();
    let target = MockTargetRepository::new();
    source.add_record(
        ObjectKind::People,
        person("person-1", Some("ada@example.com")),
    );

    let result = server(&source, &target, SyncSettings::default())
        .push_to_apollo(record("people", "person-1"))
        .await
        .unwrap();

    assert_ne!(result.is_error, Some(true));
    assert_eq!(
        text(&result),
        "Created Apollo contact contact-1 from person person-1"
    );
}

#[tokio::test]
async fn test_push_invalid_arguments_are_error_results() {
    let source = MockSourceRepository::new();
    let target = MockTargetRepository::new();
    let server = server(&source, &target, SyncSettings::default());

    let result = server
        .push_to_apollo(record("workspaces", "rec-1"))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert_eq!(text(&result), "Unsupported object type: workspaces");

    let result = server
        .push_to_apollo(record("people", "abc#x"))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(text(&result).starts_with("Invalid input"));

    let result = server
        .push_to_apollo(record("people", "ghost"))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert!(text(&result).starts_with("Attio request failed"));
}

#[tokio::test]
async fn test_view_not_yet_synced() {
    let source = MockSourceRepository::new();
    let target = MockTargetRepository::new();
    source.add_record(
        ObjectKind::People,
        person("person-1", Some("ada@example.com")),
    );

    let result = server(&source, &target, SyncSettings::default())
        .view_in_apollo(record("people", "person-1"))
        .await
        .unwrap();

    assert_ne!(result.is_error, Some(true));
    assert_eq!(text(&result), "Not yet synced to Apollo");
}

#[tokio::test]
async fn test_view_after_push_links_to_apollo() {
    let source = MockSourceRepository::new();
    let target = MockTargetRepository::new();
    source.add_record(
        ObjectKind::People,
        person("person-1", Some("ada@example.com")),
    );
    let settings = SyncSettings {
        apollo_id_attribute: Some("apollo_id".to_string()),
        ..SyncSettings::default()
    };
    let server = server(&source, &target, settings);

    server
        .push_to_apollo(record("people", "person-1"))
        .await
        .unwrap();
    let result = server
        .view_in_apollo(record("people", "person-1"))
        .await
        .unwrap();

    assert_eq!(
        text(&result),
        "View in Apollo: https://app.apollo.io/#/contacts/contact-1"
    );
}

#[tokio::test]
async fn test_record_updated_never_fails() {
    let source = MockSourceRepository::new();
    let target = MockTargetRepository::new();
    source.add_record(ObjectKind::People, person("person-1", None));
    let server = server(&source, &target, SyncSettings::default());

    for (object, record_id) in [("people", "person-1"), ("people", "ghost"), ("notes", "n-1")] {
        let result = server
            .record_updated(Parameters(RecordUpdatedEvent {
                object: object.to_string(),
                record_id: record_id.to_string(),
            }))
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        assert_eq!(
            text(&result),
            format!("No sync performed for {} {}", object, record_id)
        );
    }
    assert_eq!(target.total_calls(), 0);
}

#[tokio::test]
async fn test_pull_without_link_is_error_result() {
    let source = MockSourceRepository::new();
    let target = MockTargetRepository::new();

    let result = server(&source, &target, SyncSettings::default())
        .pull_deal_stage(Parameters(PullDealStageParams {
            opportunity_id: "opp-1".to_string(),
            record_id: None,
        }))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert!(text(&result).starts_with("Apollo request failed"));
}

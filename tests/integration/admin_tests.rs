//! 管理端查询与导出测试

use crate::helpers::{rows, test_settings};
use crate::mocks::FakeRowsApi;
use crate::Harness;
use chargelog::errors::AppError;
use chargelog::models::{AdminQuery, NoticeLevel, ResultTable, UserRole};
use chargelog::services::{AdminService, EXPORT_SUCCESS_MESSAGE, SESSION_EXPIRED_MESSAGE};
use serde_json::json;
use std::sync::Arc;

fn service(harness: &Harness, api: Arc<FakeRowsApi>) -> AdminService {
    AdminService::new(api, harness.session.clone(), harness.notifier.clone(), &test_settings())
}

#[tokio::test]
async fn test_search_by_battery() {
    let harness = Harness::with_role(UserRole::Admin);
    let api = Arc::new(FakeRowsApi::new());
    api.push_search(Ok(json!([
        {"id": "B-1", "date": "2024-05-01", "zone": "North"},
        {"id": "B-1", "date": "2024-05-02"},
    ])));
    let service = service(&harness, api.clone());

    let table = assert_ok!(service.search_by_battery(" B-1 ").await);
    assert_eq!(table.len(), 2);
    assert_eq!(table.columns(), ["id", "date", "zone"]);
    assert_eq!(table.cell(1, "zone"), "-");
    assert_eq!(api.queries(), vec![AdminQuery::by_battery("B-1").unwrap()]);
    assert!(harness.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_empty_results_show_info_notice() {
    let harness = Harness::with_role(UserRole::Admin);
    let api = Arc::new(FakeRowsApi::new());
    api.push_search(Ok(json!([])));
    api.push_search(Ok(json!({"unexpected": true})));
    let service = service(&harness, api);

    let table = assert_ok!(service.search_by_battery("B-404").await);
    assert!(table.is_empty());
    let table = assert_ok!(service.search_by_date_range("2024-01-01", "2024-01-31").await);
    assert!(table.is_empty());

    assert_eq!(
        harness.notifier.messages(),
        vec![
            "No data found for that Battery ID".to_string(),
            "No data found for that date range".to_string(),
        ]
    );
    assert_eq!(harness.notifier.count(NoticeLevel::Info), 2);
}

#[tokio::test]
async fn test_invalid_date_range_is_rejected_locally() {
    let harness = Harness::with_role(UserRole::Admin);
    let api = Arc::new(FakeRowsApi::new());
    let service = service(&harness, api.clone());

    assert_err!(service.search_by_date_range("2024-02-01", "2024-01-01").await);
    assert_err!(service.search_by_date_range("", "2024-01-01").await);
    assert_err!(service.search_by_battery("  ").await);

    assert_eq!(api.search_calls(), 0);
    assert_eq!(
        harness.notifier.messages(),
        vec![
            "From date cannot be later than To date".to_string(),
            "Please select both From and To dates".to_string(),
            "Please enter a Battery ID".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_non_admin_never_reaches_api() {
    let harness = Harness::with_role(UserRole::User);
    let api = Arc::new(FakeRowsApi::new());
    let service = service(&harness, api.clone());
    let query = AdminQuery::by_battery("B-1").unwrap();

    let err = assert_err!(service.search(&query).await);
    assert!(matches!(err, AppError::Forbidden(_)));
    assert_err!(service.export(&query).await);
    assert_err!(service.export_table(&query, &ResultTable::default()).await);

    assert_eq!(api.search_calls(), 0);
    assert_eq!(api.export_calls(), 0);
    assert_eq!(harness.provider.redirects(), 3);
}

#[tokio::test]
async fn test_unauthorized_search_signs_out() {
    let harness = Harness::with_role(UserRole::Admin);
    let api = Arc::new(FakeRowsApi::new());
    api.push_search(Err(AppError::Unauthorized("token expired".to_string())));
    let service = service(&harness, api);

    assert_err!(service.search_by_battery("B-1").await);

    assert_eq!(harness.provider.sign_outs(), 1);
    assert_eq!(harness.notifier.messages(), vec![SESSION_EXPIRED_MESSAGE.to_string()]);
    assert!(harness.session.current().is_err());
}

#[tokio::test]
async fn test_search_failure_messages_by_scope() {
    let harness = Harness::with_role(UserRole::Admin);
    let api = Arc::new(FakeRowsApi::new());
    api.push_search(Err(AppError::Transport { status: 500, message: None }));
    api.push_search(Err(AppError::Transport { status: 500, message: Some("db down".to_string()) }));
    let service = service(&harness, api);

    assert_err!(service.search_by_battery("B-1").await);
    assert_err!(service.search_by_date_range("2024-01-01", "2024-01-02").await);

    assert_eq!(
        harness.notifier.messages(),
        vec!["Error fetching data".to_string(), "Error fetching rows by date".to_string()]
    );
    assert_eq!(harness.provider.sign_outs(), 0);
}

#[tokio::test]
async fn test_export_by_battery() {
    let harness = Harness::with_role(UserRole::Admin);
    let api = Arc::new(FakeRowsApi::new());
    api.push_export(Ok(b"id,date\nB-1,2024-05-01\n".to_vec()));
    let service = service(&harness, api);

    let artifact = assert_ok!(service.export_by_battery("B-1").await).unwrap();
    assert_eq!(artifact.filename, "battery_B-1_export.csv");
    assert_eq!(artifact.content_type, "text/csv");
    assert_eq!(artifact.bytes, b"id,date\nB-1,2024-05-01\n");

    let notice = harness.notifier.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, EXPORT_SUCCESS_MESSAGE);
    assert_eq!(notice.display_for.as_millis(), 2500);
}

#[tokio::test]
async fn test_export_by_date_range() {
    let harness = Harness::with_role(UserRole::Admin);
    let api = Arc::new(FakeRowsApi::new());
    api.push_export(Ok(Vec::new()));
    api.push_export(Err(AppError::Transport { status: 500, message: None }));
    let service = service(&harness, api.clone());

    let artifact = assert_ok!(service.export_by_date_range("2024-01-01", "2024-01-31").await);
    assert!(artifact.is_none());
    assert_err!(service.export_by_date_range("2024-01-01", "2024-01-31").await);

    assert_eq!(
        harness.notifier.messages(),
        vec![
            "No data found for that date range".to_string(),
            "Error downloading CSV for date range".to_string(),
        ]
    );
    assert_eq!(api.export_calls(), 2);
}

#[tokio::test]
async fn test_export_requires_inputs() {
    let harness = Harness::with_role(UserRole::Admin);
    let api = Arc::new(FakeRowsApi::new());
    let service = service(&harness, api.clone());

    assert_err!(service.export_by_battery(" ").await);
    assert_err!(service.export_by_date_range("2024-01-01", "").await);

    assert_eq!(api.export_calls(), 0);
    assert_eq!(
        harness.notifier.messages(),
        vec![
            "Enter a Battery ID before downloading".to_string(),
            "Please select both From and To dates to download CSV".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_export_displayed_table() {
    let harness = Harness::with_role(UserRole::Admin);
    let api = Arc::new(FakeRowsApi::new());
    let service = service(&harness, api.clone());
    let query = AdminQuery::by_date_range("2024-03-01", "2024-03-02").unwrap();
    let table = ResultTable::from_rows(rows(json!([
        {"id": "B-1", "uin": null},
        {"id": "B-2", "uin": "U-2"},
    ])));

    let artifact = assert_ok!(service.export_table(&query, &table).await).unwrap();
    assert_eq!(artifact.filename, "rows_2024-03-01_to_2024-03-02_export.csv");
    assert_eq!(String::from_utf8(artifact.bytes).unwrap(), "id,uin\nB-1,\nB-2,U-2\n");
    assert_eq!(api.export_calls(), 0);

    let empty = assert_ok!(service.export_table(&query, &ResultTable::default()).await);
    assert!(empty.is_none());
    assert_eq!(harness.notifier.last().unwrap().message, "No data found for that date range");
}

#[tokio::test]
async fn test_overlapping_search_is_rejected() {
    let harness = Harness::with_role(UserRole::Admin);
    let api = Arc::new(FakeRowsApi::new());
    let release = api.hold();
    let service = service(&harness, api.clone());

    let by_battery = AdminQuery::by_battery("B-1").unwrap();
    let by_date = AdminQuery::by_date_range("2024-05-01", "2024-05-10").unwrap();

    let (first, (second, searching, other_scope, exporting)) =
        tokio::join!(service.search_by_battery("B-1"), async {
            let result = service.search_by_battery("B-1").await;
            let searching = service.is_searching(&by_battery);
            let other_scope = service.is_searching(&by_date);
            let exporting = service.is_exporting(&by_battery);
            release.notify_one();
            (result, searching, other_scope, exporting)
        });

    assert_ok!(first);
    assert!(matches!(assert_err!(second), AppError::OperationInProgress(_)));
    assert!(searching);
    assert!(!other_scope);
    assert!(!exporting);
    assert!(!service.is_searching(&by_battery));
    assert_eq!(api.search_calls(), 1);
}

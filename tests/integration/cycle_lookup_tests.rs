//! 循环次数查询测试

use crate::helpers::test_settings;
use crate::mocks::FakeRowsApi;
use crate::Harness;
use chargelog::errors::{AppError, ErrorKind};
use chargelog::models::{CycleTier, NoticeLevel, UserRole};
use chargelog::services::{CycleService, CYCLE_LOOKUP_FAILED_MESSAGE, ENTER_BATTERY_ID_MESSAGE};
use std::sync::Arc;

fn service(harness: &Harness, api: Arc<FakeRowsApi>) -> CycleService {
    CycleService::new(api, harness.session.clone(), harness.notifier.clone(), &test_settings())
}

#[tokio::test]
async fn test_lookup_classifies_count() {
    let harness = Harness::with_role(UserRole::User);
    let api = Arc::new(FakeRowsApi::new());
    api.push_cycles(Ok(501));
    let service = service(&harness, api.clone());

    let status = assert_ok!(service.lookup("  B-1 ").await);
    assert_eq!(status.count, 501);
    assert_eq!(status.tier, CycleTier::Critical);
    assert!(status.hard_critical);
    assert_eq!(api.cycle_calls(), 1);
}

#[tokio::test]
async fn test_missing_history_is_zero() {
    let harness = Harness::with_role(UserRole::User);
    let service = service(&harness, Arc::new(FakeRowsApi::new()));

    let status = assert_ok!(service.lookup("NEW-1").await);
    assert_eq!(status.count, 0);
    assert_eq!(status.tier, CycleTier::None);
}

#[tokio::test]
async fn test_blank_id_is_rejected_locally() {
    let harness = Harness::with_role(UserRole::User);
    let api = Arc::new(FakeRowsApi::new());
    let service = service(&harness, api.clone());

    let err = assert_err!(service.lookup("   ").await);
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(api.cycle_calls(), 0);
    assert_eq!(harness.notifier.messages(), vec![ENTER_BATTERY_ID_MESSAGE.to_string()]);
}

#[tokio::test]
async fn test_failure_notice() {
    let harness = Harness::with_role(UserRole::User);
    let api = Arc::new(FakeRowsApi::new());
    api.push_cycles(Err(AppError::Transport { status: 502, message: Some("bad gateway".to_string()) }));
    let service = service(&harness, api);

    assert_err!(service.lookup("B-2").await);
    let notice = harness.notifier.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, CYCLE_LOOKUP_FAILED_MESSAGE);
    assert_eq!(harness.provider.sign_outs(), 0);
}

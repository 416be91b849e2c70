//! 会话服务测试

use crate::Harness;
use chargelog::errors::AppError;
use chargelog::models::UserRole;
use chargelog::services::SESSION_EXPIRED_MESSAGE;

#[tokio::test]
async fn test_require_admin() {
    let admin = Harness::with_role(UserRole::Admin);
    let session = assert_ok!(admin.session.require_admin().await);
    assert!(session.is_admin());
    assert_eq!(admin.provider.redirects(), 0);

    let user = Harness::with_role(UserRole::User);
    let err = assert_err!(user.session.require_admin().await);
    assert!(matches!(err, AppError::Forbidden(_)));
    assert_eq!(user.provider.redirects(), 1);
    assert_eq!(user.provider.sign_outs(), 0);

    let anonymous = Harness::signed_out();
    let err = assert_err!(anonymous.session.require_admin().await);
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(anonymous.provider.redirects(), 1);
}

#[tokio::test]
async fn test_recover_only_handles_authorization_errors() {
    let harness = Harness::with_role(UserRole::User);

    let handled = harness
        .session
        .recover(&AppError::Transport { status: 500, message: None })
        .await;
    assert!(!handled);
    assert_eq!(harness.provider.sign_outs(), 0);
    assert!(harness.notifier.notices().is_empty());

    let handled = harness
        .session
        .recover(&AppError::Forbidden("nope".to_string()))
        .await;
    assert!(handled);
    assert_eq!(harness.provider.sign_outs(), 1);
    assert_eq!(harness.provider.redirects(), 1);
    assert_eq!(harness.notifier.messages(), vec![SESSION_EXPIRED_MESSAGE.to_string()]);
    assert!(harness.session.current().is_err());
}

//! 会话校验与失效处理

use crate::config::Settings;
use crate::errors::AppError;
use crate::models::{Notice, Session};
use crate::repositories::SessionProvider;
use crate::services::Notifier;
use std::sync::Arc;
use std::time::Duration;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Redirecting to login...";

/// 会话服务
///
/// 所有操作遇到认证失败都经由 [`SessionService::recover`]：先提示，
/// 等待跳转延迟后注销并跳转登录。
pub struct SessionService {
    provider: Arc<dyn SessionProvider>,
    notifier: Arc<dyn Notifier>,
    redirect_delay: Duration,
    notice_for: Duration,
}

impl SessionService {
    pub fn new(
        provider: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
        settings: &Settings,
    ) -> Self {
        Self {
            provider,
            notifier,
            redirect_delay: settings.redirect_delay(),
            notice_for: settings.notice.admin(),
        }
    }

    pub fn provider(&self) -> Arc<dyn SessionProvider> {
        self.provider.clone()
    }

    /// 当前会话，未登录时返回 Unauthorized
    pub fn current(&self) -> Result<Arc<Session>, AppError> {
        self.provider
            .current()
            .ok_or_else(|| AppError::Unauthorized("未登录".to_string()))
    }

    /// 管理端操作前置检查
    ///
    /// 非管理员直接交由会话协作方跳转，不访问任何管理端接口。
    pub async fn require_admin(&self) -> Result<Arc<Session>, AppError> {
        let session = match self.current() {
            Ok(session) => session,
            Err(err) => {
                self.provider.redirect_to_login().await;
                return Err(err);
            }
        };

        if !session.is_admin() {
            tracing::warn!(session_id = %session.id, role = %session.role, "非管理员访问管理端操作");
            self.provider.redirect_to_login().await;
            return Err(AppError::Forbidden("需要管理员权限".to_string()));
        }

        Ok(session)
    }

    /// 认证失败时注销会话，返回是否已处理
    pub async fn recover(&self, err: &AppError) -> bool {
        if !err.is_authorization() {
            return false;
        }

        tracing::warn!(error = %err, "会话失效，准备注销");
        self.notifier
            .notify(Notice::error(SESSION_EXPIRED_MESSAGE, self.notice_for));

        tokio::time::sleep(self.redirect_delay).await;

        self.provider.sign_out().await;
        self.provider.redirect_to_login().await;
        true
    }
}

//! 会话存储

use crate::models::Session;
use std::sync::{Arc, RwLock};

/// 会话/认证协作方：提供当前凭据与角色，负责注销和跳转登录
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    fn current(&self) -> Option<Arc<Session>>;

    async fn sign_out(&self);

    /// 跳转到登录页（不清除会话）
    async fn redirect_to_login(&self);
}

/// 进程内会话存储
#[derive(Default)]
pub struct InMemorySessionProvider {
    current: RwLock<Option<Arc<Session>>>,
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(session))),
        }
    }

    pub fn sign_in(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(session.clone());
        session
    }
}

#[async_trait::async_trait]
impl SessionProvider for InMemorySessionProvider {
    fn current(&self) -> Option<Arc<Session>> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn sign_out(&self) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        if let Some(session) = guard.take() {
            tracing::info!(session_id = %session.id, role = %session.role, "会话已注销");
        }
    }

    async fn redirect_to_login(&self) {
        tracing::debug!("跳转登录页");
    }
}

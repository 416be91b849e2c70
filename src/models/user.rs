//! 用户会话模型

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户角色枚举
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::User => write!(f, "user"),
        }
    }
}

/// 当前登录会话
///
/// 会话开始时创建，注销或认证失效时销毁。`id` 用于隔离草稿缓存。
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub role: UserRole,
    token: SecretString,
}

impl Session {
    pub fn new(role: UserRole, token: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            token: SecretString::new(token.into()),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 访问令牌（用于 Authorization 头）
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

//! 统一错误类型定义

use crate::models::{FieldErrors, RecordSlot};

/// 应用错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 查询参数错误（本地校验，不访问网络）
    #[error("请求参数无效: {0}")]
    ValidationError(String),

    // 记录字段校验失败
    #[error("{slot} 记录校验失败（{} 个字段）", .errors.len())]
    InvalidRecord { slot: RecordSlot, errors: FieldErrors },

    // 认证失败 (401)
    #[error("认证失败")]
    Unauthorized(String),

    // 权限不足 (403)
    #[error("权限不足")]
    Forbidden(String),

    // 服务端返回的失败（非 2xx）
    #[error("服务请求失败: HTTP {status}")]
    Transport { status: u16, message: Option<String> },

    // 网络错误
    #[error("网络请求错误")]
    Http(#[from] reqwest::Error),

    // Redis 错误
    #[error("缓存服务错误")]
    RedisError(#[from] redis::RedisError),

    // 同一操作重复触发
    #[error("操作进行中: {0}")]
    OperationInProgress(&'static str),

    #[error("序列化失败")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV 生成失败")]
    Csv(#[from] csv::Error),

    // 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    // 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 本地字段/参数错误，可修正后重试
    Validation,
    /// 会话失效，必须注销
    Authorization,
    /// 网络或服务端失败，放弃本次操作
    Transport,
    /// 同一操作尚未结束
    Busy,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ValidationError(_) | AppError::InvalidRecord { .. } => ErrorKind::Validation,
            AppError::Unauthorized(_) | AppError::Forbidden(_) => ErrorKind::Authorization,
            AppError::Transport { .. } | AppError::Http(_) | AppError::RedisError(_) => {
                ErrorKind::Transport
            }
            AppError::OperationInProgress(_) => ErrorKind::Busy,
            AppError::Serialization(_)
            | AppError::Csv(_)
            | AppError::ConfigError(_)
            | AppError::InternalError(_) => ErrorKind::Internal,
        }
    }

    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::Authorization
    }

    /// 面向用户的提示文本
    ///
    /// 内部错误不暴露细节；服务端返回的 message 原样透传。
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::InvalidRecord { .. } => "Please fix the highlighted fields".to_string(),
            AppError::Unauthorized(_) | AppError::Forbidden(_) => {
                "Session expired. Redirecting to login...".to_string()
            }
            AppError::Transport { message, .. } => message
                .clone()
                .unwrap_or_else(|| "Request failed".to_string()),
            AppError::Http(_) | AppError::RedisError(_) => "Service unavailable".to_string(),
            AppError::OperationInProgress(_) => "Please wait for the current request".to_string(),
            AppError::Serialization(_)
            | AppError::Csv(_)
            | AppError::ConfigError(_)
            | AppError::InternalError(_) => "Something went wrong".to_string(),
        }
    }

    /// 服务端在错误响应体中给出的 message
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Transport { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// 取出字段错误（仅 InvalidRecord）
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::InvalidRecord { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

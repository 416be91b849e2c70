//! 通用数据结构

use serde::Serialize;
use std::time::Duration;

/// 提示级别
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// 短暂展示给用户的提示
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    #[serde(skip)]
    pub display_for: Duration,
}

impl Notice {
    pub fn info(message: impl Into<String>, display_for: Duration) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            display_for,
        }
    }

    pub fn success(message: impl Into<String>, display_for: Duration) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            display_for,
        }
    }

    pub fn error(message: impl Into<String>, display_for: Duration) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            display_for,
        }
    }
}

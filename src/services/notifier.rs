//! 用户提示发送

use crate::models::{Notice, NoticeLevel};

/// 提示发送器trait（由界面层实现，用于依赖注入）
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// 仅写日志的提示发送器
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let display_ms = notice.display_for.as_millis() as u64;
        match notice.level {
            NoticeLevel::Error => {
                tracing::warn!(display_ms, message = %notice.message, "用户提示")
            }
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::info!(display_ms, message = %notice.message, "用户提示")
            }
        }
    }
}

//! 日志初始化

use crate::config::LoggingSettings;
use crate::errors::AppError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志系统
///
/// `RUST_LOG` 优先于配置中的级别；`format = "json"` 时输出结构化 JSON。
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| AppError::ConfigError(format!("日志级别无效: {}", e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if settings.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| AppError::ConfigError(format!("日志初始化失败: {}", e)))
}

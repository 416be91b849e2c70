//! 应用配置加载和管理

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

/// 应用配置结构
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub draft: DraftSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub notice: NoticeSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// 后端行数据接口
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// 接口根地址，例如 http://localhost:5000/api
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String { "http://localhost:5000/api".to_string() }

/// 草稿缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct DraftSettings {
    /// 缓存键前缀
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// 草稿保留时长（秒），与会话寿命一致
    #[serde(default = "default_draft_ttl")]
    pub ttl_seconds: u64,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            ttl_seconds: default_draft_ttl(),
        }
    }
}

fn default_key_prefix() -> String { "chargelog:draft".to_string() }
fn default_draft_ttl() -> u64 { 86_400 }

/// 会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// 认证失效提示后跳转登录前的等待（毫秒）
    #[serde(default = "default_redirect_delay")]
    pub expiry_redirect_delay_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            expiry_redirect_delay_ms: default_redirect_delay(),
        }
    }
}

fn default_redirect_delay() -> u64 { 900 }

/// 提示展示时长
#[derive(Debug, Clone, Deserialize)]
pub struct NoticeSettings {
    /// 操作员页面（毫秒）
    #[serde(default = "default_operator_notice")]
    pub operator_display_ms: u64,
    /// 管理端页面（毫秒）
    #[serde(default = "default_admin_notice")]
    pub admin_display_ms: u64,
}

impl Default for NoticeSettings {
    fn default() -> Self {
        Self {
            operator_display_ms: default_operator_notice(),
            admin_display_ms: default_admin_notice(),
        }
    }
}

fn default_operator_notice() -> u64 { 3000 }
fn default_admin_notice() -> u64 { 2500 }

impl NoticeSettings {
    pub fn operator(&self) -> Duration {
        Duration::from_millis(self.operator_display_ms)
    }

    pub fn admin(&self) -> Duration {
        Duration::from_millis(self.admin_display_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" 或 "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info,chargelog=debug".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// 从 ./config 目录和环境变量加载配置
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// 从指定目录加载：default -> {APP_ENV} -> CHARGELOG_* 环境变量
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let settings = Config::builder()
            // 加载默认配置
            .add_source(File::from(config_dir.join("default")).required(false))
            // 根据环境加载对应配置
            .add_source(File::from(config_dir.join(&run_mode)).required(false))
            // 环境变量覆盖，前缀 CHARGELOG，分隔符 __
            .add_source(
                Environment::with_prefix("CHARGELOG")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// 获取 Redis 连接 URL（从环境变量）
    pub fn redis_url() -> Option<SecretString> {
        env::var("REDIS_URL").ok().map(SecretString::new)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.session.expiry_redirect_delay_ms)
    }
}

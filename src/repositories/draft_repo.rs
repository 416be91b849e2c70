//! 草稿缓存存储

use crate::errors::AppError;
use redis::aio::ConnectionManager;
use redis::Client;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::sync::Mutex;

/// 草稿缓存：按会话隔离的键值存储
#[async_trait::async_trait]
pub trait DraftStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Redis 草稿存储
#[derive(Clone)]
pub struct RedisDraftStore {
    manager: ConnectionManager,
}

impl RedisDraftStore {
    /// 建立 Redis 连接
    pub async fn connect(redis_url: &SecretString) -> Result<Self, AppError> {
        let client = Client::open(redis_url.expose_secret().as_str())
            .map_err(|e| AppError::ConfigError(format!("Redis URL 无效: {}", e)))?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            tracing::error!("Redis 连接失败: {}", e);
            AppError::RedisError(e)
        })?;

        tracing::info!("草稿缓存 Redis 连接已建立");

        Ok(Self { manager })
    }
}

#[async_trait::async_trait]
impl DraftStore for RedisDraftStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.manager.clone();
        let value = redis::cmd("GET")
            .arg(key)
            .query_async::<Option<String>>(&mut conn)
            .await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), AppError> {
        let mut conn = self.manager.clone();
        redis::cmd("SETEX")
            .arg(key)
            .arg(ttl_seconds)
            .arg(value)
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self.manager.clone();
        redis::cmd("DEL").arg(key).query_async::<()>(&mut conn).await?;
        Ok(())
    }
}

/// 进程内草稿存储（不处理过期）
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl DraftStore for MemoryDraftStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str, _ttl_seconds: u64) -> Result<(), AppError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

//! 记录表单与草稿缓存

use crate::config::DraftSettings;
use crate::errors::AppError;
use crate::models::{validate_record, ChargingLogRecord, FieldErrors, RecordField, RecordSlot};
use crate::repositories::DraftStore;
use std::sync::Arc;
use uuid::Uuid;

/// 草稿服务：按会话和表单位置读写未提交的记录
pub struct DraftService {
    store: Arc<dyn DraftStore>,
    slot: RecordSlot,
    key: String,
    ttl_seconds: u64,
}

impl DraftService {
    pub fn new(
        store: Arc<dyn DraftStore>,
        settings: &DraftSettings,
        session_id: Uuid,
        slot: RecordSlot,
    ) -> Self {
        Self {
            store,
            slot,
            key: format!("{}:{}:{}", settings.key_prefix, session_id, slot),
            ttl_seconds: settings.ttl_seconds,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> RecordSlot {
        self.slot
    }

    /// 读取草稿，缺失或无法解析时返回空白记录
    pub async fn restore(&self) -> ChargingLogRecord {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return ChargingLogRecord::blank(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "读取草稿失败");
                return ChargingLogRecord::blank();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => {
                tracing::debug!(key = %self.key, "草稿已恢复");
                record
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "草稿格式无效，已丢弃");
                ChargingLogRecord::blank()
            }
        }
    }

    /// 写入草稿，失败只记录日志
    pub async fn save(&self, record: &ChargingLogRecord) {
        if let Err(e) = self.try_save(record).await {
            tracing::warn!(key = %self.key, error = %e, "保存草稿失败");
        }
    }

    async fn try_save(&self, record: &ChargingLogRecord) -> Result<(), AppError> {
        let value = serde_json::to_string(record)?;
        self.store.put(&self.key, &value, self.ttl_seconds).await
    }

    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key).await {
            tracing::warn!(key = %self.key, error = %e, "清除草稿失败");
        }
    }
}

/// 记录表单
///
/// 持有正在编辑的记录和当前字段错误。每次修改都重新校验并写入草稿，
/// 因此刷新或重新打开后能恢复未提交的内容。
pub struct RecordForm {
    record: ChargingLogRecord,
    errors: FieldErrors,
    draft: DraftService,
}

impl RecordForm {
    /// 打开表单，从草稿恢复一次；表单位置取自草稿
    pub async fn open(draft: DraftService) -> Self {
        let record = draft.restore().await;

        Self {
            record,
            errors: FieldErrors::new(),
            draft,
        }
    }

    pub fn slot(&self) -> RecordSlot {
        self.draft.slot()
    }

    pub fn record(&self) -> &ChargingLogRecord {
        &self.record
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        validate_record(&self.record).is_empty()
    }

    /// 当前充电时长（起止时间不完整时为空串）
    pub fn duration(&self) -> String {
        self.record.duration_display()
    }

    /// 修改字段，返回最新的字段错误
    pub async fn update(&mut self, field: RecordField, value: impl Into<String>) -> &FieldErrors {
        self.record.set(field, value);
        self.errors = validate_record(&self.record);
        self.draft.save(&self.record).await;
        &self.errors
    }

    /// 按字段名修改（字段名与提交载荷一致，如 `battVoltInitial`）
    pub async fn update_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<&FieldErrors, AppError> {
        let field = name.parse::<RecordField>().map_err(AppError::ValidationError)?;
        Ok(self.update(field, value).await)
    }

    /// 提交前校验，刷新字段错误
    pub fn revalidate(&mut self) -> &FieldErrors {
        self.errors = validate_record(&self.record);
        &self.errors
    }

    /// 组装失败时记下字段错误，保留已填写内容
    pub(crate) fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// 恢复空白模板并清除草稿
    pub async fn reset(&mut self) {
        self.record = ChargingLogRecord::blank();
        self.errors = FieldErrors::new();
        self.draft.clear().await;
    }
}

//! 提交载荷组装

use super::record::{ChargingLogRecord, RecordSlot};
use super::validation::validate_record;
use crate::errors::AppError;
use serde::{Deserialize, Serialize};

/// 组装完成、可直接提交的单条记录
///
/// 客户名称已解析（"Others" 替换为手填名称），并附带计算出的充电时长。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    #[serde(flatten)]
    record: ChargingLogRecord,
    duration: String,
}

impl SubmissionRecord {
    pub fn record(&self) -> &ChargingLogRecord {
        &self.record
    }

    pub fn battery_id(&self) -> &str {
        &self.record.battery_id
    }

    pub fn customer_name(&self) -> &str {
        &self.record.customer_name
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }
}

/// 提交载荷：单电池为扁平记录，双电池为 `{ primary, secondary }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmissionPayload {
    Single(SubmissionRecord),
    Dual {
        primary: SubmissionRecord,
        secondary: SubmissionRecord,
    },
}

impl SubmissionPayload {
    pub fn battery_ids(&self) -> Vec<&str> {
        match self {
            SubmissionPayload::Single(record) => vec![record.battery_id()],
            SubmissionPayload::Dual { primary, secondary } => {
                vec![primary.battery_id(), secondary.battery_id()]
            }
        }
    }

    pub fn is_dual(&self) -> bool {
        matches!(self, SubmissionPayload::Dual { .. })
    }
}

/// 提交成功后的响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// 该电池累计充电次数
    #[serde(rename = "chargingCycle", default)]
    pub charging_cycle: Option<u64>,
}

impl SubmissionReceipt {
    pub fn success_message(&self) -> String {
        match self.charging_cycle {
            Some(cycles) if cycles > 0 => {
                format!("Submitted successfully — cycles so far: {}", cycles)
            }
            _ => "Submitted successfully".to_string(),
        }
    }
}

/// 组装单条记录，记录无效时拒绝（不做修复）
pub fn compose(record: &ChargingLogRecord) -> Result<SubmissionRecord, AppError> {
    compose_slot(record, RecordSlot::Single)
}

/// 组装双电池载荷，两条记录都必须通过校验
pub fn compose_dual(
    primary: &ChargingLogRecord,
    secondary: &ChargingLogRecord,
) -> Result<SubmissionPayload, AppError> {
    let primary = compose_slot(primary, RecordSlot::Primary)?;
    let secondary = compose_slot(secondary, RecordSlot::Secondary)?;
    Ok(SubmissionPayload::Dual { primary, secondary })
}

pub(crate) fn compose_slot(
    record: &ChargingLogRecord,
    slot: RecordSlot,
) -> Result<SubmissionRecord, AppError> {
    let errors = validate_record(record);
    if !errors.is_empty() {
        return Err(AppError::InvalidRecord { slot, errors });
    }

    let mut resolved = record.clone();
    resolved.customer_name = record.resolved_customer_name().to_string();

    Ok(SubmissionRecord {
        duration: record.duration_display(),
        record: resolved,
    })
}

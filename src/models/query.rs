//! 管理端查询参数

use crate::errors::AppError;
use crate::utils::parse_iso_date;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use validator::{Validate, ValidationErrors};

/// 按电池编号查询的原始参数
#[derive(Debug, Validate)]
struct BatteryIdParams {
    #[validate(length(min = 1, message = "Please enter a Battery ID"))]
    battery_id: String,
}

/// 按日期范围查询的原始参数
#[derive(Debug, Validate)]
struct DateRangeParams {
    #[validate(length(min = 1, message = "Please select both From and To dates"))]
    date_from: String,
    #[validate(length(min = 1, message = "Please select both From and To dates"))]
    date_to: String,
}

/// 查询范围
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryScope {
    ByBattery { battery_id: String },
    ByDateRange { from: NaiveDate, to: NaiveDate },
}

/// 已校验的管理端查询
///
/// 只能通过 [`AdminQuery::by_battery`] / [`AdminQuery::by_date_range`] 构造，
/// 构造后不可修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdminQuery {
    scope: QueryScope,
}

impl AdminQuery {
    /// 按电池编号查询（编号去除首尾空白后不能为空）
    pub fn by_battery(battery_id: &str) -> Result<Self, AppError> {
        let params = BatteryIdParams {
            battery_id: battery_id.trim().to_string(),
        };
        params
            .validate()
            .map_err(|e| AppError::ValidationError(first_message(&e)))?;

        Ok(Self {
            scope: QueryScope::ByBattery {
                battery_id: params.battery_id,
            },
        })
    }

    /// 按日期范围查询（YYYY-MM-DD，起始不能晚于结束）
    pub fn by_date_range(date_from: &str, date_to: &str) -> Result<Self, AppError> {
        let params = DateRangeParams {
            date_from: date_from.trim().to_string(),
            date_to: date_to.trim().to_string(),
        };
        params
            .validate()
            .map_err(|e| AppError::ValidationError(first_message(&e)))?;

        let (Some(from), Some(to)) = (
            parse_iso_date(&params.date_from),
            parse_iso_date(&params.date_to),
        ) else {
            return Err(AppError::ValidationError(
                "Dates must use YYYY-MM-DD".to_string(),
            ));
        };

        if from > to {
            return Err(AppError::ValidationError(
                "From date cannot be later than To date".to_string(),
            ));
        }

        Ok(Self {
            scope: QueryScope::ByDateRange { from, to },
        })
    }

    pub fn scope(&self) -> &QueryScope {
        &self.scope
    }

    pub fn is_by_battery(&self) -> bool {
        matches!(self.scope, QueryScope::ByBattery { .. })
    }

    /// 请求参数
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match &self.scope {
            QueryScope::ByBattery { battery_id } => vec![("batteryId", battery_id.clone())],
            QueryScope::ByDateRange { from, to } => vec![
                ("dateFrom", format_date(from)),
                ("dateTo", format_date(to)),
            ],
        }
    }

    /// 导出文件名
    pub fn export_filename(&self) -> String {
        match &self.scope {
            QueryScope::ByBattery { battery_id } => format!("battery_{}_export.csv", battery_id),
            QueryScope::ByDateRange { from, to } => format!(
                "rows_{}_to_{}_export.csv",
                format_date(from),
                format_date(to)
            ),
        }
    }
}

impl fmt::Display for AdminQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            QueryScope::ByBattery { battery_id } => write!(f, "batteryId={}", battery_id),
            QueryScope::ByDateRange { from, to } => {
                write!(f, "dateFrom={} dateTo={}", format_date(from), format_date(to))
            }
        }
    }
}

fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 取第一条校验错误的提示文本
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|list| list.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

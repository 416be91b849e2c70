//! 记录校验

use super::record::{ChargingLogRecord, Deformation, RecordField, TemperatureStatus, LOCATIONS};
use crate::utils::{is_blank, is_decimal, parse_hhmm, parse_iso_date};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::btree_map;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// 字段错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    Required,
    CustomerNameMissing,
    NotANumber,
    InvalidTime,
    InvalidDate,
    UnknownOption,
}

impl FieldIssue {
    pub fn code(&self) -> &'static str {
        match self {
            FieldIssue::Required => "required",
            FieldIssue::CustomerNameMissing => "customer_name_missing",
            FieldIssue::NotANumber => "not_a_number",
            FieldIssue::InvalidTime => "invalid_time",
            FieldIssue::InvalidDate => "invalid_date",
            FieldIssue::UnknownOption => "unknown_option",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FieldIssue::Required => "This field is required",
            FieldIssue::CustomerNameMissing => "Please enter customer name",
            FieldIssue::NotANumber => "Must be a number",
            FieldIssue::InvalidTime => "Use HH:MM (24h)",
            FieldIssue::InvalidDate => "Use YYYY-MM-DD",
            FieldIssue::UnknownOption => "Select a valid option",
        }
    }
}

impl Serialize for FieldIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// 字段错误表（字段 -> 错误），按表单顺序排列，每个字段至多一条
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<RecordField, FieldIssue>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已有错误的字段保留第一条
    pub fn insert(&mut self, field: RecordField, issue: FieldIssue) {
        self.0.entry(field).or_insert(issue);
    }

    pub fn get(&self, field: RecordField) -> Option<FieldIssue> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: RecordField) -> Option<&'static str> {
        self.get(field).map(|issue| issue.message())
    }

    pub fn contains(&self, field: RecordField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = RecordField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, RecordField, FieldIssue> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a RecordField, &'a FieldIssue);
    type IntoIter = btree_map::Iter<'a, RecordField, FieldIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<&FieldErrors> for ValidationErrors {
    fn from(errors: &FieldErrors) -> Self {
        let mut out = ValidationErrors::new();
        for (field, issue) in errors {
            let mut error = ValidationError::new(issue.code());
            error.message = Some(Cow::Borrowed(issue.message()));
            out.add(field.as_str(), error);
        }
        out
    }
}

/// 校验一条记录
///
/// 纯函数，可在每次字段修改后调用，也可作为提交前的整体校验。
pub fn validate_record(record: &ChargingLogRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in RecordField::ALL {
        let value = record.get(field);

        if is_blank(value) {
            if field.is_mandatory() {
                errors.insert(field, FieldIssue::Required);
            }
            continue;
        }

        if let Some(issue) = format_issue(field, value) {
            errors.insert(field, issue);
        }
    }

    // 选择 "Others" 时手填名称必填
    if record.is_other_customer() && is_blank(&record.customer_name_other) {
        errors.insert(RecordField::CustomerNameOther, FieldIssue::CustomerNameMissing);
    }

    errors
}

/// 非空值的格式检查
fn format_issue(field: RecordField, value: &str) -> Option<FieldIssue> {
    let valid = match field {
        f if f.is_numeric() => is_decimal(value),
        RecordField::ChargeTimeInitial | RecordField::ChargeTimeFinal => {
            parse_hhmm(value).is_some()
        }
        RecordField::Date => parse_iso_date(value).is_some(),
        RecordField::TemperatureStatus => value.parse::<TemperatureStatus>().is_ok(),
        RecordField::Deformation => value.parse::<Deformation>().is_ok(),
        RecordField::Location => LOCATIONS.contains(&value.trim()),
        _ => true,
    };

    if valid {
        return None;
    }

    Some(match field {
        f if f.is_numeric() => FieldIssue::NotANumber,
        RecordField::ChargeTimeInitial | RecordField::ChargeTimeFinal => FieldIssue::InvalidTime,
        RecordField::Date => FieldIssue::InvalidDate,
        _ => FieldIssue::UnknownOption,
    })
}

impl Validate for ChargingLogRecord {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let errors = validate_record(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::from(&errors))
        }
    }
}

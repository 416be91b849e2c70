//! 充电日志记录模型

use crate::utils::compute_duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 客户名称下拉中的“其他”选项，选中后以手填名称为准
pub const CUSTOMER_OTHERS: &str = "Others";

/// 客户名称下拉选项
pub const CUSTOMER_OPTIONS: &[&str] = &["IFFCO", "CIL", CUSTOMER_OTHERS];

/// 可选地区（邦与中央直辖区）
pub const LOCATIONS: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra & Nagar Haveli and Daman & Diu",
    "Delhi (NCT)",
    "Jammu & Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

/// 电池温度状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TemperatureStatus {
    Normal,
    Overheat,
}

impl TemperatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureStatus::Normal => "Normal",
            TemperatureStatus::Overheat => "Overheat",
        }
    }
}

impl FromStr for TemperatureStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Normal" => Ok(TemperatureStatus::Normal),
            "Overheat" => Ok(TemperatureStatus::Overheat),
            _ => Err(()),
        }
    }
}

/// 电池外观是否变形
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Deformation {
    Yes,
    No,
}

impl Deformation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Deformation::Yes => "Yes",
            Deformation::No => "No",
        }
    }
}

impl FromStr for Deformation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Yes" => Ok(Deformation::Yes),
            "No" => Ok(Deformation::No),
            _ => Err(()),
        }
    }
}

/// 记录字段
///
/// 序列化名称与后端 `/rows` 接口的字段名一致。声明顺序即表单顺序，
/// 错误表按此顺序排列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    #[serde(rename = "id")]
    BatteryId,
    Date,
    CustomerName,
    #[serde(rename = "customerNameCustom")]
    CustomerNameOther,
    Zone,
    Location,
    #[serde(rename = "chargeCurrent")]
    ChargeCurrent,
    BattVoltInitial,
    BattVoltFinal,
    ChargeTimeInitial,
    ChargeTimeFinal,
    #[serde(rename = "droneno")]
    DroneNumber,
    Uin,
    #[serde(rename = "name")]
    ResponsiblePerson,
    #[serde(rename = "temp")]
    TemperatureStatus,
    Deformation,
    #[serde(rename = "others")]
    OtherNotes,
}

impl RecordField {
    pub const ALL: [RecordField; 17] = [
        RecordField::BatteryId,
        RecordField::Date,
        RecordField::CustomerName,
        RecordField::CustomerNameOther,
        RecordField::Zone,
        RecordField::Location,
        RecordField::ChargeCurrent,
        RecordField::BattVoltInitial,
        RecordField::BattVoltFinal,
        RecordField::ChargeTimeInitial,
        RecordField::ChargeTimeFinal,
        RecordField::DroneNumber,
        RecordField::Uin,
        RecordField::ResponsiblePerson,
        RecordField::TemperatureStatus,
        RecordField::Deformation,
        RecordField::OtherNotes,
    ];

    /// 提交前必须填写的字段
    pub const MANDATORY: [RecordField; 12] = [
        RecordField::BatteryId,
        RecordField::Date,
        RecordField::CustomerName,
        RecordField::Zone,
        RecordField::Location,
        RecordField::BattVoltInitial,
        RecordField::BattVoltFinal,
        RecordField::ChargeTimeInitial,
        RecordField::ChargeTimeFinal,
        RecordField::ResponsiblePerson,
        RecordField::TemperatureStatus,
        RecordField::Deformation,
    ];

    /// 填写后必须是数字的字段
    pub const NUMERIC: [RecordField; 3] = [
        RecordField::ChargeCurrent,
        RecordField::BattVoltInitial,
        RecordField::BattVoltFinal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::BatteryId => "id",
            RecordField::Date => "date",
            RecordField::CustomerName => "customerName",
            RecordField::CustomerNameOther => "customerNameCustom",
            RecordField::Zone => "zone",
            RecordField::Location => "location",
            RecordField::ChargeCurrent => "chargeCurrent",
            RecordField::BattVoltInitial => "battVoltInitial",
            RecordField::BattVoltFinal => "battVoltFinal",
            RecordField::ChargeTimeInitial => "chargeTimeInitial",
            RecordField::ChargeTimeFinal => "chargeTimeFinal",
            RecordField::DroneNumber => "droneno",
            RecordField::Uin => "uin",
            RecordField::ResponsiblePerson => "name",
            RecordField::TemperatureStatus => "temp",
            RecordField::Deformation => "deformation",
            RecordField::OtherNotes => "others",
        }
    }

    pub fn is_mandatory(&self) -> bool {
        Self::MANDATORY.contains(self)
    }

    pub fn is_numeric(&self) -> bool {
        Self::NUMERIC.contains(self)
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("未知字段: {}", s))
    }
}

/// 记录在一次提交中的位置（单条 / 双电池的第一、第二条）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSlot {
    Single,
    Primary,
    Secondary,
}

impl RecordSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSlot::Single => "single",
            RecordSlot::Primary => "primary",
            RecordSlot::Secondary => "secondary",
        }
    }
}

impl fmt::Display for RecordSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 充电日志记录（操作员原始输入）
///
/// 所有字段保持原始字符串，校验见 [`crate::models::validate_record`]。
/// 充电时长不存储，始终由 [`ChargingLogRecord::duration_display`] 从起止时间计算。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargingLogRecord {
    #[serde(rename = "id")]
    pub battery_id: String,
    pub date: String,
    pub customer_name: String,
    #[serde(rename = "customerNameCustom")]
    pub customer_name_other: String,
    pub zone: String,
    pub location: String,
    #[serde(rename = "chargeCurrent")]
    pub charge_current: String,
    pub batt_volt_initial: String,
    pub batt_volt_final: String,
    pub charge_time_initial: String,
    pub charge_time_final: String,
    #[serde(rename = "droneno")]
    pub drone_number: String,
    pub uin: String,
    #[serde(rename = "name")]
    pub responsible_person: String,
    #[serde(rename = "temp")]
    pub temperature_status: String,
    pub deformation: String,
    #[serde(rename = "others")]
    pub other_notes: String,
}

impl ChargingLogRecord {
    /// 空白模板
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::BatteryId => &self.battery_id,
            RecordField::Date => &self.date,
            RecordField::CustomerName => &self.customer_name,
            RecordField::CustomerNameOther => &self.customer_name_other,
            RecordField::Zone => &self.zone,
            RecordField::Location => &self.location,
            RecordField::ChargeCurrent => &self.charge_current,
            RecordField::BattVoltInitial => &self.batt_volt_initial,
            RecordField::BattVoltFinal => &self.batt_volt_final,
            RecordField::ChargeTimeInitial => &self.charge_time_initial,
            RecordField::ChargeTimeFinal => &self.charge_time_final,
            RecordField::DroneNumber => &self.drone_number,
            RecordField::Uin => &self.uin,
            RecordField::ResponsiblePerson => &self.responsible_person,
            RecordField::TemperatureStatus => &self.temperature_status,
            RecordField::Deformation => &self.deformation,
            RecordField::OtherNotes => &self.other_notes,
        }
    }

    fn slot_mut(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::BatteryId => &mut self.battery_id,
            RecordField::Date => &mut self.date,
            RecordField::CustomerName => &mut self.customer_name,
            RecordField::CustomerNameOther => &mut self.customer_name_other,
            RecordField::Zone => &mut self.zone,
            RecordField::Location => &mut self.location,
            RecordField::ChargeCurrent => &mut self.charge_current,
            RecordField::BattVoltInitial => &mut self.batt_volt_initial,
            RecordField::BattVoltFinal => &mut self.batt_volt_final,
            RecordField::ChargeTimeInitial => &mut self.charge_time_initial,
            RecordField::ChargeTimeFinal => &mut self.charge_time_final,
            RecordField::DroneNumber => &mut self.drone_number,
            RecordField::Uin => &mut self.uin,
            RecordField::ResponsiblePerson => &mut self.responsible_person,
            RecordField::TemperatureStatus => &mut self.temperature_status,
            RecordField::Deformation => &mut self.deformation,
            RecordField::OtherNotes => &mut self.other_notes,
        }
    }

    /// 修改单个字段
    ///
    /// 客户名称改为非 "Others" 时同时清空手填名称。
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        if field == RecordField::CustomerName && value != CUSTOMER_OTHERS {
            self.customer_name_other.clear();
        }
        *self.slot_mut(field) = value;
    }

    pub fn is_other_customer(&self) -> bool {
        self.customer_name == CUSTOMER_OTHERS
    }

    /// 实际提交的客户名称
    pub fn resolved_customer_name(&self) -> &str {
        if self.is_other_customer() {
            self.customer_name_other.trim()
        } else {
            &self.customer_name
        }
    }

    /// 充电时长展示文本，起止时间不完整或格式错误时为空串
    pub fn duration_display(&self) -> String {
        compute_duration(&self.charge_time_initial, &self.charge_time_final)
    }
}

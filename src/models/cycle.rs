//! 充电循环次数分级

use serde::{Deserialize, Serialize};
use std::fmt;

/// 正常区间上限（含）
pub const NORMAL_MAX_CYCLES: u64 = 250;
/// 预警区间上限（含），超过即为临界
pub const WARNING_MAX_CYCLES: u64 = 450;
/// 超过该值额外标记 "Critical!"
pub const HARD_CRITICAL_CYCLES: u64 = 500;

/// 循环次数等级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CycleTier {
    None,
    Normal,
    Warning,
    Critical,
}

impl CycleTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleTier::None => "none",
            CycleTier::Normal => "normal",
            CycleTier::Warning => "warning",
            CycleTier::Critical => "critical",
        }
    }
}

impl fmt::Display for CycleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分级结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleStatus {
    pub count: u64,
    pub tier: CycleTier,
    /// 超过 500 次的额外临界标记
    pub hard_critical: bool,
}

impl CycleStatus {
    /// 展示文本，例如 "Cycles: 501 Critical!"
    pub fn label(&self) -> String {
        if self.hard_critical {
            format!("Cycles: {} Critical!", self.count)
        } else {
            format!("Cycles: {}", self.count)
        }
    }
}

/// 按循环次数分级
pub fn classify(count: u64) -> CycleStatus {
    let tier = match count {
        0 => CycleTier::None,
        1..=NORMAL_MAX_CYCLES => CycleTier::Normal,
        c if c <= WARNING_MAX_CYCLES => CycleTier::Warning,
        _ => CycleTier::Critical,
    };

    CycleStatus {
        count,
        tier,
        hard_critical: count > HARD_CRITICAL_CYCLES,
    }
}

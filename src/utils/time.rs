//! 时间处理工具

use chrono::{NaiveDate, NaiveTime, Timelike};

/// 解析 24 小时制 HH:MM
///
/// 也接受 HH:MM:SS，秒数被丢弃。
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
        .and_then(|t| NaiveTime::from_hms_opt(t.hour(), t.minute(), 0))
}

/// 解析 YYYY-MM-DD
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // chrono 接受不补零的月日，这里要求定长
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// 计算充电时长的展示文本
///
/// 结束时间早于开始时间时视为次日（跨夜充电）。任一输入无法解析时返回空串，
/// 调用方把空串当作“尚无法计算”。
pub fn compute_duration(start: &str, end: &str) -> String {
    let (Some(start), Some(end)) = (parse_hhmm(start), parse_hhmm(end)) else {
        return String::new();
    };

    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }

    format_minutes(minutes)
}

/// 将分钟数格式化为 "<h> hours <m> mins"
pub fn format_minutes(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    match (hours, mins) {
        (0, 0) => "0 mins".to_string(),
        (h, 0) => format!("{} hours", h),
        (0, m) => format!("{} mins", m),
        (h, m) => format!("{} hours {} mins", h, m),
    }
}

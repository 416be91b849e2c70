//! 数据验证工具

/// 空串或仅含空白
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// 十进制数字（允许小数和符号，不接受 NaN / inf）
pub fn is_decimal(s: &str) -> bool {
    s.trim().parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// 去除首尾空白后非空则返回
pub fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

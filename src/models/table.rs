//! 查询结果表与导出文件

use serde::Serialize;
use serde_json::Value;

/// 单行结果，保持服务端返回的键顺序
pub type Row = serde_json::Map<String, Value>;

/// 页面表格中缺失值的占位符
pub const MISSING_CELL: &str = "-";

/// CSV 导出的 MIME 类型
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// 单元格文本，null 视为缺失
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// 列由第一行的键顺序决定
pub fn columns_of(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// 页面展示用结果表
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultTable {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            columns: columns_of(&rows),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按第一行的列投影，缺失或 null 显示为 "-"
    pub fn cell(&self, row: usize, column: &str) -> String {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(render_value)
            .unwrap_or_else(|| MISSING_CELL.to_string())
    }

    pub fn display_rows(&self) -> Vec<Vec<String>> {
        (0..self.rows.len())
            .map(|i| self.columns.iter().map(|c| self.cell(i, c)).collect())
            .collect()
    }
}

/// 可下载的导出文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn csv(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: CSV_CONTENT_TYPE,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

//! 结果导出（CSV）

use crate::errors::AppError;
use crate::models::{columns_of, render_value, ExportArtifact, Row};

/// 将查询结果写成 CSV
///
/// 表头取第一行的键顺序，后续各行按该列集合投影，缺失或 null 写为空字段。
/// 没有数据时返回 `None`，不会生成只有表头的文件。
pub fn to_csv(rows: &[Row], filename: &str) -> Result<Option<ExportArtifact>, AppError> {
    let columns = columns_of(rows);
    if columns.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&columns)?;

    for row in rows {
        let record = columns.iter().map(|column| {
            row.get(column)
                .and_then(render_value)
                .unwrap_or_default()
        });
        writer.write_record(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("CSV 缓冲区写入失败: {}", e)))?;

    Ok(Some(ExportArtifact::csv(filename, bytes)))
}

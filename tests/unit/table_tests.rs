//! 查询结果表与 CSV 导出测试

use crate::helpers::rows;
use chargelog::models::{ResultTable, MISSING_CELL};
use chargelog::utils::to_csv;
use serde_json::json;

#[test]
fn test_columns_come_from_first_row() {
    let table = ResultTable::from_rows(rows(json!([
        {"id": "B1", "zone": "North", "temp": "Normal"},
        {"temp": "Overheat", "id": "B2", "extra": "x"},
    ])));

    assert_eq!(table.columns(), ["id", "zone", "temp"]);
    assert_eq!(
        table.display_rows(),
        vec![
            vec!["B1".to_string(), "North".to_string(), "Normal".to_string()],
            vec!["B2".to_string(), MISSING_CELL.to_string(), "Overheat".to_string()],
        ]
    );
}

#[test]
fn test_null_and_numbers_render() {
    let table = ResultTable::from_rows(rows(json!([{"id": "B1", "cycles": 42, "uin": null}])));
    assert_eq!(table.cell(0, "cycles"), "42");
    assert_eq!(table.cell(0, "uin"), "-");
    assert_eq!(table.cell(5, "id"), "-");
}

#[test]
fn test_empty_table() {
    let table = ResultTable::from_rows(Vec::new());
    assert!(table.is_empty());
    assert!(table.columns().is_empty());
    assert!(to_csv(table.rows(), "empty.csv").unwrap().is_none());
}

#[test]
fn test_csv_blank_for_missing_values() {
    let data = rows(json!([
        {"id": "B1", "uin": "U-1"},
        {"id": "B2", "uin": null},
        {"id": "B3"},
    ]));

    let artifact = to_csv(&data, "battery_B1_export.csv").unwrap().unwrap();
    let text = String::from_utf8(artifact.bytes).unwrap();
    assert_eq!(text, "id,uin\nB1,U-1\nB2,\nB3,\n");
}

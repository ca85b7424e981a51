//! JSON 記錄攤平
//!
//! 將 JSON 物件陣列轉為全字串欄位的 `DataFrame`：
//! 欄位為所有鍵的聯集（依首次出現順序），巢狀物件以 `.` 連接成欄位名，
//! 缺少的鍵與 `null` 皆為空值。

use polars::prelude::*;
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::error::{FetchError, FetchResult};

/// 欄位累積器，保持首次出現順序
#[derive(Default)]
struct ColumnBuilder {
    names: Vec<String>,
    values: Vec<Vec<Option<String>>>,
    index: HashMap<String, usize>,
}

impl ColumnBuilder {
    fn set(&mut self, row: usize, name: String, value: Option<String>) {
        let idx = match self.index.get(&name) {
            Some(&idx) => idx,
            None => {
                let idx = self.names.len();
                self.index.insert(name.clone(), idx);
                self.names.push(name);
                self.values.push(vec![None; row]);
                idx
            }
        };

        let cells = &mut self.values[idx];
        if cells.len() > row {
            // 同一列出現重複的攤平鍵，以後者為準
            cells[row] = value;
        } else {
            cells.push(value);
        }
    }

    fn end_row(&mut self, row: usize) {
        for cells in &mut self.values {
            cells.resize(row + 1, None);
        }
    }

    fn finish(self) -> PolarsResult<DataFrame> {
        let columns = self
            .names
            .into_iter()
            .zip(self.values)
            .map(|(name, cells)| Series::new(name.into(), cells).into())
            .collect::<Vec<Column>>();

        DataFrame::new(columns)
    }
}

/// 將 JSON 回應轉換為 `DataFrame`
///
/// 回應必須是物件陣列；空陣列得到零列零欄的表格。
pub fn normalize_records(payload: &Value) -> FetchResult<DataFrame> {
    let records = payload.as_array().ok_or_else(|| {
        FetchError::UnexpectedShape(format!("預期 JSON 陣列，實際為 {}", json_kind(payload)))
    })?;

    let mut builder = ColumnBuilder::default();

    for (row, record) in records.iter().enumerate() {
        let object = record.as_object().ok_or_else(|| {
            FetchError::UnexpectedShape(format!(
                "第 {} 筆記錄預期為物件，實際為 {}",
                row,
                json_kind(record)
            ))
        })?;

        flatten_object(&mut builder, row, None, object);
        builder.end_row(row);
    }

    Ok(builder.finish()?)
}

fn flatten_object(builder: &mut ColumnBuilder, row: usize, prefix: Option<&str>, object: &Map<String, Value>) {
    for (key, value) in object {
        let name = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };

        match value {
            Value::Object(nested) => flatten_object(builder, row, Some(&name), nested),
            other => builder.set(row, name, cell_text(other)),
        }
    }
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "布林值",
        Value::Number(_) => "數字",
        Value::String(_) => "字串",
        Value::Array(_) => "陣列",
        Value::Object(_) => "物件",
    }
}

//! 欄位值選擇與篩選
//!
//! 欄位值一律以字串形式比較，因此數值欄位（如已轉換的日報酬）
//! 的選項與篩選結果保持一致。

use polars::prelude::*;
use tracing::debug;

use crate::domain_types::ReturnFrameExt;
use crate::error::DashboardResult;

/// 欄位中的相異值，依首次出現順序，不含空值
pub fn distinct_values(df: &DataFrame, column: &str) -> DashboardResult<Vec<String>> {
    df.require_column(column)?;

    let out = df
        .clone()
        .lazy()
        .select([col(column)
            .cast(DataType::String)
            .drop_nulls()
            .unique_stable()
            .alias(column)])
        .collect()?;

    let values: Vec<String> = out
        .column(column)?
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();

    debug!(column, count = values.len(), "取得欄位相異值");
    Ok(values)
}

/// 只保留欄位值與 `value` 完全相等的列
pub fn filter_by_value(df: &DataFrame, column: &str, value: &str) -> DashboardResult<DataFrame> {
    df.require_column(column)?;

    let filtered = df
        .clone()
        .lazy()
        .filter(col(column).cast(DataType::String).eq(lit(value)))
        .collect()?;

    debug!(column, value, rows = filtered.height(), "套用篩選");
    Ok(filtered)
}

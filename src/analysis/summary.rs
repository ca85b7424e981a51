//! 描述統計與資料預覽

use polars::prelude::*;
use tracing::debug;

/// 描述統計列名（依輸出順序）
pub const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// 統計表的列名欄位
pub const STATISTIC_COLUMN: &str = "statistic";

/// 資料集概要：描述統計與前 N 行
#[derive(Debug, Clone)]
pub struct Summary {
    pub statistics: DataFrame,
    pub preview: DataFrame,
}

impl Summary {
    pub fn new(df: &DataFrame, preview_rows: usize) -> PolarsResult<Self> {
        Ok(Self {
            statistics: describe(df)?,
            preview: preview(df, preview_rows),
        })
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_float() || dtype.is_integer()
}

fn statistic_exprs(name: &str) -> Vec<Expr> {
    let quantile = |q: f64| col(name).quantile(lit(q), QuantileMethod::Linear);

    [
        col(name).count(),
        col(name).mean(),
        col(name).std(1),
        col(name).min(),
        quantile(0.25),
        quantile(0.50),
        quantile(0.75),
        col(name).max(),
    ]
    .into_iter()
    .zip(STATISTICS)
    .map(|(expr, stat)| expr.cast(DataType::Float64).alias(format!("{}:{}", name, stat)))
    .collect()
}

/// 對所有數值欄位計算描述統計
///
/// 結果第一欄為統計名稱，其後每個數值欄位一欄。
/// 標準差為樣本標準差，分位數採線性插值。沒有數值欄位時回傳空表。
pub fn describe(df: &DataFrame) -> PolarsResult<DataFrame> {
    let numeric: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|c| is_numeric(c.dtype()))
        .map(|c| c.name().to_string())
        .collect();

    if numeric.is_empty() {
        debug!("沒有數值欄位，略過描述統計");
        return Ok(DataFrame::empty());
    }

    let exprs: Vec<Expr> = numeric.iter().flat_map(|name| statistic_exprs(name)).collect();
    let row = df.clone().lazy().select(exprs).collect()?;

    let mut columns: Vec<Column> = Vec::with_capacity(numeric.len() + 1);
    columns.push(Series::new(STATISTIC_COLUMN.into(), STATISTICS.to_vec()).into());

    for name in &numeric {
        let values = STATISTICS
            .iter()
            .map(|stat| {
                let cell = row.column(&format!("{}:{}", name, stat))?;
                Ok(cell.f64()?.get(0))
            })
            .collect::<PolarsResult<Vec<Option<f64>>>>()?;
        columns.push(Series::new(name.as_str().into(), values).into());
    }

    DataFrame::new(columns)
}

/// 前 N 行預覽
pub fn preview(df: &DataFrame, rows: usize) -> DataFrame {
    df.head(Some(rows))
}

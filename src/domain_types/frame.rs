//! 基於 Polars 的報酬記錄表操作

use polars::prelude::*;

use super::columns::ColumnName;
use crate::error::{DashboardError, DashboardResult};

/// 報酬記錄表 trait，為 `DataFrame` 提供欄位檢查與型別轉換
pub trait ReturnFrameExt: Sized {
    /// 確認欄位存在
    fn require_column(&self, column: &str) -> DashboardResult<()>;

    /// 將日報酬欄位嚴格轉為 f64；無法解析的值視為錯誤
    fn coerce_returns(self) -> DashboardResult<Self>;

    /// 將截止日期欄位轉為日期型別
    fn coerce_dates(self) -> DashboardResult<Self>;

    /// 載入後的初始轉換：空表且缺少報酬欄位時略過
    fn coerce_loaded(self) -> DashboardResult<Self>;
}

impl ReturnFrameExt for DataFrame {
    fn require_column(&self, column: &str) -> DashboardResult<()> {
        if self.column(column).is_err() {
            return Err(DashboardError::MissingColumn(column.to_string()));
        }
        Ok(())
    }

    fn coerce_returns(self) -> DashboardResult<Self> {
        let column = ColumnName::DAILY_RETURN;
        self.require_column(column)?;

        self.lazy()
            .with_column(col(column).strict_cast(DataType::Float64))
            .collect()
            .map_err(|e| DashboardError::Coercion {
                column: column.to_string(),
                reason: e.to_string(),
            })
    }

    fn coerce_dates(self) -> DashboardResult<Self> {
        let column = ColumnName::CUT_OFF_DATE;
        self.require_column(column)?;

        let dtype = self.column(column)?.dtype().clone();
        let expr = match dtype {
            DataType::Date => return Ok(self),
            DataType::Datetime(_, _) => col(column).cast(DataType::Date),
            DataType::String => col(column).str().to_date(StrptimeOptions {
                // API 回傳 `2023-01-31T00:00:00.000`，僅比對日期前綴
                format: Some("%Y-%m-%d".into()),
                strict: true,
                exact: false,
                cache: true,
            }),
            other => {
                return Err(DashboardError::Coercion {
                    column: column.to_string(),
                    reason: format!("不支援的日期欄位類型: {:?}", other),
                })
            }
        };

        self.lazy()
            .with_column(expr.alias(column))
            .collect()
            .map_err(|e| DashboardError::Coercion {
                column: column.to_string(),
                reason: e.to_string(),
            })
    }

    fn coerce_loaded(self) -> DashboardResult<Self> {
        if self.height() == 0 && self.column(ColumnName::DAILY_RETURN).is_err() {
            return Ok(self);
        }
        self.coerce_returns()
    }
}

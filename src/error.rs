//! 儀表板錯誤定義

use thiserror::Error;

use crate::data_provider::FetchError;

/// 儀表板處理錯誤類型
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("資料取得錯誤: {0}")]
    Fetch(#[from] FetchError),

    #[error("缺少必要欄位: {0}")]
    MissingColumn(String),

    #[error("欄位型別轉換失敗: 欄位 {column}, 原因: {reason}")]
    Coercion { column: String, reason: String },

    #[error("{0} 沒有可選擇的選項")]
    EmptySelection(String),

    #[error("無效的選擇: {0}")]
    InvalidSelection(String),

    #[error("IO 錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars 錯誤: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// 儀表板結果類型
pub type DashboardResult<T> = Result<T, DashboardError>;

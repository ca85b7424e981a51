use thiserror::Error;

/// 資料取得錯誤類型
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP 請求失敗: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API 回應狀態錯誤: {status}, 內容: {body}")]
    Status { status: u16, body: String },

    #[error("回應不是有效的 JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("回應格式不符: {0}")]
    UnexpectedShape(String),

    #[error("無法建立 HTTP 客戶端: {0}")]
    Client(String),

    #[error("檔案讀取錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars 錯誤: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// 資料取得結果類型
pub type FetchResult<T> = Result<T, FetchError>;

//! 資料取得模組
//!
//! 從 datos.gov.co 開放數據 API（或本地保存的 JSON 回應）取得 FIC
//! 報酬記錄，並攤平成 polars `DataFrame`。

pub mod error;
pub mod fetcher;
pub mod normalize;

pub use error::{FetchError, FetchResult};
pub use fetcher::{DataFetcher, FileFetcher, SocrataFetcher};
pub use normalize::normalize_records;

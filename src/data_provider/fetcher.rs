use async_trait::async_trait;
use polars::prelude::DataFrame;
use reqwest::{header, Client};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use super::error::{FetchError, FetchResult};
use super::normalize::normalize_records;
use crate::config::ApiConfig;

/// Socrata 應用程式權杖標頭
pub const APP_TOKEN_HEADER: &str = "X-App-Token";

/// 資料取得特性 - 儀表板管線的資料來源接口
#[async_trait]
pub trait DataFetcher: Send + Sync {
    /// 取得原始 JSON 回應
    async fn fetch_json(&self) -> FetchResult<Value>;

    /// 取得並攤平為 `DataFrame`
    async fn fetch(&self) -> FetchResult<DataFrame> {
        let payload = self.fetch_json().await?;
        let df = normalize_records(&payload)?;
        info!(rows = df.height(), columns = df.width(), "資料載入完成");
        Ok(df)
    }
}

/// datos.gov.co (Socrata) 開放數據 API 取得器
///
/// 每次 `fetch` 送出單一 GET 請求，不分頁也不重試。
pub struct SocrataFetcher {
    client: Client,
    url: String,
    token: String,
}

impl SocrataFetcher {
    /// 建立取得器；`timeout` 為 None 時使用客戶端預設值
    pub fn new(url: impl Into<String>, token: impl Into<String>, timeout: Option<Duration>) -> FetchResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            token: token.into(),
        })
    }

    /// 由 API 配置建立
    pub fn from_config(config: &ApiConfig) -> FetchResult<Self> {
        Self::new(config.url.clone(), config.token.clone(), config.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DataFetcher for SocrataFetcher {
    async fn fetch_json(&self) -> FetchResult<Value> {
        info!(url = %self.url, "請求開放數據 API");

        let response = self
            .client
            .get(&self.url)
            .header(APP_TOKEN_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "收到 API 回應");

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// 從本地保存的 API 回應 (JSON) 讀取
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataFetcher for FileFetcher {
    async fn fetch_json(&self) -> FetchResult<Value> {
        info!(path = %self.path.display(), "讀取本地 JSON 資料");
        let body = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::validation::{ValidationError, ValidationUtils, Validator};

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    pub log: LogConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.dashboard.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

/// 開放數據 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 資源端點 (Socrata JSON)
    pub url: String,
    /// 以 `X-App-Token` 標頭送出的存取權杖
    pub token: String,
    /// 請求超時（秒）；未設定時使用 HTTP 客戶端預設值
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub const DEFAULT_URL: &'static str = "https://www.datos.gov.co/resource/qhpu-8ixx.json";

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Validator for ApiConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.url, "api.url")?;
        ValidationUtils::not_empty(&self.token, "api.token")?;

        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ValidationError::InvalidValue(format!(
                "api.url 必須是 http(s) 位址: {}",
                self.url
            )));
        }

        if let Some(secs) = self.timeout_secs {
            ValidationUtils::in_range(secs, 1, 600, "api.timeout_secs")?;
        }

        Ok(())
    }
}

/// 儀表板輸出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// 預覽的前 N 行
    pub preview_rows: usize,
    /// 圖表 SVG 輸出目錄
    pub output_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            output_dir: PathBuf::from("charts"),
        }
    }
}

impl Validator for DashboardConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::in_range(self.preview_rows, 1, 1000, "dashboard.preview_rows")?;
        ValidationUtils::not_empty(&self.output_dir.to_string_lossy(), "dashboard.output_dir")?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::one_of(
            &self.level.to_lowercase().as_str(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        ValidationUtils::one_of(
            &self.format.to_lowercase().as_str(),
            &["pretty", "json"],
            "log.format",
        )?;

        Ok(())
    }
}

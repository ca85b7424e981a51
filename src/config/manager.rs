use config::ConfigError;
use once_cell::sync::OnceCell;
use std::path::Path;
use tracing::debug;

use crate::config::loader::{ConfigLoader, Environment};
use crate::config::types::ApplicationConfig;
use crate::config::validation::{ValidationError, Validator};

// 全局配置實例
static CONFIG: OnceCell<ApplicationConfig> = OnceCell::new();

/// 初始化配置（在應用程序啟動時調用）
///
/// 此時尚未驗證；命令列覆寫套用後再呼叫 [`ApplicationConfig::validate_for`]。
pub fn init_config() -> Result<&'static ApplicationConfig, ConfigError> {
    CONFIG.get_or_try_init(|| {
        let app_config = ApplicationConfig::load_from_env()?;
        debug!("配置初始化成功，環境：{:?}", Environment::from_env());
        Ok(app_config)
    })
}

impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load_from_dir(&ConfigLoader::config_dir(), env)
    }

    /// 從指定目錄與環境加載配置
    pub fn load_from_dir(dir: &Path, env: Environment) -> Result<Self, ConfigError> {
        let config_source = ConfigLoader::load_from_dir(dir, env)?;
        config_source.try_deserialize()
    }

    /// 驗證最終配置；`remote` 為 false（讀取本地檔案）時不要求 API 區段
    pub fn validate_for(&self, remote: bool) -> Result<(), ValidationError> {
        if remote {
            self.validate()?;
        } else {
            self.dashboard.validate()?;
            self.log.validate()?;
        }

        debug!("配置驗證通過");
        Ok(())
    }
}

/// 配置管理模組
///
/// 負責加載、驗證並提供儀表板的全局配置。
/// 配置來源依序為 `config/<環境>.toml` 與 `FIC__` 前綴的環境變數。
pub mod loader;
pub mod manager;
pub mod types;
pub mod validation;

// 重新導出常用組件
pub use loader::{ConfigLoader, Environment};
pub use manager::init_config;
pub use types::*;
pub use validation::{ValidationError, ValidationUtils, Validator};

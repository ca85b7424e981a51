// 模組定義
pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod data_provider;
pub mod domain_types;
pub mod error;
pub mod render;

pub use error::{DashboardError, DashboardResult};

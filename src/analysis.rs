//! 報酬記錄的統計、篩選與聚合

pub mod aggregation;
pub mod filter;
pub mod summary;

pub use aggregation::{mean_return_by_date, mean_return_by_entity, DateReturn, EntityReturn};
pub use filter::{distinct_values, filter_by_value};
pub use summary::{describe, preview, Summary, STATISTICS};

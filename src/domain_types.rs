pub mod columns;
pub mod frame;

pub use columns::ColumnName;
pub use frame::ReturnFrameExt;

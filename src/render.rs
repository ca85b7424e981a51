//! 圖表輸出：SVG 文件與終端機文字圖

pub mod charts;
pub mod svg;
pub mod terminal;

pub use charts::{ChartFiles, ChartWriter, ENTITY_CHART_FILE, TIME_CHART_FILE};
pub use svg::{bar_chart, line_chart, ChartSpec};
pub use terminal::text_bars;

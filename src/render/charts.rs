use std::fs;
use std::path::PathBuf;
use tracing::info;

use super::svg::{bar_chart, line_chart, ChartSpec};
use crate::analysis::{DateReturn, EntityReturn};
use crate::error::DashboardResult;

pub const ENTITY_CHART_FILE: &str = "entity_returns.svg";
pub const TIME_CHART_FILE: &str = "returns_over_time.svg";

/// 已寫出的圖表路徑
#[derive(Debug, Clone)]
pub struct ChartFiles {
    pub by_entity: PathBuf,
    pub over_time: PathBuf,
}

/// 將聚合結果寫成 SVG 檔
pub struct ChartWriter {
    output_dir: PathBuf,
}

impl ChartWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn entity_spec() -> ChartSpec {
        ChartSpec::new("Rentabilidad Promedio por Entidad", "Rentabilidad Promedio")
    }

    pub fn time_spec() -> ChartSpec {
        ChartSpec::new("Rentabilidad Promedio en el Tiempo", "Rentabilidad Promedio").with_x_label("Fecha")
    }

    /// 寫出兩張圖表，輸出目錄不存在時建立
    pub fn write(&self, by_entity: &[EntityReturn], over_time: &[DateReturn]) -> DashboardResult<ChartFiles> {
        fs::create_dir_all(&self.output_dir)?;

        let bars: Vec<(String, f64)> = by_entity
            .iter()
            .map(|r| (r.entity.clone(), r.mean_return))
            .collect();
        let points: Vec<_> = over_time.iter().map(|r| (r.date, r.mean_return)).collect();

        let files = ChartFiles {
            by_entity: self.write_file(ENTITY_CHART_FILE, &bar_chart(&Self::entity_spec(), &bars))?,
            over_time: self.write_file(TIME_CHART_FILE, &line_chart(&Self::time_spec(), &points))?,
        };

        Ok(files)
    }

    fn write_file(&self, name: &str, content: &str) -> DashboardResult<PathBuf> {
        let path = self.output_dir.join(name);
        fs::write(&path, content)?;
        info!(path = %path.display(), "圖表已寫出");
        Ok(path)
    }
}

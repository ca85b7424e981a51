//! 儀表板管線
//!
//! 依序執行：取得資料、顯示概要、選擇篩選欄位與值、輸出圖表。
//! 所有畫面輸出寫入同一個 `Write`，日誌另走 tracing。

pub mod selector;

use polars::prelude::DataFrame;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::analysis::{
    distinct_values, filter_by_value, mean_return_by_date, mean_return_by_entity, DateReturn,
    EntityReturn, Summary,
};
use crate::data_provider::DataFetcher;
use crate::domain_types::{ColumnName, ReturnFrameExt};
use crate::error::DashboardResult;
use crate::render::{text_bars, ChartFiles, ChartWriter};

pub use selector::{choose, PromptSelector, Selection, Selector};

pub const TITLE: &str = "Análisis de Rentabilidades de Fondos de Inversión Colectiva (FIC)";

/// 終端機文字圖最多顯示的列數
const TERMINAL_ROWS: usize = 25;

/// 儀表板設定
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub preview_rows: usize,
    pub output_dir: PathBuf,
}

/// 篩選後的圖表結果
#[derive(Debug, Clone)]
pub struct ChartReport {
    pub filtered_rows: usize,
    pub by_entity: Vec<EntityReturn>,
    pub over_time: Vec<DateReturn>,
    pub files: ChartFiles,
}

/// 互動式儀表板
pub struct Dashboard<W: Write> {
    out: W,
    options: DashboardOptions,
    charts: ChartWriter,
}

impl<W: Write> Dashboard<W> {
    pub fn new(out: W, options: DashboardOptions) -> Self {
        let charts = ChartWriter::new(options.output_dir.clone());
        Self { out, options, charts }
    }

    /// 取回輸出目的地
    pub fn into_inner(self) -> W {
        self.out
    }

    /// 顯示標題並載入資料；載入後立即將日報酬轉為數值
    pub async fn load(&mut self, fetcher: &dyn DataFetcher) -> DashboardResult<DataFrame> {
        writeln!(self.out, "{}", TITLE)?;
        writeln!(self.out, "{}", "=".repeat(TITLE.chars().count()))?;
        writeln!(self.out, "Cargando datos...")?;

        let df = fetcher.fetch().await?.coerce_loaded()?;

        writeln!(self.out, "Datos cargados con éxito!")?;
        writeln!(self.out)?;
        Ok(df)
    }

    /// 顯示描述統計與前幾行
    pub fn show_summary(&mut self, df: &DataFrame) -> DashboardResult<Summary> {
        let summary = Summary::new(df, self.options.preview_rows)?;

        writeln!(self.out, "### Información General del Dataset")?;
        writeln!(self.out, "{}", summary.statistics)?;
        writeln!(self.out)?;
        writeln!(self.out, "### Primeras Filas del Dataset")?;
        writeln!(self.out, "{}", summary.preview)?;
        writeln!(self.out)?;

        Ok(summary)
    }

    /// 依序選擇欄位與值；預設答案優先，其餘交給 `selector`
    pub fn select_filter(
        &mut self,
        df: &DataFrame,
        selection: &Selection,
        selector: &mut dyn Selector,
    ) -> DashboardResult<(String, String)> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let column = choose(
            selection.column.as_deref(),
            "Selecciona un campo para filtrar",
            &columns,
            selector,
        )?;

        let values = distinct_values(df, &column)?;
        let value = choose(
            selection.value.as_deref(),
            &format!("Selecciona un valor para {}", column),
            &values,
            selector,
        )?;

        info!(column = %column, value = %value, "已選擇篩選條件");
        Ok((column, value))
    }

    /// 列出欄位的相異值
    pub fn list_values(&mut self, df: &DataFrame, column: &str) -> DashboardResult<Vec<String>> {
        let values = distinct_values(df, column)?;
        for value in &values {
            writeln!(self.out, "{}", value)?;
        }
        Ok(values)
    }

    /// 篩選、轉換、聚合並輸出兩張圖表
    pub fn show_charts(&mut self, df: &DataFrame, column: &str, value: &str) -> DashboardResult<ChartReport> {
        writeln!(self.out, "### Gráficas de Rentabilidad para {}: {}", column, value)?;

        for required in ColumnName::chart_columns() {
            df.require_column(required)?;
        }

        let filtered = filter_by_value(df, column, value)?
            .coerce_dates()?
            .coerce_returns()?;

        let by_entity = mean_return_by_entity(&filtered)?;
        let over_time = mean_return_by_date(&filtered)?;
        let files = self.charts.write(&by_entity, &over_time)?;

        writeln!(self.out)?;
        writeln!(self.out, "Rentabilidad Promedio por Entidad")?;
        let bars: Vec<(String, f64)> = by_entity
            .iter()
            .map(|r| (r.entity.clone(), r.mean_return))
            .collect();
        write!(self.out, "{}", text_bars(&bars, TERMINAL_ROWS))?;

        writeln!(self.out)?;
        writeln!(self.out, "Rentabilidad Promedio en el Tiempo")?;
        let points: Vec<(String, f64)> = over_time
            .iter()
            .map(|r| (r.date.format("%Y-%m-%d").to_string(), r.mean_return))
            .collect();
        write!(self.out, "{}", text_bars(&points, TERMINAL_ROWS))?;

        writeln!(self.out)?;
        writeln!(self.out, "Gráficas guardadas en:")?;
        writeln!(self.out, "  {}", files.by_entity.display())?;
        writeln!(self.out, "  {}", files.over_time.display())?;

        Ok(ChartReport {
            filtered_rows: filtered.height(),
            by_entity,
            over_time,
            files,
        })
    }

    /// 完整執行一次儀表板
    pub async fn run(
        &mut self,
        fetcher: &dyn DataFetcher,
        selection: &Selection,
        selector: &mut dyn Selector,
    ) -> DashboardResult<ChartReport> {
        let df = self.load(fetcher).await?;
        self.show_summary(&df)?;
        let (column, value) = self.select_filter(&df, selection, selector)?;
        self.show_charts(&df, &column, &value)
    }
}

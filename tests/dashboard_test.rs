mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use common::{sample_payload, StaticFetcher};
use fic_dashboard::analysis::{distinct_values, filter_by_value, mean_return_by_entity};
use fic_dashboard::dashboard::{Dashboard, DashboardOptions, PromptSelector, Selection, Selector};
use fic_dashboard::data_provider::DataFetcher;
use fic_dashboard::domain_types::{ColumnName, ReturnFrameExt};
use fic_dashboard::render::{ENTITY_CHART_FILE, TIME_CHART_FILE};
use fic_dashboard::{DashboardError, DashboardResult};
use polars::prelude::*;
use serde_json::json;
use std::io::Cursor;
use std::path::Path;

fn dashboard(output_dir: &Path) -> Dashboard<Vec<u8>> {
    Dashboard::new(
        Vec::new(),
        DashboardOptions {
            preview_rows: 5,
            output_dir: output_dir.to_path_buf(),
        },
    )
}

/// 不應被呼叫的選擇器（所有答案皆由命令列提供）
struct NoPrompt;

impl Selector for NoPrompt {
    fn select(&mut self, label: &str, _: &[String]) -> DashboardResult<String> {
        panic!("unexpected prompt: {}", label);
    }
}

fn preset(column: &str, value: &str) -> Selection {
    Selection {
        column: Some(column.to_string()),
        value: Some(value.to_string()),
    }
}

#[tokio::test]
async fn test_two_entities_same_date_scenario() {
    let fetcher = StaticFetcher {
        payload: json!([
            {"nombre_entidad": "A", "fecha_corte": "2023-01-01", "rentabilidad_diaria": "1.0"},
            {"nombre_entidad": "B", "fecha_corte": "2023-01-01", "rentabilidad_diaria": "2.0"}
        ]),
    };
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard(dir.path());

    let report = dashboard
        .run(&fetcher, &preset(ColumnName::CUT_OFF_DATE, "2023-01-01"), &mut NoPrompt)
        .await
        .unwrap();

    assert_eq!(report.filtered_rows, 2);
    let entities: Vec<&str> = report.by_entity.iter().map(|r| r.entity.as_str()).collect();
    assert_eq!(entities, vec!["B", "A"]);
    assert_eq!(report.by_entity[0].mean_return, 2.0);

    assert_eq!(report.over_time.len(), 1);
    assert_eq!(report.over_time[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    assert_eq!(report.over_time[0].mean_return, 1.5);
}

#[tokio::test]
async fn test_full_run_output_and_chart_files() {
    let fetcher = StaticFetcher { payload: sample_payload() };
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard(dir.path());

    let report = dashboard
        .run(&fetcher, &preset("tipo_entidad", "5"), &mut NoPrompt)
        .await
        .unwrap();

    // Comisionista C (tipo 85) 被排除
    assert_eq!(report.filtered_rows, 4);
    let entities: Vec<&str> = report.by_entity.iter().map(|r| r.entity.as_str()).collect();
    assert_eq!(entities, vec!["Fiduciaria B", "Fiduciaria A"]);

    let dates: Vec<NaiveDate> = report.over_time.iter().map(|r| r.date).collect();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(dates.len(), 3);

    assert!(dir.path().join(ENTITY_CHART_FILE).exists());
    assert!(dir.path().join(TIME_CHART_FILE).exists());

    let output = String::from_utf8(dashboard.into_inner()).unwrap();
    assert!(output.contains("Cargando datos..."));
    assert!(output.contains("Datos cargados con éxito!"));
    assert!(output.contains("### Información General del Dataset"));
    assert!(output.contains("### Primeras Filas del Dataset"));
    assert!(output.contains("### Gráficas de Rentabilidad para tipo_entidad: 5"));
    assert!(output.contains("Fiduciaria B"));
}

#[tokio::test]
async fn test_loaded_returns_are_numeric() {
    let fetcher = StaticFetcher { payload: sample_payload() };
    let dir = tempfile::tempdir().unwrap();

    let df = dashboard(dir.path()).load(&fetcher).await.unwrap();
    let returns = df.column(ColumnName::DAILY_RETURN).unwrap();
    assert_eq!(returns.dtype(), &DataType::Float64);
    assert_eq!(returns.null_count(), 0);
}

#[tokio::test]
async fn test_empty_response_has_no_options() {
    let fetcher = StaticFetcher { payload: json!([]) };
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard(dir.path());

    let df = dashboard.load(&fetcher).await.unwrap();
    assert_eq!(df.height(), 0);
    assert!(df.get_column_names().is_empty());

    let summary = dashboard.show_summary(&df).unwrap();
    assert_eq!(summary.preview.height(), 0);

    let err = dashboard
        .select_filter(&df, &Selection::default(), &mut NoPrompt)
        .unwrap_err();
    assert_matches!(err, DashboardError::EmptySelection(_));
}

#[test]
fn test_zero_rows_yield_empty_distinct_values() {
    let df = fic_dashboard::data_provider::normalize_records(&sample_payload())
        .unwrap()
        .head(Some(0));

    for name in df.get_column_names() {
        assert!(distinct_values(&df, name.as_str()).unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_filter_returns_only_exact_matches() {
    let df = StaticFetcher { payload: sample_payload() }
        .fetch()
        .await
        .unwrap()
        .coerce_loaded()
        .unwrap();

    let filtered = filter_by_value(&df, ColumnName::ENTITY_NAME, "Fiduciaria A").unwrap();
    assert_eq!(filtered.height(), 2);
    assert!(filtered
        .column(ColumnName::ENTITY_NAME)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .all(|v| v == Some("Fiduciaria A")));

    let partial = filter_by_value(&df, ColumnName::ENTITY_NAME, "Fiduciaria").unwrap();
    assert_eq!(partial.height(), 0);

    let ordered = mean_return_by_entity(&df).unwrap();
    assert!(ordered.windows(2).all(|w| w[0].mean_return >= w[1].mean_return));
}

#[tokio::test]
async fn test_interactive_selection() {
    let fetcher = StaticFetcher { payload: sample_payload() };
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard(dir.path());
    let df = dashboard.load(&fetcher).await.unwrap();

    // 欄位選第 2 項 (nombre_entidad)，值直接輸入
    let mut prompts = Vec::new();
    let mut selector = PromptSelector::new(Cursor::new("2\nFiduciaria B\n"), &mut prompts);
    let (column, value) = dashboard
        .select_filter(&df, &Selection::default(), &mut selector)
        .unwrap();

    assert_eq!(column, ColumnName::ENTITY_NAME);
    assert_eq!(value, "Fiduciaria B");

    let prompts = String::from_utf8(prompts).unwrap();
    assert!(prompts.contains("Selecciona un campo para filtrar"));
    assert!(prompts.contains("Selecciona un valor para nombre_entidad"));
}

#[tokio::test]
async fn test_malformed_return_aborts_load() {
    let fetcher = StaticFetcher {
        payload: json!([
            {"nombre_entidad": "A", "fecha_corte": "2023-01-01", "rentabilidad_diaria": "uno"}
        ]),
    };
    let dir = tempfile::tempdir().unwrap();

    let err = dashboard(dir.path()).load(&fetcher).await.unwrap_err();
    assert_matches!(err, DashboardError::Coercion { .. });
}

#[tokio::test]
async fn test_unknown_preset_value_is_rejected() {
    let fetcher = StaticFetcher { payload: sample_payload() };
    let dir = tempfile::tempdir().unwrap();

    let err = dashboard(dir.path())
        .run(&fetcher, &preset(ColumnName::ENTITY_NAME, "Fiduciaria Z"), &mut NoPrompt)
        .await
        .unwrap_err();
    assert_matches!(err, DashboardError::InvalidSelection(_));
}

#[tokio::test]
async fn test_list_values() {
    let fetcher = StaticFetcher { payload: sample_payload() };
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard(dir.path());

    let df = dashboard.load(&fetcher).await.unwrap();
    let values = dashboard.list_values(&df, ColumnName::ENTITY_NAME).unwrap();
    assert_eq!(values, vec!["Fiduciaria A", "Fiduciaria B", "Comisionista C"]);

    let output = String::from_utf8(dashboard.into_inner()).unwrap();
    assert!(output.trim_end().ends_with("Comisionista C"));
}

#[tokio::test]
async fn test_charts_require_date_column() {
    let fetcher = StaticFetcher {
        payload: json!([
            {"nombre_entidad": "A", "rentabilidad_diaria": "1.0"}
        ]),
    };
    let dir = tempfile::tempdir().unwrap();

    let err = dashboard(dir.path())
        .run(&fetcher, &preset(ColumnName::ENTITY_NAME, "A"), &mut NoPrompt)
        .await
        .unwrap_err();
    assert_matches!(err, DashboardError::MissingColumn(column) if column == ColumnName::CUT_OFF_DATE);
    assert!(!dir.path().join(ENTITY_CHART_FILE).exists());
}

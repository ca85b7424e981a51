//! 資料集欄位名稱

/// datos.gov.co `qhpu-8ixx` 資料集中儀表板使用的欄位
pub struct ColumnName;

impl ColumnName {
    pub const CUT_OFF_DATE: &'static str = "fecha_corte"; // 報告截止日期
    pub const ENTITY_NAME: &'static str = "nombre_entidad"; // 管理機構名稱
    pub const DAILY_RETURN: &'static str = "rentabilidad_diaria"; // 日報酬率

    // 聚合結果欄位
    pub const MEAN_RETURN: &'static str = "rentabilidad_promedio";

    /// 圖表計算所需欄位
    pub fn chart_columns() -> [&'static str; 3] {
        [Self::CUT_OFF_DATE, Self::ENTITY_NAME, Self::DAILY_RETURN]
    }
}

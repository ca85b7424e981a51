//! 終端機文字圖表

use std::fmt::Write as _;

use super::svg::{format_value, truncate_label};

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 36;

/// 水平文字長條圖
///
/// 正值以 `█`、負值以 `░` 表示，長度依最大有限絕對值縮放；
/// 非有限值只顯示數字。超過 `max_rows` 的列以摘要行帶過。
pub fn text_bars(rows: &[(String, f64)], max_rows: usize) -> String {
    let mut out = String::new();

    if rows.is_empty() {
        let _ = writeln!(out, "  (sin datos)");
        return out;
    }

    let max_abs = rows
        .iter()
        .map(|(_, v)| v.abs())
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    for (label, value) in rows.iter().take(max_rows) {
        let len = if max_abs > 0.0 && value.is_finite() {
            (((value.abs() / max_abs) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH)
        } else {
            0
        };
        let glyph = if *value < 0.0 { "░" } else { "█" };

        let _ = writeln!(
            out,
            "  {:<width$} │{:<bar$} {}",
            truncate_label(label, LABEL_WIDTH),
            glyph.repeat(len),
            format_value(*value),
            width = LABEL_WIDTH,
            bar = BAR_WIDTH,
        );
    }

    if rows.len() > max_rows {
        let _ = writeln!(out, "  … ({} más)", rows.len() - max_rows);
    }

    out
}

//! SVG 圖表產生
//!
//! 產生獨立的 SVG 文件：機構平均報酬長條圖與平均報酬時間折線圖。

use chrono::NaiveDate;
use std::fmt::Write as _;

const FONT: &str = "DejaVu Sans, Segoe UI, sans-serif";
const BAR_COLOR: &str = "#1f77b4";
const NEGATIVE_BAR_COLOR: &str = "#d62728";
const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#e5e5e5";
const Y_TICKS: usize = 5;
const MAX_X_LABELS: usize = 8;

/// 圖表外觀設定
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: String,
    pub width: f64,
    pub height: f64,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: None,
            y_label: y_label.into(),
            width: 1000.0,
            height: 600.0,
        }
    }

    pub fn with_x_label(mut self, x_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self
    }
}

/// 繪圖區邊界
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl PlotArea {
    fn new(spec: &ChartSpec, bottom_margin: f64) -> Self {
        Self {
            left: 90.0,
            right: spec.width - 30.0,
            top: 60.0,
            bottom: spec.height - bottom_margin,
        }
    }

    fn width(&self) -> f64 {
        self.right - self.left
    }

    fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// 數值軸範圍，一律包含 0
#[derive(Debug, Clone, Copy, PartialEq)]
struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    fn from_values(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values
            .filter(|v| v.is_finite())
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if (max - min).abs() < f64::EPSILON {
            Self { min: min - 1.0, max: max + 1.0 }
        } else {
            let pad = (max - min) * 0.05;
            Self {
                min: if min < 0.0 { min - pad } else { min },
                max: if max > 0.0 { max + pad } else { max },
            }
        }
    }

    /// 非有限值壓到軸範圍內：±inf 取邊界，NaN 取 0
    fn to_y(&self, value: f64, area: &PlotArea) -> f64 {
        let value = if value.is_nan() { 0.0 } else { value.clamp(self.min, self.max) };
        area.bottom - (value - self.min) / (self.max - self.min) * area.height()
    }
}

/// XML 文字跳脫
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

fn open_document(svg: &mut String, spec: &ChartSpec) {
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{:.0}' height='{:.0}' viewBox='0 0 {:.0} {:.0}' role='img'>",
        spec.width, spec.height, spec.width, spec.height
    );
    let _ = writeln!(
        svg,
        "  <rect width='{:.0}' height='{:.0}' fill='#ffffff'/>",
        spec.width, spec.height
    );
    let _ = writeln!(
        svg,
        "  <text x='{:.1}' y='34' text-anchor='middle' font-family='{FONT}' font-size='20' font-weight='600' fill='{AXIS_COLOR}'>{}</text>",
        spec.width / 2.0,
        escape_text(&spec.title)
    );
}

fn draw_axes(svg: &mut String, spec: &ChartSpec, area: &PlotArea, range: &ValueRange) {
    for i in 0..=Y_TICKS {
        let value = range.min + (range.max - range.min) * i as f64 / Y_TICKS as f64;
        let y = range.to_y(value, area);
        let _ = writeln!(
            svg,
            "  <line x1='{:.1}' y1='{y:.1}' x2='{:.1}' y2='{y:.1}' stroke='{GRID_COLOR}'/>",
            area.left, area.right
        );
        let _ = writeln!(
            svg,
            "  <text x='{:.1}' y='{:.1}' text-anchor='end' font-family='{FONT}' font-size='11' fill='{AXIS_COLOR}'>{}</text>",
            area.left - 8.0,
            y + 4.0,
            format_value(value)
        );
    }

    let zero_y = range.to_y(0.0, area);
    let _ = writeln!(
        svg,
        "  <line x1='{:.1}' y1='{zero_y:.1}' x2='{:.1}' y2='{zero_y:.1}' stroke='{AXIS_COLOR}'/>",
        area.left, area.right
    );
    let _ = writeln!(
        svg,
        "  <line x1='{:.1}' y1='{:.1}' x2='{:.1}' y2='{:.1}' stroke='{AXIS_COLOR}'/>",
        area.left, area.top, area.left, area.bottom
    );

    let mid_y = (area.top + area.bottom) / 2.0;
    let _ = writeln!(
        svg,
        "  <text x='22' y='{mid_y:.1}' text-anchor='middle' transform='rotate(-90 22 {mid_y:.1})' font-family='{FONT}' font-size='14' fill='{AXIS_COLOR}'>{}</text>",
        escape_text(&spec.y_label)
    );

    if let Some(x_label) = &spec.x_label {
        let _ = writeln!(
            svg,
            "  <text x='{:.1}' y='{:.1}' text-anchor='middle' font-family='{FONT}' font-size='14' fill='{AXIS_COLOR}'>{}</text>",
            (area.left + area.right) / 2.0,
            spec.height - 14.0,
            escape_text(x_label)
        );
    }
}

fn draw_no_data(svg: &mut String, area: &PlotArea) {
    let _ = writeln!(
        svg,
        "  <text x='{:.1}' y='{:.1}' text-anchor='middle' font-family='{FONT}' font-size='16' fill='#888888'>sin datos</text>",
        (area.left + area.right) / 2.0,
        (area.top + area.bottom) / 2.0
    );
}

fn close_document(svg: &mut String) {
    let _ = writeln!(svg, "</svg>");
}

/// 數值標籤格式，日報酬通常很小，保留四位小數
pub fn format_value(value: f64) -> String {
    format!("{value:.4}")
}

/// 長條圖：每個 `(標籤, 數值)` 一根長條，依輸入順序排列
pub fn bar_chart(spec: &ChartSpec, bars: &[(String, f64)]) -> String {
    let area = PlotArea::new(spec, 170.0);
    let range = ValueRange::from_values(bars.iter().map(|(_, v)| *v));
    let mut svg = String::new();

    open_document(&mut svg, spec);
    draw_axes(&mut svg, spec, &area, &range);

    if bars.is_empty() {
        draw_no_data(&mut svg, &area);
        close_document(&mut svg);
        return svg;
    }

    let slot = area.width() / bars.len() as f64;
    let bar_width = (slot * 0.8).max(1.0);
    let zero_y = range.to_y(0.0, &area);

    for (index, (label, value)) in bars.iter().enumerate() {
        let x = area.left + slot * index as f64 + (slot - bar_width) / 2.0;
        let y = range.to_y(*value, &area);
        let (top, height) = if y < zero_y { (y, zero_y - y) } else { (zero_y, y - zero_y) };
        let color = if *value < 0.0 { NEGATIVE_BAR_COLOR } else { BAR_COLOR };

        let _ = writeln!(
            svg,
            "  <rect x='{x:.1}' y='{top:.1}' width='{bar_width:.1}' height='{height:.1}' fill='{color}'><title>{}: {}</title></rect>",
            escape_text(label),
            format_value(*value)
        );

        let label_x = x + bar_width / 2.0;
        let label_y = area.bottom + 12.0;
        let _ = writeln!(
            svg,
            "  <text x='{label_x:.1}' y='{label_y:.1}' text-anchor='end' transform='rotate(-45 {label_x:.1} {label_y:.1})' font-family='{FONT}' font-size='10' fill='{AXIS_COLOR}'>{}</text>",
            escape_text(&truncate_label(label, 32))
        );
    }

    close_document(&mut svg);
    svg
}

/// 折線圖：x 軸依日期實際間距，點依輸入順序連接
pub fn line_chart(spec: &ChartSpec, points: &[(NaiveDate, f64)]) -> String {
    let area = PlotArea::new(spec, 80.0);
    let range = ValueRange::from_values(points.iter().map(|(_, v)| *v));
    let mut svg = String::new();

    open_document(&mut svg, spec);
    draw_axes(&mut svg, spec, &area, &range);

    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => {
            draw_no_data(&mut svg, &area);
            close_document(&mut svg);
            return svg;
        }
    };

    let span_days = (last - first).num_days().max(1) as f64;
    let to_x = |date: NaiveDate| {
        if first == last {
            (area.left + area.right) / 2.0
        } else {
            area.left + (date - first).num_days() as f64 / span_days * area.width()
        }
    };

    let polyline = points
        .iter()
        .map(|(date, value)| format!("{:.1},{:.1}", to_x(*date), range.to_y(*value, &area)))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(
        svg,
        "  <polyline points='{polyline}' fill='none' stroke='{BAR_COLOR}' stroke-width='2'/>"
    );

    for (date, value) in points {
        let _ = writeln!(
            svg,
            "  <circle cx='{:.1}' cy='{:.1}' r='2.5' fill='{BAR_COLOR}'><title>{}: {}</title></circle>",
            to_x(*date),
            range.to_y(*value, &area),
            date.format("%Y-%m-%d"),
            format_value(*value)
        );
    }

    let step = points.len().div_ceil(MAX_X_LABELS).max(1);
    for (date, _) in points.iter().step_by(step) {
        let _ = writeln!(
            svg,
            "  <text x='{:.1}' y='{:.1}' text-anchor='middle' font-family='{FONT}' font-size='11' fill='{AXIS_COLOR}'>{}</text>",
            to_x(*date),
            area.bottom + 18.0,
            date.format("%Y-%m-%d")
        );
    }

    close_document(&mut svg);
    svg
}

/// 截斷過長的標籤（以字元計）
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

//! 篩選選擇：命令列預設答案或互動式提示

use std::io::{BufRead, Write};

use crate::error::{DashboardError, DashboardResult};

/// 提示時最多列出的選項數
const MAX_LISTED_OPTIONS: usize = 50;

/// 預先提供的選擇（通常來自命令列）
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub column: Option<String>,
    pub value: Option<String>,
}

/// 從選項中挑選一個
pub trait Selector {
    /// `options` 保證非空
    fn select(&mut self, label: &str, options: &[String]) -> DashboardResult<String>;
}

/// 以預設答案或 `selector` 決定選項
///
/// 沒有選項時回傳 `EmptySelection`；預設答案不在選項中時回傳 `InvalidSelection`。
pub fn choose(
    preset: Option<&str>,
    label: &str,
    options: &[String],
    selector: &mut dyn Selector,
) -> DashboardResult<String> {
    if options.is_empty() {
        return Err(DashboardError::EmptySelection(label.to_string()));
    }

    match preset {
        Some(answer) if options.iter().any(|o| o == answer) => Ok(answer.to_string()),
        Some(answer) => Err(DashboardError::InvalidSelection(format!(
            "{}: '{}' 不在可選項目中",
            label, answer
        ))),
        None => selector.select(label, options),
    }
}

/// 以編號清單在終端機提示選擇
///
/// 可輸入完整值或編號，完整值優先比對；空白輸入選第一項。
/// 無效輸入會重新提示，輸入結束 (EOF) 則視為無效選擇。
pub struct PromptSelector<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn print_options(&mut self, label: &str, options: &[String]) -> DashboardResult<()> {
        writeln!(self.output, "{}:", label)?;
        for (index, option) in options.iter().take(MAX_LISTED_OPTIONS).enumerate() {
            writeln!(self.output, "  [{}] {}", index + 1, option)?;
        }
        if options.len() > MAX_LISTED_OPTIONS {
            writeln!(
                self.output,
                "  … {} opciones más; escriba el valor exacto",
                options.len() - MAX_LISTED_OPTIONS
            )?;
        }
        Ok(())
    }

    fn resolve(answer: &str, options: &[String]) -> Option<String> {
        if answer.is_empty() {
            return options.first().cloned();
        }
        // 數值欄位的選項本身可能是數字
        if let Some(exact) = options.iter().find(|o| o.as_str() == answer) {
            return Some(exact.clone());
        }
        answer
            .parse::<usize>()
            .ok()
            .filter(|number| (1..=options.len()).contains(number))
            .map(|number| options[number - 1].clone())
    }
}

impl<R: BufRead, W: Write> Selector for PromptSelector<R, W> {
    fn select(&mut self, label: &str, options: &[String]) -> DashboardResult<String> {
        self.print_options(label, options)?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(DashboardError::InvalidSelection(format!(
                    "{}: entrada finalizada sin selección",
                    label
                )));
            }

            match Self::resolve(line.trim(), options) {
                Some(choice) => return Ok(choice),
                None => writeln!(self.output, "Opción inválida: {}", line.trim())?,
            }
        }
    }
}

//! 输出格式化模块
//!
//! 把比较报告渲染为纯文本、Markdown 或 JSON

use crate::comparer::ComparisonResult;
use crate::difference::DifferenceKind;
use crate::error::{ClassDiffError, Result};

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 纯文本格式
    #[default]
    PlainText,
    /// Markdown 格式
    Markdown,
    /// JSON 格式
    Json,
}

/// 报告渲染器
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    format: OutputFormat,
}

impl ReportRenderer {
    /// 创建指定格式的渲染器
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// 渲染比较报告
    pub fn render(&self, result: &ComparisonResult) -> Result<String> {
        match self.format {
            OutputFormat::PlainText => Ok(self.render_plain_text(result)),
            OutputFormat::Markdown => Ok(self.render_markdown(result)),
            OutputFormat::Json => self.render_json(result),
        }
    }

    /// 渲染为纯文本格式
    fn render_plain_text(&self, result: &ComparisonResult) -> String {
        let mut output = String::new();

        if let Some(title) = comparison_title(result) {
            output.push_str(&title);
            output.push_str("\n\n");
        }

        output.push_str(&format!(
            "Signatures equal: {}\n",
            yes_no(result.signatures_equal)
        ));
        output.push_str(&format!(
            "Implementations equal: {}\n",
            yes_no(result.implementations_semantically_equal)
        ));
        output.push_str(&format!(
            "Similarity: {}\n",
            format_percentage(result.similarity_score)
        ));

        let counts = difference_counts(result);
        if !counts.is_empty() {
            output.push_str("\nSummary:\n");
            for (kind, count) in counts {
                output.push_str(&format!("  {kind}: {count}\n"));
            }
        }

        if !result.member_differences.is_empty() {
            output.push_str("\nDifferences:\n");
            for difference in &result.member_differences {
                output.push_str(&format!(
                    "  {}: {}\n",
                    difference.kind, difference.description
                ));
            }
        }

        if !result.warnings.is_empty() {
            output.push_str("\nWarnings:\n");
            for warning in &result.warnings {
                output.push_str(&format!("  - {warning}\n"));
            }
        }

        output
    }

    /// 渲染为 Markdown 格式
    fn render_markdown(&self, result: &ComparisonResult) -> String {
        let mut output = String::new();

        output.push_str("# Class Comparison\n\n");
        if let Some(title) = comparison_title(result) {
            output.push_str(&format!("{title}\n\n"));
        }

        output.push_str("## Summary\n\n");
        output.push_str("| Check | Result |\n");
        output.push_str("|-------|--------|\n");
        output.push_str(&format!(
            "| Signatures equal | {} |\n",
            yes_no(result.signatures_equal)
        ));
        output.push_str(&format!(
            "| Implementations equal | {} |\n",
            yes_no(result.implementations_semantically_equal)
        ));
        output.push_str(&format!(
            "| Similarity | {} |\n",
            format_percentage(result.similarity_score)
        ));
        for (kind, count) in difference_counts(result) {
            output.push_str(&format!("| {kind} | {count} |\n"));
        }

        if !result.member_differences.is_empty() {
            output.push_str("\n## Differences\n\n");
            output.push_str("| Member | Kind | Description |\n");
            output.push_str("|--------|------|-------------|\n");
            for difference in &result.member_differences {
                output.push_str(&format!(
                    "| `{}` | {} | {} |\n",
                    difference.member_name,
                    difference.kind,
                    escape_table_cell(&difference.description)
                ));
            }
        }

        if !result.warnings.is_empty() {
            output.push_str("\n## Warnings\n\n");
            for warning in &result.warnings {
                output.push_str(&format!("- {warning}\n"));
            }
        }

        output
    }

    /// 渲染为 JSON 格式
    fn render_json(&self, result: &ComparisonResult) -> Result<String> {
        serde_json::to_string_pretty(result)
            .map_err(|e| ClassDiffError::SerializationError(e.to_string()))
    }
}

fn comparison_title(result: &ComparisonResult) -> Option<String> {
    match (&result.left_name, &result.right_name) {
        (Some(left), Some(right)) if left == right => Some(format!("Comparing {left}")),
        (Some(left), Some(right)) => Some(format!("Comparing {left} with {right}")),
        _ => None,
    }
}

/// 出现过的差异种类及其数量，按展示顺序排列
fn difference_counts(result: &ComparisonResult) -> Vec<(DifferenceKind, usize)> {
    DifferenceKind::ALL
        .iter()
        .map(|kind| (*kind, result.count(*kind)))
        .filter(|(_, count)| *count > 0)
        .collect()
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn format_percentage(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

fn escape_table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

//! レポート出力
//!
//! text: 端末向け（折り返しあり）
//! markdown: 貼り付け用
//! json: 生の AnalysisResult

mod markdown;
mod text;

pub use markdown::render_markdown;
pub use text::render_text;

use crate::error::Result;
use scholar_pulse_common::{AnalysisResult, Report};

/// 出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use text, markdown, or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// 解析結果を指定形式の文字列にする
pub fn render(result: &AnalysisResult, paper_name: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(&Report::from_result(result, paper_name))),
        OutputFormat::Markdown => Ok(render_markdown(&Report::from_result(result, paper_name))),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

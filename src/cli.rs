use crate::render::OutputFormat;
use clap::{Parser, Subcommand};
use scholar_pulse_common::SectionId;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scholar-pulse")]
#[command(about = "研究論文PDFを読者別の解説・要約・キーワードに変換するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 論文PDFを解析してレポートを出力
    Analyze {
        /// 論文PDFのパス
        #[arg(required = true)]
        file: PathBuf,

        /// 生成するセクション（カンマ区切り、省略時は全て）
        #[arg(short, long, value_delimiter = ',')]
        sections: Vec<SectionId>,

        /// 出力形式 (text/markdown/json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// 未選択セクションを結果から除去
        #[arg(long)]
        strict: bool,

        /// モデル名（設定より優先）
        #[arg(long)]
        model: Option<String>,
    },

    /// 対話的にファイル選択・セクション選択・生成を行う
    Interactive {
        /// 最初に読み込む論文PDF
        file: Option<PathBuf>,
    },

    /// 選択可能なセクションを一覧表示
    Sections,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 既定のモデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_with_sections() {
        let cli = Cli::try_parse_from([
            "scholar-pulse",
            "analyze",
            "paper.pdf",
            "--sections",
            "keywords,summaries",
            "--format",
            "md",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { file, sections, format, strict, model } => {
                assert_eq!(file, PathBuf::from("paper.pdf"));
                assert_eq!(sections, vec![SectionId::Keywords, SectionId::Summaries]);
                assert_eq!(format, OutputFormat::Markdown);
                assert!(!strict);
                assert!(model.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_analyze_defaults() {
        let cli = Cli::try_parse_from(["scholar-pulse", "-v", "analyze", "paper.pdf"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze { sections, format, .. } => {
                assert!(sections.is_empty());
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_unknown_section_rejected() {
        let parsed = Cli::try_parse_from(["scholar-pulse", "analyze", "p.pdf", "-s", "abstract"]);
        assert!(parsed.is_err());
    }
}

use anyhow::{Context, Result};
use std::path::Path;

use scholar_pulse::{workflow, Analyzer, Config, GeminiClient};
use scholar_pulse_common::types::media_type_from_name;
use scholar_pulse_common::{AnalysisResult, GenerateTicket, PaperFile};

/// ディスク上のファイルから PaperFile を作る（本体は生成時に読む）
pub fn paper_from_path(path: &Path) -> Result<PaperFile> {
    let metadata = std::fs::metadata(path).with_context(|| format!("read {}", path.display()))?;
    Ok(PaperFile::from_path(path, metadata.len()))
}

/// ドロップされたファイルから PaperFile を作る
pub fn paper_from_dropped(file: &egui::DroppedFile) -> Result<PaperFile> {
    if let Some(path) = &file.path {
        return paper_from_path(path);
    }
    let bytes = file
        .bytes
        .clone()
        .with_context(|| format!("no data for dropped file {}", file.name))?;
    let media_type = if file.mime.is_empty() {
        media_type_from_name(&file.name).to_string()
    } else {
        file.mime.clone()
    };
    Ok(PaperFile::from_bytes(file.name.clone(), media_type, bytes))
}

/// ワーカースレッドで1回分の解析を実行
pub fn run_generation(config: &Config, ticket: &GenerateTicket) -> Result<AnalysisResult> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start runtime")?;
    let analyzer = Analyzer::new(GeminiClient::from_config(config))
        .strict_sections(config.strict_sections);
    let result = runtime.block_on(workflow::execute(ticket, &analyzer))?;
    Ok(result)
}

//! 論文解析
//!
//! PDFを1回のモデル呼び出しで解析し、AnalysisResult に変換する。
//! モデル呼び出しは ContentGenerator で差し替え可能（テストではフェイクを使う）。

mod gemini;
mod types;

pub use gemini::GeminiClient;
pub use types::{GenerateContentRequest, GenerateContentResponse, InlineData, Part};

use crate::error::{Result, ScholarError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use scholar_pulse_common::{build_request, parse_analysis_response, AnalysisResult, SectionSet};
use std::future::Future;
use tracing::{debug, info};

/// generateContent 相当の呼び出し口
///
/// 成功時はモデルが返したテキスト（無ければ None）を返す。
pub trait ContentGenerator {
    fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}

pub struct Analyzer<G> {
    generator: G,
    strict_sections: bool,
}

impl<G: ContentGenerator> Analyzer<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            strict_sections: false,
        }
    }

    /// 未選択セクションをローカルでも除去する
    pub fn strict_sections(mut self, strict: bool) -> Self {
        self.strict_sections = strict;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// 論文を解析
    ///
    /// # Arguments
    /// * `bytes` - ファイル内容
    /// * `mime_type` - ファイルのメディアタイプ
    /// * `selection` - 生成するセクション
    pub async fn analyze(
        &self,
        bytes: &[u8],
        mime_type: &str,
        selection: &SectionSet,
    ) -> Result<AnalysisResult> {
        let request = build_request(selection);
        let body = GenerateContentRequest::with_file(
            mime_type,
            STANDARD.encode(bytes),
            request.instruction,
            request.schema,
        );

        info!(sections = %selection.joined(), bytes = bytes.len(), "requesting analysis");
        let text = self
            .generator
            .generate(&body)
            .await?
            .filter(|text| !text.trim().is_empty())
            .ok_or(ScholarError::EmptyResponse)?;
        debug!(chars = text.len(), "received analysis text");

        let mut result = parse_analysis_response(&text)
            .map_err(|e| ScholarError::MalformedResponse(e.to_string()))?;

        if self.strict_sections {
            result.retain_sections(selection);
        }
        Ok(result)
    }
}

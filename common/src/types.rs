//! 解析結果の型定義
//!
//! CLIとデスクトップで共有される型:
//! - AnalysisResult: 1回の解析の構造化出力（全フィールド省略可）
//! - PaperFile: アップロードされた論文ファイルへの参照
//! - PaperMetadata: 表示用のファイル情報

use crate::sections::{SectionId, SectionSet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// AI解析結果
///
/// `null` と欠落はどちらも `None` になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanations: Option<Explanations>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_applications: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strengths_and_limitations: Option<StrengthsAndLimitations>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creative_extensions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summaries: Option<Summaries>,
}

/// 読者別の解説
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Explanations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_expert: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_student: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_colleague: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrengthsAndLimitations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limitations: Option<Vec<String>>,
}

/// SNS向け要約
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Summaries {
    /// 280文字目安（パース時には検証しない）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<Vec<String>>,
}

impl AnalysisResult {
    /// 選択されていないセクションのフィールドを落とす
    ///
    /// モデルは未選択セクションを空で返すよう指示されているだけなので、
    /// 厳密モードではこれで保証する。
    pub fn retain_sections(&mut self, selection: &SectionSet) {
        if !selection.contains(SectionId::Keywords) {
            self.keywords = None;
        }
        if let Some(explanations) = self.explanations.as_mut() {
            if !selection.contains(SectionId::NonExpert) {
                explanations.non_expert = None;
            }
            if !selection.contains(SectionId::UniversityStudent) {
                explanations.university_student = None;
            }
            if !selection.contains(SectionId::ProfessionalColleague) {
                explanations.professional_colleague = None;
            }
            if *explanations == Explanations::default() {
                self.explanations = None;
            }
        }
        if !selection.contains(SectionId::PotentialApplications) {
            self.potential_applications = None;
        }
        if !selection.contains(SectionId::StrengthsAndLimitations) {
            self.strengths_and_limitations = None;
        }
        if !selection.contains(SectionId::CreativeExtensions) {
            self.creative_extensions = None;
        }
        if !selection.contains(SectionId::Summaries) {
            self.summaries = None;
        }
    }
}

/// PDFとして受け付けるメディアタイプ
pub const PDF_MEDIA_TYPES: &[&str] = &["application/pdf", "application/x-pdf"];

/// 推奨最大ファイルサイズ（案内のみ、強制しない）
pub const RECOMMENDED_MAX_BYTES: u64 = 20 * 1024 * 1024;

/// メディアタイプがPDFか判定（パラメータ部と大文字小文字は無視）
pub fn is_pdf_media_type(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    PDF_MEDIA_TYPES
        .iter()
        .any(|pdf| pdf.eq_ignore_ascii_case(essence))
}

/// ファイル名の拡張子からメディアタイプを推定
pub fn media_type_from_name(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// ファイル本体の所在
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaperSource {
    /// ディスク上のファイル（生成開始時に読み込む）
    Path(PathBuf),
    /// 既に読み込まれたバイト列（ドロップ等）
    Memory(Arc<[u8]>),
}

/// アップロードされた論文ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperFile {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub source: PaperSource,
}

impl PaperFile {
    pub fn from_path(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let media_type = media_type_from_name(&name).to_string();
        Self {
            name,
            media_type,
            size,
            source: PaperSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            source: PaperSource::Memory(bytes),
        }
    }

    pub fn is_pdf(&self) -> bool {
        is_pdf_media_type(&self.media_type)
    }

    /// 推奨サイズ（20MB）を超えているか
    pub fn exceeds_recommended_size(&self) -> bool {
        self.size > RECOMMENDED_MAX_BYTES
    }

    pub fn metadata(&self) -> PaperMetadata {
        PaperMetadata {
            name: self.name.clone(),
            size: format_size(self.size),
            media_type: self.media_type.clone(),
        }
    }
}

/// 表示用ファイル情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperMetadata {
    pub name: String,
    pub size: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// バイト数を "1.4 MB" 形式に整形
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

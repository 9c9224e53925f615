//! APIレスポンスパーサー
//!
//! 構造化出力を指定しているので、モデルの本文はそのまま AnalysisResult のJSON。
//! 前後の文章や配列で包まれた応答はスキーマ違反として扱う。

use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// 解析レスポンスをパース
///
/// # Examples
/// ```
/// use scholar_pulse_common::parse_analysis_response;
///
/// let result = parse_analysis_response(r#"{"keywords": ["a"]}"#).unwrap();
/// assert_eq!(result.keywords, Some(vec!["a".to_string()]));
/// assert!(parse_analysis_response(r#"Sure: {"keywords": ["a"]}"#).is_err());
/// ```
///
/// # Returns
/// * `Ok(AnalysisResult)` - パース成功
/// * `Err(Error::Json)` - JSONでない、または形が合わない（serdeのエラー内容を含む）
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult> {
    serde_json::from_str::<AnalysisResult>(response.trim()).map_err(Error::Json)
}

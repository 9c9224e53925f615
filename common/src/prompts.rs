//! プロンプト生成モジュール
//!
//! CLIとデスクトップで共有される解析リクエスト生成ロジック:
//! - build_instruction: 選択セクションだけを指名する指示文
//! - build_request: 指示文 + レスポンススキーマ

use crate::schema::response_schema;
use crate::sections::SectionSet;
use serde_json::Value;

/// 指示文の冒頭
const PREAMBLE: &str = "You are an expert scientific communicator. Analyze the provided scientific paper.";

/// 解析リクエスト（モデル非依存）
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub instruction: String,
    pub schema: Value,
}

/// 指示文を生成
///
/// # Arguments
/// * `selection` - 選択セクション（空でないこと。呼び出し側で保証）
///
/// # Returns
/// 選択セクションのIDとガイダンスだけを含む指示文
pub fn build_instruction(selection: &SectionSet) -> String {
    let sections_text = selection.joined();

    let guidance = selection
        .iter()
        .map(|id| {
            let spec = id.spec();
            format!(
                "- {} (field `{}`): {}",
                id,
                spec.field_path.join("."),
                spec.guidance
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"{PREAMBLE}
ONLY generate the following sections as requested: {sections_text}.

Instructions for sections:
{guidance}

IMPORTANT: If a section is not in the list [{sections_text}], return null or an empty structure for that specific field in the JSON. Output the results in strict JSON format."#
    )
}

/// 指示文とスキーマをまとめて生成
pub fn build_request(selection: &SectionSet) -> AnalysisRequest {
    AnalysisRequest {
        instruction: build_instruction(selection),
        schema: response_schema(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::declares_field;
    use crate::sections::{catalog, SectionId};

    /// 8セクションの空でない部分集合すべて
    fn all_non_empty_subsets() -> Vec<SectionSet> {
        (1u16..256)
            .map(|mask| {
                SectionId::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, id)| id)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_instruction_names_exactly_selected_sections() {
        let subsets = all_non_empty_subsets();
        assert_eq!(subsets.len(), 255);

        for selection in subsets {
            let request = build_request(&selection);
            for id in SectionId::ALL {
                assert_eq!(
                    request.instruction.contains(id.as_str()),
                    selection.contains(id),
                    "section {} for selection [{}]",
                    id,
                    selection.joined()
                );
            }
            for spec in catalog() {
                assert!(declares_field(&request.schema, spec.field_path));
            }
        }
    }

    #[test]
    fn test_schema_does_not_vary_with_selection() {
        let one: SectionSet = [SectionId::Keywords].into_iter().collect();
        assert_eq!(build_request(&one).schema, build_request(&SectionSet::all()).schema);
    }

    #[test]
    fn test_instruction_contains_guidance() {
        let selection: SectionSet = [SectionId::Keywords, SectionId::Summaries].into_iter().collect();
        let instruction = build_instruction(&selection);
        assert!(instruction.starts_with(PREAMBLE));
        assert!(instruction.contains("ONLY generate the following sections as requested: keywords, summaries."));
        assert!(instruction.contains("- keywords (field `keywords`): 8-12 items."));
        assert!(instruction.contains("5-7 bullet points"));
        assert!(!instruction.contains("2-3 future research directions"));
        assert!(instruction.contains("[keywords, summaries]"));
        assert!(instruction.contains("strict JSON"));
    }

    #[test]
    fn test_instruction_nested_field_path() {
        let selection: SectionSet = [SectionId::ProfessionalColleague].into_iter().collect();
        let instruction = build_instruction(&selection);
        assert!(instruction.contains("field `explanations.professionalColleague`"));
    }
}

//! レスポンススキーマ
//!
//! Gemini の `responseSchema`（OpenAPIサブセット）で AnalysisResult 全体を宣言する。
//! 選択セクションによってスキーマは変えない。

use serde_json::{json, Value};

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

/// AnalysisResult 全体のスキーマ
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "keywords": string_array(),
            "explanations": {
                "type": "OBJECT",
                "properties": {
                    "nonExpert": { "type": "STRING" },
                    "universityStudent": { "type": "STRING" },
                    "professionalColleague": { "type": "STRING" }
                }
            },
            "potentialApplications": string_array(),
            "strengthsAndLimitations": {
                "type": "OBJECT",
                "properties": {
                    "strengths": string_array(),
                    "limitations": string_array()
                }
            },
            "creativeExtensions": string_array(),
            "summaries": {
                "type": "OBJECT",
                "properties": {
                    "tweet": { "type": "STRING" },
                    "bulletPoints": string_array()
                }
            }
        }
    })
}

/// フィールドパスがスキーマ上で宣言されているか
pub fn declares_field(schema: &Value, path: &[&str]) -> bool {
    let mut node = schema;
    for key in path {
        match node.get("properties").and_then(|props| props.get(*key)) {
            Some(next) => node = next,
            None => return false,
        }
    }
    !path.is_empty()
}

//! 解析結果レポート
//!
//! AnalysisResult を表示用のセクション列に変換する。
//! 値が無い・空のフィールドはセクションごと省略し、空のセクションは作らない。
//! 項目の並びはモデルが返した順のまま。

use crate::types::AnalysisResult;
use serde::Serialize;

/// ツイート要約の目安文字数
pub const TWEET_CHAR_LIMIT: usize = 280;

/// レポート見出し
pub const REPORT_TITLE: &str = "Research Impact Profile";

/// 解説の対象読者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Audience {
    NonExpert,
    UniversityStudent,
    ProfessionalColleague,
}

impl Audience {
    pub fn title(self) -> &'static str {
        match self {
            Audience::NonExpert => "For Family & Friends",
            Audience::UniversityStudent => "For University Students",
            Audience::ProfessionalColleague => "Professional Summary",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Audience::NonExpert => "Accessible core idea",
            Audience::UniversityStudent => "Academic undergraduate perspective",
            Audience::ProfessionalColleague => "Technical peer synthesis",
        }
    }
}

/// レポートの1セクション
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportSection {
    Keywords { items: Vec<String> },
    Explanation { audience: Audience, text: String },
    Tweet { text: String, char_count: usize, limit: usize },
    BulletPoints { items: Vec<String> },
    CreativeExtensions { items: Vec<String> },
    Strengths { items: Vec<String> },
    Limitations { items: Vec<String> },
    Applications { items: Vec<String> },
}

impl ReportSection {
    /// セクション見出し
    pub fn heading(&self) -> &'static str {
        match self {
            ReportSection::Keywords { .. } => "Key Research Phrases",
            ReportSection::Explanation { audience, .. } => audience.title(),
            ReportSection::Tweet { .. } => "Social Snapshot",
            ReportSection::BulletPoints { .. } => "Core Takeaways",
            ReportSection::CreativeExtensions { .. } => "Future Frontiers",
            ReportSection::Strengths { .. } => "Research Strengths",
            ReportSection::Limitations { .. } => "Identified Constraints",
            ReportSection::Applications { .. } => "Impact Pathways",
        }
    }
}

/// "5 / 280 chars" 形式の文字数表示
pub fn char_count_label(char_count: usize, limit: usize) -> String {
    format!("{} / {} chars", char_count, limit)
}

/// 表示用レポート
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: &'static str,
    pub paper_name: String,
    pub sections: Vec<ReportSection>,
}

fn present_text(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .filter(|text| !text.trim().is_empty())
        .cloned()
}

fn present_list(value: &Option<Vec<String>>) -> Option<Vec<String>> {
    value.as_ref().filter(|items| !items.is_empty()).cloned()
}

impl Report {
    /// AnalysisResult からレポートを組み立てる
    pub fn from_result(result: &AnalysisResult, paper_name: &str) -> Self {
        let mut sections = Vec::new();

        if let Some(items) = present_list(&result.keywords) {
            sections.push(ReportSection::Keywords { items });
        }

        if let Some(explanations) = &result.explanations {
            let by_audience = [
                (Audience::NonExpert, &explanations.non_expert),
                (Audience::UniversityStudent, &explanations.university_student),
                (Audience::ProfessionalColleague, &explanations.professional_colleague),
            ];
            for (audience, text) in by_audience {
                if let Some(text) = present_text(text) {
                    sections.push(ReportSection::Explanation { audience, text });
                }
            }
        }

        if let Some(summaries) = &result.summaries {
            if let Some(text) = present_text(&summaries.tweet) {
                let char_count = text.chars().count();
                sections.push(ReportSection::Tweet {
                    text,
                    char_count,
                    limit: TWEET_CHAR_LIMIT,
                });
            }
            if let Some(items) = present_list(&summaries.bullet_points) {
                sections.push(ReportSection::BulletPoints { items });
            }
        }

        if let Some(items) = present_list(&result.creative_extensions) {
            sections.push(ReportSection::CreativeExtensions { items });
        }

        if let Some(sl) = &result.strengths_and_limitations {
            if let Some(items) = present_list(&sl.strengths) {
                sections.push(ReportSection::Strengths { items });
            }
            if let Some(items) = present_list(&sl.limitations) {
                sections.push(ReportSection::Limitations { items });
            }
        }

        if let Some(items) = present_list(&result.potential_applications) {
            sections.push(ReportSection::Applications { items });
        }

        Self {
            title: REPORT_TITLE,
            paper_name: if paper_name.trim().is_empty() {
                "Paper".to_string()
            } else {
                paper_name.to_string()
            },
            sections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, heading: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.heading() == heading)
    }
}

//! 出力セクションカタログ
//!
//! ユーザーが選択できる8つの出力セクションと、その表示名・説明・
//! 生成ガイダンス・対応するJSONフィールドを静的テーブルとして持つ。
//! セクションの追加はテーブルの変更だけで済むようにしている。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// 出力セクションID
///
/// 宣言順がカタログの表示順（`Ord`もこの順）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionId {
    Keywords,
    NonExpert,
    UniversityStudent,
    ProfessionalColleague,
    PotentialApplications,
    StrengthsAndLimitations,
    CreativeExtensions,
    Summaries,
}

/// カタログの1エントリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub id: SectionId,
    /// 選択画面の表示名
    pub label: &'static str,
    /// 選択画面の補足説明
    pub description: &'static str,
    /// プロンプトに埋め込む生成ガイダンス
    pub guidance: &'static str,
    /// レスポンスJSON内のフィールドパス
    pub field_path: &'static [&'static str],
}

/// セクションカタログ（表示順）
pub const SECTION_CATALOG: [SectionSpec; 8] = [
    SectionSpec {
        id: SectionId::Keywords,
        label: "Keywords",
        description: "Core research phrases",
        guidance: "8-12 items.",
        field_path: &["keywords"],
    },
    SectionSpec {
        id: SectionId::NonExpert,
        label: "Non-Expert Explanation",
        description: "For family and friends",
        guidance: "Simple explanation for family/friends.",
        field_path: &["explanations", "nonExpert"],
    },
    SectionSpec {
        id: SectionId::UniversityStudent,
        label: "Student Explanation",
        description: "For university students",
        guidance: "Academic undergraduate level.",
        field_path: &["explanations", "universityStudent"],
    },
    SectionSpec {
        id: SectionId::ProfessionalColleague,
        label: "Technical Explanation",
        description: "For professional colleagues",
        guidance: "Technical peer summary.",
        field_path: &["explanations", "professionalColleague"],
    },
    SectionSpec {
        id: SectionId::PotentialApplications,
        label: "Potential Applications",
        description: "Real-world impact",
        guidance: "Real-world applications.",
        field_path: &["potentialApplications"],
    },
    SectionSpec {
        id: SectionId::StrengthsAndLimitations,
        label: "Strengths & Limitations",
        description: "Critical analysis",
        guidance: "Study strengths and limitations.",
        field_path: &["strengthsAndLimitations"],
    },
    SectionSpec {
        id: SectionId::CreativeExtensions,
        label: "Creative Extensions",
        description: "Future directions",
        guidance: "2-3 future research directions.",
        field_path: &["creativeExtensions"],
    },
    SectionSpec {
        id: SectionId::Summaries,
        label: "Summaries",
        description: "Tweet & bullet points",
        guidance: "Tweet-length (< 280 chars) and 5-7 bullet points.",
        field_path: &["summaries"],
    },
];

/// カタログ全体を表示順で返す
pub fn catalog() -> &'static [SectionSpec] {
    &SECTION_CATALOG
}

impl SectionId {
    /// 全セクション（表示順）
    pub const ALL: [SectionId; 8] = [
        SectionId::Keywords,
        SectionId::NonExpert,
        SectionId::UniversityStudent,
        SectionId::ProfessionalColleague,
        SectionId::PotentialApplications,
        SectionId::StrengthsAndLimitations,
        SectionId::CreativeExtensions,
        SectionId::Summaries,
    ];

    /// カタログエントリを取得
    pub fn spec(self) -> &'static SectionSpec {
        // カタログはALLと同じ順で並んでいる
        &SECTION_CATALOG[self as usize]
    }

    /// 文字列タグ（プロンプトやCLI引数で使う形）
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Keywords => "keywords",
            SectionId::NonExpert => "nonExpert",
            SectionId::UniversityStudent => "universityStudent",
            SectionId::ProfessionalColleague => "professionalColleague",
            SectionId::PotentialApplications => "potentialApplications",
            SectionId::StrengthsAndLimitations => "strengthsAndLimitations",
            SectionId::CreativeExtensions => "creativeExtensions",
            SectionId::Summaries => "summaries",
        }
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownSection(wanted.to_string()))
    }
}

/// 選択中のセクション集合
///
/// 反復は常にカタログ順。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionSet(BTreeSet<SectionId>);

impl SectionSet {
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// 全セクション選択済み（初期状態）
    pub fn all() -> Self {
        Self(SectionId::ALL.into_iter().collect())
    }

    pub fn contains(&self, id: SectionId) -> bool {
        self.0.contains(&id)
    }

    /// 未選択なら追加、選択済みなら削除
    pub fn toggle(&mut self, id: SectionId) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    pub fn insert(&mut self, id: SectionId) -> bool {
        self.0.insert(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.0.iter().copied()
    }

    /// "keywords, summaries" 形式の一覧
    pub fn joined(&self) -> String {
        self.iter().map(SectionId::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl Default for SectionSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<SectionId> for SectionSet {
    fn from_iter<I: IntoIterator<Item = SectionId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

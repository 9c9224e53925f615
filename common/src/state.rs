//! 解析セッションの状態機械
//!
//! 画面の状態（ファイル・選択・結果・エラー・処理中）を1つの列挙型で持つ。
//! 「ファイル無しで生成中」のような組み合わせは型で表現できない。
//!
//! 遷移:
//! Idle → FileSelected → Generating → Resulted → (reset) Idle
//! Generating の失敗は error 付きで FileSelected に戻る。

use crate::sections::{SectionId, SectionSet};
use crate::types::{AnalysisResult, PaperFile};
use thiserror::Error;

/// エラーメッセージが空だった場合の表示
pub const GENERIC_ANALYSIS_ERROR: &str = "An error occurred while analyzing the paper.";

/// 現在のフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FileSelected,
    Generating,
    Resulted,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::FileSelected => "file-selected",
            Phase::Generating => "generating",
            Phase::Resulted => "resulted",
        }
    }
}

/// 遷移の拒否理由（拒否時は状態を変えない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Please upload a PDF file. \"{name}\" is {media_type}.")]
    InvalidFileType { name: String, media_type: String },

    #[error("Please select at least one section.")]
    EmptySelection,

    #[error("Please select a PDF file first.")]
    NoFile,

    #[error("An analysis is already in progress.")]
    Busy,

    #[error("\"{action}\" is not available while {phase}.")]
    NotAllowed { action: &'static str, phase: &'static str },
}

/// 生成処理に渡すスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateTicket {
    pub file: PaperFile,
    pub selection: SectionSet,
}

/// 解析セッション
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Idle {
        selection: SectionSet,
    },
    FileSelected {
        file: PaperFile,
        selection: SectionSet,
        error: Option<String>,
    },
    Generating {
        file: PaperFile,
        selection: SectionSet,
    },
    Resulted {
        file: PaperFile,
        selection: SectionSet,
        result: AnalysisResult,
    },
}

impl Default for Session {
    fn default() -> Self {
        Session::Idle {
            selection: SectionSet::default(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match self {
            Session::Idle { .. } => Phase::Idle,
            Session::FileSelected { .. } => Phase::FileSelected,
            Session::Generating { .. } => Phase::Generating,
            Session::Resulted { .. } => Phase::Resulted,
        }
    }

    pub fn file(&self) -> Option<&PaperFile> {
        match self {
            Session::Idle { .. } => None,
            Session::FileSelected { file, .. }
            | Session::Generating { file, .. }
            | Session::Resulted { file, .. } => Some(file),
        }
    }

    pub fn selection(&self) -> &SectionSet {
        match self {
            Session::Idle { selection }
            | Session::FileSelected { selection, .. }
            | Session::Generating { selection, .. }
            | Session::Resulted { selection, .. } => selection,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Session::Resulted { result, .. } => Some(result),
            _ => None,
        }
    }

    /// 直前の生成失敗メッセージ
    pub fn error(&self) -> Option<&str> {
        match self {
            Session::FileSelected { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.phase() == Phase::Generating
    }

    /// 生成ボタンを押せる状態か
    pub fn can_generate(&self) -> bool {
        matches!(self, Session::FileSelected { selection, .. } if !selection.is_empty())
    }

    fn not_allowed(&self, action: &'static str) -> Rejection {
        Rejection::NotAllowed {
            action,
            phase: self.phase().as_str(),
        }
    }

    /// ファイルを選択（既存ファイルは置き換え）
    pub fn select_file(&mut self, file: PaperFile) -> Result<(), Rejection> {
        if self.is_generating() {
            return Err(Rejection::Busy);
        }
        if !file.is_pdf() {
            return Err(Rejection::InvalidFileType {
                name: file.name,
                media_type: if file.media_type.is_empty() {
                    "of an unknown type".to_string()
                } else {
                    file.media_type
                },
            });
        }
        let selection = match self {
            Session::Idle { selection } | Session::FileSelected { selection, .. } => {
                std::mem::replace(selection, SectionSet::empty())
            }
            _ => return Err(self.not_allowed("select file")),
        };
        *self = Session::FileSelected {
            file,
            selection,
            error: None,
        };
        Ok(())
    }

    /// ファイルを外す（選択セクションは保持）
    pub fn remove_file(&mut self) -> Result<(), Rejection> {
        match self {
            Session::FileSelected { selection, .. } => {
                let selection = std::mem::replace(selection, SectionSet::empty());
                *self = Session::Idle { selection };
                Ok(())
            }
            Session::Generating { .. } => Err(Rejection::Busy),
            _ => Err(self.not_allowed("remove file")),
        }
    }

    pub fn toggle_section(&mut self, id: SectionId) -> Result<(), Rejection> {
        match self {
            Session::FileSelected { selection, .. } => {
                selection.toggle(id);
                Ok(())
            }
            Session::Generating { .. } => Err(Rejection::Busy),
            _ => Err(self.not_allowed("toggle section")),
        }
    }

    /// 生成開始
    ///
    /// 成功すると Generating に遷移し、非同期処理用のチケットを返す。
    pub fn begin_generate(&mut self) -> Result<GenerateTicket, Rejection> {
        match self {
            Session::Idle { .. } => Err(Rejection::NoFile),
            Session::Generating { .. } => Err(Rejection::Busy),
            Session::Resulted { .. } => Err(self.not_allowed("generate")),
            Session::FileSelected { selection, .. } if selection.is_empty() => {
                Err(Rejection::EmptySelection)
            }
            Session::FileSelected { file, selection, .. } => {
                let ticket = GenerateTicket {
                    file: file.clone(),
                    selection: selection.clone(),
                };
                *self = Session::Generating {
                    file: ticket.file.clone(),
                    selection: ticket.selection.clone(),
                };
                Ok(ticket)
            }
        }
    }

    /// 生成完了を反映
    ///
    /// 失敗時はファイルと選択を保持したまま FileSelected に戻る。
    pub fn finish_generate(
        &mut self,
        outcome: Result<AnalysisResult, String>,
    ) -> Result<(), Rejection> {
        let Session::Generating { file, selection } = self else {
            return Err(self.not_allowed("finish generation"));
        };
        let file = file.clone();
        let selection = std::mem::replace(selection, SectionSet::empty());
        *self = match outcome {
            Ok(result) => Session::Resulted {
                file,
                selection,
                result,
            },
            Err(message) => {
                let message = if message.trim().is_empty() {
                    GENERIC_ANALYSIS_ERROR.to_string()
                } else {
                    message
                };
                Session::FileSelected {
                    file,
                    selection,
                    error: Some(message),
                }
            }
        };
        Ok(())
    }

    /// 新しい解析（全状態を初期化）
    pub fn reset(&mut self) -> Result<(), Rejection> {
        match self {
            Session::Resulted { .. } => {
                *self = Session::default();
                Ok(())
            }
            _ => Err(self.not_allowed("new analysis")),
        }
    }
}

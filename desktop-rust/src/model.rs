use std::time::Instant;

use scholar_pulse_common::status::loading_message;
use scholar_pulse_common::{AnalysisResult, GenerateTicket, PaperFile, SectionId, Session};

/// 画面の状態（Session + 画面だけで使う通知）
#[derive(Debug, Default)]
pub struct AppState {
    pub session: Session,
    /// 受け付けなかった操作の理由（ファイル形式・未選択など）
    pub notice: Option<String>,
    pub generating_since: Option<Instant>,
}

impl AppState {
    pub fn offer_file(&mut self, file: PaperFile) {
        self.notice = match self.session.select_file(file) {
            Ok(()) => None,
            Err(rejection) => Some(rejection.to_string()),
        };
    }

    pub fn remove_file(&mut self) {
        if let Err(rejection) = self.session.remove_file() {
            self.notice = Some(rejection.to_string());
        }
    }

    pub fn toggle(&mut self, id: SectionId) {
        match self.session.toggle_section(id) {
            Ok(()) => self.notice = None,
            Err(rejection) => self.notice = Some(rejection.to_string()),
        }
    }

    /// 生成開始。受け付けられなければ None
    pub fn begin(&mut self) -> Option<GenerateTicket> {
        match self.session.begin_generate() {
            Ok(ticket) => {
                self.notice = None;
                self.generating_since = Some(Instant::now());
                Some(ticket)
            }
            Err(rejection) => {
                self.notice = Some(rejection.to_string());
                None
            }
        }
    }

    pub fn finish(&mut self, outcome: Result<AnalysisResult, String>) {
        self.generating_since = None;
        if let Err(rejection) = self.session.finish_generate(outcome) {
            self.notice = Some(rejection.to_string());
        }
    }

    pub fn new_analysis(&mut self) {
        match self.session.reset() {
            Ok(()) => {
                self.notice = None;
                self.generating_since = None;
            }
            Err(rejection) => self.notice = Some(rejection.to_string()),
        }
    }

    /// 生成中に表示するメッセージ
    pub fn loading_message(&self) -> &'static str {
        let elapsed = self
            .generating_since
            .map(|since| since.elapsed().as_millis())
            .unwrap_or(0);
        loading_message(elapsed)
    }

    /// 表示するエラー（解析失敗を優先）
    pub fn visible_error(&self) -> Option<&str> {
        self.session.error().or(self.notice.as_deref())
    }
}

//! 生成処理の駆動
//!
//! Session の begin_generate / finish_generate の間で、ファイル読み込みと
//! モデル呼び出しを1回だけ行う。

use crate::analyzer::{Analyzer, ContentGenerator};
use crate::error::Result;
use crate::paper::read_paper;
use scholar_pulse_common::{AnalysisResult, GenerateTicket, SectionId, SectionSet, Session};
use tracing::{info, warn};

/// チケットの内容で解析する
///
/// 読み込みに失敗した場合はモデルを呼ばない。
pub async fn execute<G: ContentGenerator>(
    ticket: &GenerateTicket,
    analyzer: &Analyzer<G>,
) -> Result<AnalysisResult> {
    let bytes = read_paper(&ticket.file).await?;
    analyzer
        .analyze(&bytes, &ticket.file.media_type, &ticket.selection)
        .await
}

/// セッションを1回分進める
///
/// 成功すれば Resulted、失敗すれば FileSelected（エラー付き）になる。
/// 失敗時はセッションに記録した上で元のエラーも返す。
pub async fn generate<G: ContentGenerator>(
    session: &mut Session,
    analyzer: &Analyzer<G>,
) -> Result<()> {
    let ticket = session.begin_generate()?;
    info!(file = %ticket.file.name, sections = %ticket.selection.joined(), "generation started");

    match execute(&ticket, analyzer).await {
        Ok(result) => {
            session.finish_generate(Ok(result))?;
            info!("generation finished");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "generation failed");
            session.finish_generate(Err(e.to_string()))?;
            Err(e)
        }
    }
}

/// 選択セクションを `desired` に揃える（差分だけトグルする）
pub fn apply_selection(session: &mut Session, desired: &SectionSet) -> Result<()> {
    for id in SectionId::ALL {
        if session.selection().contains(id) != desired.contains(id) {
            session.toggle_section(id)?;
        }
    }
    Ok(())
}

//! 対話モード
//!
//! Session の状態ごとにメニューを出し、ファイル選択・セクション選択・生成・
//! 結果表示・新しい解析を端末上で行う。

use crate::analyzer::{Analyzer, ContentGenerator};
use crate::error::{Result, ScholarError};
use crate::paper::open_paper;
use crate::progress::with_loading_messages;
use crate::render::{render, OutputFormat};
use crate::workflow::{apply_selection, generate};
use dialoguer::{Input, MultiSelect, Select};
use scholar_pulse_common::status::{APP_NAME, APP_TAGLINE, FEATURE_BLURBS, UPLOAD_GUIDANCE};
use scholar_pulse_common::types::format_size;
use scholar_pulse_common::{catalog, Phase, SectionId, SectionSet, Session};
use std::path::Path;
use tracing::warn;

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Generate,
    ChooseSections,
    ReplaceFile,
    RemoveFile,
    ShowText,
    ShowMarkdown,
    ShowJson,
    NewAnalysis,
    Quit,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Generate => "Generate analysis",
            MenuAction::ChooseSections => "Choose sections",
            MenuAction::ReplaceFile => "Replace file",
            MenuAction::RemoveFile => "Remove file",
            MenuAction::ShowText => "Show report",
            MenuAction::ShowMarkdown => "Show as Markdown",
            MenuAction::ShowJson => "Show as JSON",
            MenuAction::NewAnalysis => "New analysis",
            MenuAction::Quit => "Quit",
        }
    }
}

/// フェーズごとのメニュー（Idle・Generating は入力待ち/処理中のため空）
pub fn menu_for(phase: Phase) -> Vec<MenuAction> {
    match phase {
        Phase::FileSelected => vec![
            MenuAction::Generate,
            MenuAction::ChooseSections,
            MenuAction::ReplaceFile,
            MenuAction::RemoveFile,
            MenuAction::Quit,
        ],
        Phase::Resulted => vec![
            MenuAction::NewAnalysis,
            MenuAction::ShowText,
            MenuAction::ShowMarkdown,
            MenuAction::ShowJson,
            MenuAction::Quit,
        ],
        Phase::Idle | Phase::Generating => Vec::new(),
    }
}

/// MultiSelect の初期チェック状態
pub fn selection_defaults(selection: &SectionSet) -> Vec<bool> {
    SectionId::ALL.iter().map(|id| selection.contains(*id)).collect()
}

/// MultiSelect の結果（カタログ順インデックス）を SectionSet にする
pub fn selection_from_indices(indices: &[usize]) -> SectionSet {
    indices
        .iter()
        .filter_map(|&i| SectionId::ALL.get(i).copied())
        .collect()
}

fn print_banner() {
    println!("🎓 {}\n", APP_NAME);
    println!("{}\n", APP_TAGLINE);
    for (title, body) in FEATURE_BLURBS {
        println!("  • {}: {}", title, body);
    }
    println!();
}

async fn load_file(session: &mut Session, path: &Path) {
    let file = match open_paper(path).await {
        Ok(file) => file,
        Err(e) => {
            println!("✖ {}", e);
            return;
        }
    };
    if file.exceeds_recommended_size() {
        println!("⚠ {} is larger than 20MB; the service may reject it.", file.name);
    }
    if let Err(rejection) = session.select_file(file) {
        println!("✖ {}", rejection);
    }
}

fn print_file_summary(session: &Session) {
    if let Some(file) = session.file() {
        println!("\n📄 {} ({}, {})", file.name, format_size(file.size), file.media_type);
    }
    let chosen: Vec<&str> = session.selection().iter().map(SectionId::label).collect();
    if chosen.is_empty() {
        println!("   Sections: (none)");
    } else {
        println!("   Sections: {}", chosen.join(", "));
    }
    if let Some(error) = session.error() {
        println!("✖ {}", error);
    }
}

fn prompt_path() -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("Paper PDF path (empty to quit)")
        .allow_empty(true)
        .interact_text()?;
    let trimmed = input.trim();
    Ok(if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    })
}

fn choose_sections(session: &mut Session) -> Result<()> {
    let labels: Vec<String> = catalog()
        .iter()
        .map(|spec| format!("{} - {}", spec.label, spec.description))
        .collect();
    let indices = MultiSelect::new()
        .with_prompt("Select sections (space to toggle, enter to confirm)")
        .items(&labels[..])
        .defaults(&selection_defaults(session.selection())[..])
        .interact()?;
    let desired = selection_from_indices(&indices);
    if desired.is_empty() {
        println!("⚠ No sections selected; generation stays disabled until you pick one.");
    }
    apply_selection(session, &desired)
}

fn show_result(session: &Session, format: OutputFormat) -> Result<()> {
    if let (Some(result), Some(file)) = (session.result(), session.file()) {
        println!("\n{}", render(result, &file.name, format)?);
    }
    Ok(())
}

/// 対話モードを実行
pub async fn run_interactive<G: ContentGenerator>(
    initial: Option<&Path>,
    analyzer: &Analyzer<G>,
) -> Result<()> {
    let mut session = Session::new();
    print_banner();

    if let Some(path) = initial {
        load_file(&mut session, path).await;
    }

    loop {
        let phase = session.phase();
        if phase == Phase::Idle {
            println!("{}", UPLOAD_GUIDANCE);
            match prompt_path()? {
                Some(path) => load_file(&mut session, Path::new(&path)).await,
                None => break,
            }
            continue;
        }

        let actions = menu_for(phase);
        if actions.is_empty() {
            warn!(phase = phase.as_str(), "no actions available");
            break;
        }
        if phase == Phase::FileSelected {
            print_file_summary(&session);
        }

        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&labels[..])
            .default(0)
            .interact()?;

        match actions[choice] {
            MenuAction::Generate => {
                match with_loading_messages(generate(&mut session, analyzer)).await {
                    Ok(()) => show_result(&session, OutputFormat::Text)?,
                    Err(e @ (ScholarError::Rejected(_) | ScholarError::EmptySelection)) => {
                        println!("✖ {}", e)
                    }
                    // 失敗はセッションに記録済み（次のサマリーで表示）
                    Err(_) => {}
                }
            }
            MenuAction::ChooseSections => choose_sections(&mut session)?,
            MenuAction::ReplaceFile => {
                if let Some(path) = prompt_path()? {
                    load_file(&mut session, Path::new(&path)).await;
                }
            }
            MenuAction::RemoveFile => session.remove_file()?,
            MenuAction::ShowText => show_result(&session, OutputFormat::Text)?,
            MenuAction::ShowMarkdown => show_result(&session, OutputFormat::Markdown)?,
            MenuAction::ShowJson => show_result(&session, OutputFormat::Json)?,
            MenuAction::NewAnalysis => session.reset()?,
            MenuAction::Quit => break,
        }
    }

    println!("👋 Bye");
    Ok(())
}

//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use scholar_pulse::error::ScholarError;
use scholar_pulse::{paper, workflow};
use scholar_pulse_common::{PaperFile, Rejection, SectionSet, Session};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを開いた場合
#[tokio::test]
async fn test_open_nonexistent_paper() {
    let result = paper::open_paper(Path::new("/nonexistent/path/12345.pdf")).await;
    assert!(matches!(result, Err(ScholarError::FileNotFound(_))));
}

/// PDF以外のファイルはセッションに受け付けられない
#[tokio::test]
async fn test_non_pdf_is_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.docx");
    std::fs::write(&path, "hello").unwrap();

    let file = paper::open_paper(&path).await.unwrap();
    let mut session = Session::new();
    let rejection = session.select_file(file).unwrap_err();
    assert!(matches!(rejection, Rejection::InvalidFileType { .. }));
    assert!(session.file().is_none());

    let err: ScholarError = rejection.into();
    assert!(matches!(err, ScholarError::InvalidFileType { .. }));
    assert!(err.to_string().contains("notes.docx"));
}

/// 全セクションを外すと生成できない
#[test]
fn test_empty_selection_blocks_generation() {
    let mut session = Session::new();
    session
        .select_file(PaperFile::from_path("/papers/a.pdf", 100))
        .unwrap();
    workflow::apply_selection(&mut session, &SectionSet::empty()).unwrap();

    assert!(!session.can_generate());
    assert_eq!(session.begin_generate().unwrap_err(), Rejection::EmptySelection);
}

/// ScholarErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ScholarError::Config("bad config".to_string()),
        ScholarError::FileNotFound("paper.pdf".to_string()),
        ScholarError::FileRead("paper.pdf: permission denied".to_string()),
        ScholarError::InvalidFileType {
            name: "a.txt".to_string(),
            media_type: "text/plain".to_string(),
        },
        ScholarError::EmptySelection,
        ScholarError::EmptyResponse,
        ScholarError::MalformedResponse("expected value".to_string()),
        ScholarError::Service("quota exceeded".to_string()),
        ScholarError::Prompt("not a terminal".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Error display should not be empty");
    }
}

/// サービスのメッセージはそのまま表示される
#[test]
fn test_service_message_verbatim() {
    let err = ScholarError::Service("API key not valid. Please pass a valid API key.".into());
    assert_eq!(err.to_string(), "API key not valid. Please pass a valid API key.");
}

/// 共通クレートのエラーは透過的に変換される
#[test]
fn test_common_error_conversion() {
    let common = "abstract".parse::<scholar_pulse_common::SectionId>().unwrap_err();
    let err: ScholarError = common.into();
    assert_eq!(err.to_string(), "Unknown section: abstract");
}

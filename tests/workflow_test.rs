//! 生成フローの統合テスト（モデル呼び出しはフェイク）

use scholar_pulse::analyzer::{Analyzer, ContentGenerator, GenerateContentRequest};
use scholar_pulse::error::{Result, ScholarError};
use scholar_pulse::workflow;
use scholar_pulse_common::{Phase, PaperFile, Rejection, SectionId, SectionSet, Session};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

/// 呼び出し回数を数え、応答を順に返す
struct ScriptedGenerator {
    calls: AtomicUsize,
    replies: Vec<std::result::Result<Option<String>, String>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<std::result::Result<Option<String>, String>>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            replies,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ContentGenerator for ScriptedGenerator {
    async fn generate(&self, _request: &GenerateContentRequest) -> Result<Option<String>> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(index) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(ScholarError::Service(message.clone())),
            None => Err(ScholarError::Service("no scripted reply".into())),
        }
    }
}

const KEYWORDS_REPLY: &str =
    r#"{"keywords": ["a","b"], "summaries": {"tweet": "short", "bulletPoints": []}}"#;

fn memory_pdf() -> PaperFile {
    PaperFile::from_bytes("paper.pdf", "application/pdf", Arc::from(&b"%PDF-1.4"[..]))
}

fn keywords_and_summaries() -> SectionSet {
    [SectionId::Keywords, SectionId::Summaries].into_iter().collect()
}

#[tokio::test]
async fn test_successful_generation() {
    let analyzer = Analyzer::new(ScriptedGenerator::new(vec![Ok(Some(KEYWORDS_REPLY.into()))]));
    let mut session = Session::new();
    session.select_file(memory_pdf()).unwrap();
    workflow::apply_selection(&mut session, &keywords_and_summaries()).unwrap();

    workflow::generate(&mut session, &analyzer).await.unwrap();

    assert_eq!(session.phase(), Phase::Resulted);
    let result = session.result().unwrap();
    assert_eq!(result.keywords, Some(vec!["a".to_string(), "b".to_string()]));
    assert_eq!(analyzer.generator().calls(), 1);
}

#[tokio::test]
async fn test_transport_fault_keeps_file_and_allows_retry() {
    let analyzer = Analyzer::new(ScriptedGenerator::new(vec![
        Err("connection reset".into()),
        Ok(Some(KEYWORDS_REPLY.into())),
    ]));
    let mut session = Session::new();
    session.select_file(memory_pdf()).unwrap();
    workflow::apply_selection(&mut session, &keywords_and_summaries()).unwrap();

    let err = workflow::generate(&mut session, &analyzer).await.unwrap_err();
    assert_eq!(err.to_string(), "connection reset");
    assert_eq!(session.phase(), Phase::FileSelected);
    assert_eq!(session.error(), Some("connection reset"));
    assert_eq!(session.file().unwrap().name, "paper.pdf");
    assert_eq!(session.selection(), &keywords_and_summaries());

    workflow::generate(&mut session, &analyzer).await.unwrap();
    assert_eq!(session.phase(), Phase::Resulted);
    assert_eq!(analyzer.generator().calls(), 2);
}

#[tokio::test]
async fn test_unreadable_file_never_calls_model() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vanishing.pdf");
    std::fs::write(&path, b"%PDF").unwrap();
    let file = scholar_pulse::paper::open_paper(&path).await.unwrap();
    std::fs::remove_file(&path).unwrap();

    let analyzer = Analyzer::new(ScriptedGenerator::new(vec![Ok(Some("{}".into()))]));
    let mut session = Session::new();
    session.select_file(file).unwrap();

    let err = workflow::generate(&mut session, &analyzer).await.unwrap_err();
    assert!(matches!(err, ScholarError::FileRead(_)));
    assert_eq!(analyzer.generator().calls(), 0);
    assert_eq!(session.phase(), Phase::FileSelected);
    assert!(session.error().unwrap().starts_with("Failed to read the file"));
}

#[tokio::test]
async fn test_empty_and_malformed_replies_become_errors() {
    let analyzer = Analyzer::new(ScriptedGenerator::new(vec![
        Ok(None),
        Ok(Some("I cannot help with that".into())),
    ]));
    let mut session = Session::new();
    session.select_file(memory_pdf()).unwrap();

    let err = workflow::generate(&mut session, &analyzer).await.unwrap_err();
    assert!(matches!(err, ScholarError::EmptyResponse));
    assert_eq!(session.phase(), Phase::FileSelected);

    let err = workflow::generate(&mut session, &analyzer).await.unwrap_err();
    assert!(matches!(err, ScholarError::MalformedResponse(_)));
    assert!(session.error().is_some());
}

#[tokio::test]
async fn test_generate_without_file_is_rejected() {
    let analyzer = Analyzer::new(ScriptedGenerator::new(vec![]));
    let mut session = Session::new();

    let err = workflow::generate(&mut session, &analyzer).await.unwrap_err();
    assert!(matches!(err, ScholarError::Rejected(Rejection::NoFile)));
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(analyzer.generator().calls(), 0);
}

#[tokio::test]
async fn test_new_analysis_after_result() {
    let analyzer = Analyzer::new(ScriptedGenerator::new(vec![Ok(Some(KEYWORDS_REPLY.into()))]));
    let mut session = Session::new();
    session.select_file(memory_pdf()).unwrap();
    session.toggle_section(SectionId::Keywords).unwrap();
    workflow::generate(&mut session, &analyzer).await.unwrap();

    session.reset().unwrap();
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.file().is_none());
    assert!(session.result().is_none());
    assert_eq!(session.selection(), &SectionSet::all());
}

#[test]
fn test_apply_selection_only_toggles_differences() {
    let mut session = Session::new();
    session.select_file(memory_pdf()).unwrap();
    let desired: SectionSet = [SectionId::NonExpert].into_iter().collect();
    workflow::apply_selection(&mut session, &desired).unwrap();
    assert_eq!(session.selection(), &desired);

    workflow::apply_selection(&mut session, &desired).unwrap();
    assert_eq!(session.selection(), &desired);
}

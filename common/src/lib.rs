//! ScholarPulse Common Library
//!
//! CLIとデスクトップで共有される型・プロンプト・セッション状態

pub mod error;
pub mod parser;
pub mod prompts;
pub mod report;
pub mod schema;
pub mod sections;
pub mod state;
pub mod status;
pub mod types;

pub use error::{Error, Result};
pub use parser::parse_analysis_response;
pub use prompts::{build_instruction, build_request, AnalysisRequest};
pub use report::{char_count_label, Report, ReportSection, TWEET_CHAR_LIMIT};
pub use schema::response_schema;
pub use sections::{catalog, SectionId, SectionSet, SectionSpec};
pub use state::{GenerateTicket, Phase, Rejection, Session};
pub use types::{AnalysisResult, PaperFile, PaperMetadata, PaperSource};

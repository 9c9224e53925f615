use scholar_pulse_common::Rejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScholarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read the file: {0}")]
    FileRead(String),

    #[error("Please upload a PDF file. \"{name}\" is {media_type}.")]
    InvalidFileType { name: String, media_type: String },

    #[error("Please select at least one section.")]
    EmptySelection,

    #[error("Failed to generate analysis: the model returned no text.")]
    EmptyResponse,

    #[error("The model returned a malformed analysis: {0}")]
    MalformedResponse(String),

    /// サービス側・通信のエラー（メッセージはそのまま表示）
    #[error("{0}")]
    Service(String),

    #[error("{0}")]
    Rejected(Rejection),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] scholar_pulse_common::Error),
}

impl From<Rejection> for ScholarError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::InvalidFileType { name, media_type } => {
                ScholarError::InvalidFileType { name, media_type }
            }
            Rejection::EmptySelection => ScholarError::EmptySelection,
            other => ScholarError::Rejected(other),
        }
    }
}

impl From<dialoguer::Error> for ScholarError {
    fn from(e: dialoguer::Error) -> Self {
        ScholarError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScholarError>;

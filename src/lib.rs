pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod paper;
pub mod progress;
pub mod render;
pub mod workflow;

pub use analyzer::{Analyzer, ContentGenerator, GeminiClient};
pub use config::Config;
pub use error::{Result, ScholarError};

//! Gemini API連携
//!
//! generateContent を1回だけ呼ぶ。リトライ・キャッシュ・タイムアウトは持たない。

use super::types::{service_error_message, GenerateContentRequest, GenerateContentResponse};
use super::ContentGenerator;
use crate::config::Config;
use crate::error::{Result, ScholarError};
use tracing::{debug, warn};

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.resolve_api_key(), &config.model, &config.base_url)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// `{base}/models/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl ContentGenerator for GeminiClient {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<Option<String>> {
        let endpoint = self.endpoint();
        debug!(model = %self.model, "calling generateContent");

        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| ScholarError::Service(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ScholarError::Service(e.without_url().to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "generateContent failed");
            return Err(ScholarError::Service(service_error_message(status.as_u16(), &body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ScholarError::MalformedResponse(e.to_string()))?;

        if let Some(reason) = parsed.block_reason() {
            warn!(reason, "prompt was blocked by the service");
        }
        if let Some(reason) = parsed.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
            debug!(finish_reason = reason, "candidate finished");
        }

        Ok(parsed.text())
    }
}

//! YandexGPT adapter: produces the primary roadmap.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::LlmError;

use super::http::{build_client, post_json};
use super::prompt::roadmap_persona;
use super::provider::{GenerationProvider, GenerationRequest};

const DEFAULT_BASE_URL: &str = "https://llm.api.cloud.yandex.net";
const COMPLETION_PATH: &str = "/foundationModels/v1/completion";
const DEFAULT_MODEL: &str = "yandexgpt-lite";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1500;

/// Client for the YandexGPT foundation models completion API.
pub struct YandexGptProvider {
    client: reqwest::Client,
    api_key: SecretString,
    folder_id: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl YandexGptProvider {
    pub const LABEL: &'static str = "yandexgpt";

    pub fn new(
        api_key: SecretString,
        folder_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_client(Self::LABEL, timeout)?,
            api_key,
            folder_id: folder_id.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn model_uri(&self) -> String {
        format!("gpt://{}/{}", self.folder_id, self.model)
    }

    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        serde_json::json!({
            "modelUri": self.model_uri(),
            "completionOptions": {
                "stream": false,
                "temperature": TEMPERATURE,
                "maxTokens": MAX_TOKENS,
            },
            "messages": [
                { "role": "system", "text": roadmap_persona(request.locale()) },
                { "role": "user", "text": request.prompt() },
            ],
        })
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    result: CompletionResult,
}

#[derive(Debug, Deserialize)]
struct CompletionResult {
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    message: AlternativeMessage,
}

#[derive(Debug, Deserialize)]
struct AlternativeMessage {
    text: String,
}

#[async_trait]
impl GenerationProvider for YandexGptProvider {
    fn label(&self) -> &str {
        Self::LABEL
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let url = format!("{}{COMPLETION_PATH}", self.base_url);
        let body = self.build_request_body(request);
        let authorization = format!("Api-Key {}", self.api_key.expose_secret());

        tracing::debug!(provider = Self::LABEL, model = %self.model_uri(), "Requesting roadmap");
        let response: CompletionResponse =
            post_json(&self.client, Self::LABEL, &url, &authorization, &body, self.timeout).await?;

        response
            .result
            .alternatives
            .into_iter()
            .next()
            .map(|alt| alt.message.text)
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: Self::LABEL.to_string(),
                reason: "result.alternatives is empty".to_string(),
            })
    }
}

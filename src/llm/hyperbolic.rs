//! Hyperbolic adapter: OpenAI-compatible chat completions, used for the
//! supplementary recommendations.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::LlmError;

use super::http::{build_client, post_json};
use super::prompt::supplementary_prompt;
use super::provider::{GenerationProvider, GenerationRequest};

const DEFAULT_BASE_URL: &str = "https://api.hyperbolic.xyz";
const CHAT_PATH: &str = "/v1/chat/completions";
const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct";
const MAX_TOKENS: u32 = 512;
const TEMPERATURE: f32 = 0.1;
const TOP_P: f32 = 0.9;

pub struct HyperbolicProvider {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl HyperbolicProvider {
    pub const LABEL: &'static str = "hyperbolic";

    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_client(Self::LABEL, timeout)?,
            api_key,
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

    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let content = supplementary_prompt(request.locale(), request.prompt());
        serde_json::json!({
            "messages": [{ "role": "user", "content": content }],
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "top_p": TOP_P,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl GenerationProvider for HyperbolicProvider {
    fn label(&self) -> &str {
        Self::LABEL
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let url = format!("{}{CHAT_PATH}", self.base_url);
        let body = self.build_request_body(request);
        let authorization = format!("Bearer {}", self.api_key.expose_secret());

        tracing::debug!(provider = Self::LABEL, model = %self.model, "Requesting recommendations");
        let response: ChatResponse =
            post_json(&self.client, Self::LABEL, &url, &authorization, &body, self.timeout).await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: Self::LABEL.to_string(),
                reason: "choices is empty".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{Answers, Field};
    use crate::llm::mock_server::{MockReply, MockServer};
    use crate::locale::Locale;

    fn provider(base_url: &str) -> HyperbolicProvider {
        HyperbolicProvider::new(SecretString::from("hb-key"), Duration::from_secs(5))
            .unwrap()
            .with_base_url(base_url)
    }

    fn request() -> GenerationRequest {
        let answers: Answers = [(Field::Profession, "Designer")].into_iter().collect();
        GenerationRequest::new(answers, Locale::En)
    }

    #[test]
    fn request_body_wraps_base_prompt() {
        let p = provider("http://unused");
        let req = request();
        let body = p.build_request_body(&req);

        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        let content = body["messages"][0]["content"].as_str().unwrap();
        assert_eq!(content, supplementary_prompt(Locale::En, req.prompt()));
        assert!(content.starts_with("Give additional recommendations for this request: "));
        let top_p = body["top_p"].as_f64().unwrap();
        assert!((top_p - 0.9).abs() < 1e-6);
        let temp = body["temperature"].as_f64().unwrap();
        assert!((temp - 0.1).abs() < 1e-6);
    }

    #[tokio::test]
    async fn generate_reads_first_choice() {
        let server = MockServer::start(
            CHAT_PATH,
            MockReply::ok(serde_json::json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "choices": [
                    { "index": 0, "message": { "role": "assistant", "content": "Focus on X" }, "finish_reason": "stop" }
                ]
            })),
        )
        .await;
        let p = provider(&server.base_url);

        assert_eq!(p.generate(&request()).await.unwrap(), "Focus on X");
        let seen = server.requests();
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer hb-key"));
        assert_eq!(seen[0].body["model"], DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn rate_limited_is_reported() {
        let server = MockServer::start(CHAT_PATH, MockReply::raw(429, "slow down")).await;
        let err = provider(&server.base_url).generate(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_response() {
        let server = MockServer::start(CHAT_PATH, MockReply::raw(200, "<html>oops</html>")).await;
        let err = provider(&server.base_url).generate(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn empty_choices_is_invalid_response() {
        let server =
            MockServer::start(CHAT_PATH, MockReply::ok(serde_json::json!({ "choices": [] }))).await;
        let err = provider(&server.base_url).generate(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse { .. }), "got {err:?}");
    }
}

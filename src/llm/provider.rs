//! Generation provider trait and the request/result types shared by both backends.

use async_trait::async_trait;

use crate::conversation::Answers;
use crate::error::LlmError;
use crate::locale::Locale;

use super::prompt::base_prompt;

/// Read-only snapshot handed to every provider in one aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    answers: Answers,
    locale: Locale,
    prompt: String,
}

impl GenerationRequest {
    /// Freeze `answers` and render the base prompt once.
    pub fn new(answers: Answers, locale: Locale) -> Self {
        let prompt = base_prompt(locale, &answers);
        Self {
            answers,
            locale,
            prompt,
        }
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The base roadmap prompt built from the answers.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Outcome of one provider call within an aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub provider_label: String,
    pub text: Option<String>,
    pub succeeded: bool,
}

impl GenerationResult {
    pub fn success(provider_label: impl Into<String>, text: String) -> Self {
        Self {
            provider_label: provider_label.into(),
            text: Some(text),
            succeeded: true,
        }
    }

    pub fn failure(provider_label: impl Into<String>) -> Self {
        Self {
            provider_label: provider_label.into(),
            text: None,
            succeeded: false,
        }
    }

    /// The generated text, if it is present and not blank.
    pub fn usable_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// One external text-generation backend.
///
/// Implementations make a single HTTP call per `generate` and never panic
/// on transport or decoding problems: every failure is an `LlmError`.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Short label used in logs and results.
    fn label(&self) -> &str;

    /// Produce text for `request`. The text is returned verbatim.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

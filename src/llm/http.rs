//! Shared HTTP plumbing for the provider adapters.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::LlmError;

/// Longest slice of an error body kept in a log message.
const ERROR_BODY_PREVIEW: usize = 200;

/// Build a pooled client with a whole-request timeout.
pub(crate) fn build_client(provider: &str, timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::RequestFailed {
            provider: provider.to_string(),
            reason: format!("Failed to create HTTP client: {e}"),
        })
}

/// POST `body` as JSON with the given `Authorization` value and decode the reply.
pub(crate) async fn post_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    provider: &str,
    url: &str,
    authorization: &str,
    body: &serde_json::Value,
    timeout: Duration,
) -> Result<T, LlmError> {
    let response = client
        .post(url)
        .header(reqwest::header::AUTHORIZATION, authorization)
        .json(body)
        .send()
        .await
        .map_err(|e| transport_error(provider, timeout, e))?;

    let status = response.status();
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs);

    let text = response
        .text()
        .await
        .map_err(|e| transport_error(provider, timeout, e))?;

    if !status.is_success() {
        return Err(status_error(provider, status, retry_after, &text));
    }

    serde_json::from_str(&text).map_err(|e| LlmError::InvalidResponse {
        provider: provider.to_string(),
        reason: format!("{e}; body: {}", preview(&text)),
    })
}

fn transport_error(provider: &str, timeout: Duration, e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout {
            provider: provider.to_string(),
            timeout,
        }
    } else {
        LlmError::RequestFailed {
            provider: provider.to_string(),
            reason: e.to_string(),
        }
    }
}

fn status_error(
    provider: &str,
    status: reqwest::StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> LlmError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => LlmError::AuthFailed {
            provider: provider.to_string(),
        },
        reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited {
            provider: provider.to_string(),
            retry_after,
        },
        _ => LlmError::RequestFailed {
            provider: provider.to_string(),
            reason: format!("HTTP {status}: {}", preview(body)),
        },
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW {
        body.to_string()
    } else {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
        format!("{cut}...")
    }
}

use std::time::Duration;
use reqwest::StatusCode;
use crate::errors::{ScannerError, ScannerResult};
use crate::services::retry_policy::RetryPolicy;
use crate::structs::ai::chat_message::ChatMessage;
use crate::structs::ai::chat_request::ChatRequest;
use crate::structs::ai::chat_response::ChatResponse;
use crate::structs::config::llm_config::LlmConfig;

/// Shared chat-completion transport. Owns the HTTP client, the retry loop
/// and the post-call rate-limit delay; providers differ only in endpoint
/// and extra headers.
pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    extra_headers: Vec<(&'static str, String)>,
    rate_limit_delay: Duration,
    retry: RetryPolicy,
}

impl ChatClient {
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: &str,
        extra_headers: Vec<(&'static str, String)>,
        config: &LlmConfig,
    ) -> ScannerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ScannerError::transport_error("building HTTP client", None, &e.to_string(), false)
            })?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            extra_headers,
            rate_limit_delay: config.rate_limit_delay,
            retry: config.retry,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One chat completion with retries. The `parse` step runs inside the
    /// retry envelope so a truncated or malformed response gets the same
    /// second chance as a 5xx.
    pub async fn complete<T>(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
        parse: fn(&str) -> ScannerResult<T>,
    ) -> ScannerResult<T> {
        let mut attempt = 1u32;
        loop {
            let result = match self.send_once(system_prompt, user_prompt, temperature, max_tokens).await {
                Ok(content) => parse(&content),
                Err(e) => Err(e),
            };

            match result {
                Ok(value) => {
                    self.apply_rate_limit().await;
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && !self.retry.is_exhausted(attempt) => {
                    let delay = self.retry.backoff_delay(attempt);
                    log::warn!(
                        "⚠️ Request to {} failed (attempt {}/{}), retrying in {:?}: {}",
                        self.model, attempt, self.retry.max_attempts, delay, e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    self.apply_rate_limit().await;
                    return Err(e);
                }
            }
        }
    }

    async fn send_once(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> ScannerResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            temperature,
            max_tokens,
        };

        let mut builder = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json");
        for (name, value) in &self.extra_headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, &body));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ScannerError::parse_error("chat response", "response contained no choices"))
    }

    fn classify_status(status: StatusCode, body: &str) -> ScannerError {
        let snippet: String = body.chars().take(200).collect();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ScannerError::Authentication {
                reason: format!("API rejected credentials ({}): {}", status, snippet),
            },
            StatusCode::TOO_MANY_REQUESTS => ScannerError::transport_error(
                "chat completion",
                Some(status.as_u16()),
                &format!("rate limited: {}", snippet),
                true,
            ),
            s if s.is_server_error() => ScannerError::transport_error(
                "chat completion",
                Some(status.as_u16()),
                &format!("server error: {}", snippet),
                true,
            ),
            _ => ScannerError::transport_error(
                "chat completion",
                Some(status.as_u16()),
                &snippet,
                false,
            ),
        }
    }

    async fn apply_rate_limit(&self) {
        if !self.rate_limit_delay.is_zero() {
            tokio::time::sleep(self.rate_limit_delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_are_fatal() {
        let err = ChatClient::classify_status(StatusCode::UNAUTHORIZED, "bad key");
        assert!(matches!(err, ScannerError::Authentication { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        assert!(ChatClient::classify_status(StatusCode::TOO_MANY_REQUESTS, "").is_retryable());
        assert!(ChatClient::classify_status(StatusCode::BAD_GATEWAY, "").is_retryable());
    }

    #[test]
    fn other_client_errors_are_not_retried() {
        let err = ChatClient::classify_status(StatusCode::BAD_REQUEST, "malformed");
        assert!(!err.is_retryable());
    }
}

//! Fake gateway client for testing.
//!
//! Returns deterministic responses based on prompt matching, and records
//! every request it receives so tests can assert on the forwarded content.

use async_trait::async_trait;
use std::sync::Mutex;

use super::client::AiClient;
use super::types::{ChatRequest, ChatResponse, Usage};
use crate::error::AiError;

/// A fake gateway client for testing.
///
/// Responses are matched by checking if the user content contains a
/// registered substring. If no match is found, returns the default response
/// or an error.
#[derive(Default)]
pub struct FakeAiClient {
    /// (user-content substring, response content) pairs, first match wins.
    responses: Vec<(String, String)>,
    /// Default response content if no pattern matches.
    default_response: Option<String>,
    /// Error to return instead of any response.
    error: Option<(u16, String)>,
    /// Every request seen, in order.
    requests: Mutex<Vec<ChatRequest>>,
}

#[allow(dead_code)]
impl FakeAiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake that returns `content` for every request.
    pub fn with_default_response(content: &str) -> Self {
        Self {
            default_response: Some(content.to_string()),
            ..Self::default()
        }
    }

    /// Create a fake that fails every request with an API error.
    pub fn with_api_error(status: u16, body: &str) -> Self {
        Self {
            error: Some((status, body.to_string())),
            ..Self::default()
        }
    }

    /// Return `content` for requests whose user content contains `pattern`.
    pub fn with_response(mut self, pattern: &str, content: &str) -> Self {
        self.responses.push((pattern.to_string(), content.to_string()));
        self
    }

    /// All requests this fake has received.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests this fake has received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AiError> {
        let user_content = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        self.requests.lock().unwrap().push(request);

        if let Some((status, body)) = &self.error {
            return Err(AiError::Api {
                status: *status,
                body: body.clone(),
            });
        }

        for (pattern, content) in &self.responses {
            if user_content.contains(pattern.as_str()) {
                return Ok(ChatResponse {
                    content: content.clone(),
                    usage: Usage::default(),
                });
            }
        }

        match &self.default_response {
            Some(content) => Ok(ChatResponse {
                content: content.clone(),
                usage: Usage::default(),
            }),
            None => Err(AiError::RequestFailed(format!(
                "FakeAiClient: no response configured for prompt (first 100 chars): {}",
                &user_content[..user_content.len().min(100)]
            ))),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

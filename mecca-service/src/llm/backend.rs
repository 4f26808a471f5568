use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::VendorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A single chat completion call: optional system prompt, prior turns, and
/// the new user prompt.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub history: Vec<ChatMessage>,
    pub prompt: String,
    pub max_tokens: u64,
    pub temperature: f64,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u64, temperature: f64) -> Self {
        Self {
            system: None,
            history: Vec::new(),
            prompt: prompt.into(),
            max_tokens,
            temperature,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }
}

/// A model vendor that can answer a completion request.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Label used in `Error calling <label>: ...` strings.
    fn label(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, VendorError>;
}

/// Call a backend with a timeout. Never fails: any error comes back as a
/// readable string in place of the model's reply.
pub async fn invoke(
    backend: &dyn ModelBackend,
    request: &CompletionRequest,
    timeout: Duration,
) -> String {
    debug!(
        vendor = backend.label(),
        prompt_chars = request.prompt.len(),
        history = request.history.len(),
        "calling model"
    );

    let outcome = match tokio::time::timeout(timeout, backend.complete(request)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(VendorError::Timeout(timeout.as_secs())),
    };

    match outcome {
        Ok(text) => text,
        Err(e) => {
            warn!(vendor = backend.label(), error = %e, "model call failed");
            format!("Error calling {}: {}", backend.label(), e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    #[async_trait]
    impl ModelBackend for Broken {
        fn label(&self) -> &str {
            "Perplexity"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, VendorError> {
            Err(VendorError::Status {
                status: 401,
                body: "unauthorized".to_string(),
            })
        }
    }

    struct Sleepy;

    #[async_trait]
    impl ModelBackend for Sleepy {
        fn label(&self) -> &str {
            "Gemini"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, VendorError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("late".to_string())
        }
    }

    #[tokio::test]
    async fn failed_call_becomes_error_string() {
        let request = CompletionRequest::new("check this", 2000, 0.3);
        let text = invoke(&Broken, &request, Duration::from_secs(1)).await;

        assert_eq!(text, "Error calling Perplexity: HTTP 401 - unauthorized");
    }

    #[tokio::test]
    async fn slow_call_times_out_as_string() {
        let request = CompletionRequest::new("check this", 2000, 0.3);
        let text = invoke(&Sleepy, &request, Duration::from_millis(20)).await;

        assert!(text.starts_with("Error calling Gemini: request timed out"));
    }
}

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::backend::{ChatRole, CompletionRequest, ModelBackend};
use crate::error::VendorError;

/// Perplexity's OpenAI-compatible chat endpoint, called over plain HTTP.
pub struct PerplexityBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl PerplexityBackend {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            url: url.into(),
        })
    }
}

pub(crate) fn build_payload(model: &str, request: &CompletionRequest) -> Value {
    let mut messages = Vec::with_capacity(request.history.len() + 2);
    if let Some(system) = &request.system {
        messages.push(json!({ "role": "system", "content": system }));
    }
    for message in &request.history {
        let role = match message.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        };
        messages.push(json!({ "role": role, "content": message.content }));
    }
    messages.push(json!({ "role": "user", "content": request.prompt }));

    json!({
        "model": model,
        "messages": messages,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
    })
}

/// Pull `choices[0].message.content` out of a chat completion body.
pub(crate) fn parse_response(body: &Value) -> Result<String, VendorError> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            VendorError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

#[async_trait]
impl ModelBackend for PerplexityBackend {
    fn label(&self) -> &str {
        "Perplexity"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, VendorError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&build_payload(&self.model, request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VendorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        parse_response(&body)
    }
}

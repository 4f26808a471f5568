use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::{AssistantContent, CompletionModel, Message};
use rig::providers::{anthropic, gemini, openai};

use super::backend::{ChatMessage, ChatRole, CompletionRequest, ModelBackend};
use crate::error::VendorError;

enum RigProvider {
    OpenAi(openai::Client),
    Anthropic(anthropic::Client),
    Gemini(gemini::Client),
}

/// OpenAI, Anthropic and Gemini chat models through `rig`.
pub struct RigBackend {
    label: String,
    model: String,
    provider: RigProvider,
}

impl RigBackend {
    pub fn openai(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            label: "GPT-4".to_string(),
            model: model.into(),
            provider: RigProvider::OpenAi(openai::Client::new(api_key)),
        }
    }

    pub fn anthropic(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            label: "Claude".to_string(),
            model: model.into(),
            provider: RigProvider::Anthropic(anthropic::Client::new(api_key)),
        }
    }

    pub fn gemini(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            label: "Gemini".to_string(),
            model: model.into(),
            provider: RigProvider::Gemini(gemini::Client::new(api_key)),
        }
    }
}

#[async_trait]
impl ModelBackend for RigBackend {
    fn label(&self) -> &str {
        &self.label
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, VendorError> {
        match &self.provider {
            RigProvider::OpenAi(client) => {
                send_completion_request(client.completion_model(&self.model), request).await
            }
            RigProvider::Anthropic(client) => {
                send_completion_request(client.completion_model(&self.model), request).await
            }
            RigProvider::Gemini(client) => {
                send_completion_request(client.completion_model(&self.model), request).await
            }
        }
    }
}

fn to_rig_message(message: &ChatMessage) -> Message {
    match message.role {
        ChatRole::User => Message::user(message.content.clone()),
        ChatRole::Assistant => Message::assistant(message.content.clone()),
    }
}

async fn send_completion_request<M: CompletionModel>(
    model: M,
    request: &CompletionRequest,
) -> Result<String, VendorError> {
    let history: Vec<Message> = request.history.iter().map(to_rig_message).collect();

    let mut builder = model
        .completion_request(request.prompt.as_str())
        .messages(history)
        .temperature(request.temperature)
        .max_tokens(request.max_tokens);

    if let Some(system) = &request.system {
        builder = builder.preamble(system.clone());
    }

    let response = builder
        .send()
        .await
        .map_err(|e| VendorError::Request(e.to_string()))?;

    let text: String = response
        .choice
        .iter()
        .filter_map(|content| match content {
            AssistantContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect();

    if text.trim().is_empty() {
        return Err(VendorError::MalformedResponse(
            "no text content in completion".to_string(),
        ));
    }

    Ok(text)
}

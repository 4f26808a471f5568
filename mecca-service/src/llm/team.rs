use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{info, warn};

use super::backend::{ChatMessage, CompletionRequest, ModelBackend, invoke};
use super::perplexity::PerplexityBackend;
use super::rig_backend::RigBackend;
use super::Specialist;
use crate::config::{CallSettings, ServiceConfig};
use crate::models::SpecialistResponses;

pub const CONNECTION_TEST_PROMPT: &str =
    "Hello, please respond with just 'API working' to test the connection.";

/// The configured model backends plus the call settings used for each kind
/// of request. Claude answers as the Editor-in-Chief.
pub struct EditorialTeam {
    backends: HashMap<Specialist, Arc<dyn ModelBackend>>,
    settings: CallSettings,
}

impl EditorialTeam {
    pub fn new(settings: CallSettings) -> Self {
        Self {
            backends: HashMap::new(),
            settings,
        }
    }

    pub fn with_backend(mut self, specialist: Specialist, backend: Arc<dyn ModelBackend>) -> Self {
        self.backends.insert(specialist, backend);
        self
    }

    /// Build a backend for every vendor that has an API key.
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let keys = &config.api_keys;
        let models = &config.models;
        let mut team = Self::new(config.calls.clone());

        if let Some(key) = &keys.openai {
            team = team.with_backend(Specialist::Gpt, Arc::new(RigBackend::openai(key, &models.gpt)));
        }
        if let Some(key) = &keys.google {
            team = team.with_backend(
                Specialist::Gemini,
                Arc::new(RigBackend::gemini(key, &models.gemini)),
            );
        }
        if let Some(key) = &keys.anthropic {
            team = team.with_backend(
                Specialist::Claude,
                Arc::new(RigBackend::anthropic(key, &models.claude)),
            );
        }
        if let Some(key) = &keys.perplexity {
            team = team.with_backend(
                Specialist::Perplexity,
                Arc::new(PerplexityBackend::new(
                    key,
                    &models.perplexity,
                    &config.perplexity_url,
                    config.calls.timeout,
                )?),
            );
        }

        info!(
            configured = ?team.configured(),
            "editorial team ready"
        );
        Ok(team)
    }

    pub fn configured(&self) -> Vec<Specialist> {
        let mut configured: Vec<Specialist> = self.backends.keys().copied().collect();
        configured.sort();
        configured
    }

    /// Run one specialist review prompt.
    pub async fn consult(&self, specialist: Specialist, prompt: String) -> String {
        let request = CompletionRequest::new(
            prompt,
            self.settings.specialist_max_tokens,
            self.settings.temperature,
        );
        self.call(specialist, request).await
    }

    /// Ask the Editor-in-Chief to synthesize the specialists' outputs.
    pub async fn synthesize(&self, prompt: String) -> String {
        let request = CompletionRequest::new(
            prompt,
            self.settings.synthesis_max_tokens,
            self.settings.temperature,
        );
        self.call(Specialist::Claude, request).await
    }

    /// Ask the Editor-in-Chief a follow-up question with the full prior
    /// dialogue as history.
    pub async fn converse(
        &self,
        system: String,
        history: Vec<ChatMessage>,
        question: String,
    ) -> String {
        let request = CompletionRequest::new(
            question,
            self.settings.dialogue_max_tokens,
            self.settings.temperature,
        )
        .with_system(system)
        .with_history(history);
        self.call(Specialist::Claude, request).await
    }

    /// Send the same raw prompt to several models at once.
    pub async fn query_all(&self, query: &str, models: &[Specialist]) -> SpecialistResponses {
        let mut set = JoinSet::new();
        for &specialist in models {
            let backend = self.backends.get(&specialist).cloned();
            let request = CompletionRequest::new(
                query,
                self.settings.specialist_max_tokens,
                self.settings.temperature,
            );
            let timeout = self.settings.timeout;
            set.spawn(async move {
                (
                    specialist,
                    call_backend(specialist, backend, request, timeout).await,
                )
            });
        }

        let mut responses = SpecialistResponses::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((specialist, text)) => {
                    responses.insert(specialist, text);
                }
                Err(e) => warn!(error = %e, "model query task failed to join"),
            }
        }
        responses
    }

    /// Ping every vendor with a fixed prompt.
    pub async fn test_connections(&self) -> SpecialistResponses {
        self.query_all(CONNECTION_TEST_PROMPT, &Specialist::ALL).await
    }

    async fn call(&self, specialist: Specialist, request: CompletionRequest) -> String {
        let backend = self.backends.get(&specialist).cloned();
        call_backend(specialist, backend, request, self.settings.timeout).await
    }
}

async fn call_backend(
    specialist: Specialist,
    backend: Option<Arc<dyn ModelBackend>>,
    request: CompletionRequest,
    timeout: Duration,
) -> String {
    match backend {
        Some(backend) => invoke(backend.as_ref(), &request, timeout).await,
        None => specialist.not_configured_message(),
    }
}

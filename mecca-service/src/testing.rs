//! Scripted model backends shared by the workflow and router tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::CallSettings;
use crate::error::VendorError;
use crate::llm::{CompletionRequest, EditorialTeam, ModelBackend, Specialist};

pub(crate) const ARTICLE_BODY: &str = "Jane Doe, 45, said the bridge collapsed Tuesday.";
pub(crate) const GPT_REPLY: &str =
    "Para 1: Jane Doe, 45, said the bridge collapsed Tuesday. ⚠️ FLAG: verify her age.";
pub(crate) const GEMINI_REPLY: &str = "Para 1: Name the bridge in the first sentence.";
pub(crate) const PERPLEXITY_REPLY: &str =
    "Para 1: No public record confirms the collapse date yet.";
pub(crate) const SYNTHESIS_REPLY: &str =
    "GPT-4 wants \"the bridge collapsed Tuesday\" attributed. Gemini wants the bridge named.";

type Responder = Box<dyn Fn(&CompletionRequest) -> String + Send + Sync>;

pub(crate) struct ScriptedBackend {
    label: &'static str,
    respond: Responder,
    delay: Duration,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub(crate) fn replying(label: &'static str, reply: &'static str) -> Arc<Self> {
        Self::with(label, move |_| reply.to_string())
    }

    pub(crate) fn with(
        label: &'static str,
        respond: impl Fn(&CompletionRequest) -> String + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            label,
            respond: Box::new(respond),
            delay: Duration::ZERO,
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Like [`ScriptedBackend::with`], but every reply takes `delay`.
    pub(crate) fn slow(
        label: &'static str,
        delay: Duration,
        respond: impl Fn(&CompletionRequest) -> String + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            label,
            respond: Box::new(respond),
            delay,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    fn label(&self) -> &str {
        self.label
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, VendorError> {
        self.seen.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok((self.respond)(request))
    }
}

/// Claude answers synthesis requests with [`SYNTHESIS_REPLY`] and dialogue
/// requests (those carrying a system prompt) by misquoting the collapse day
/// whenever the question mentions Monday.
fn editor_in_chief(request: &CompletionRequest) -> String {
    match &request.system {
        None => SYNTHESIS_REPLY.to_string(),
        Some(_) if request.prompt.contains("Monday") => {
            "GPT-4 wrote \"the bridge collapsed Monday\" in its notes.".to_string()
        }
        Some(_) => format!("Answer to: {}. GPT-4 asked you to \"verify her age\".", request.prompt),
    }
}

pub(crate) struct MockTeam {
    pub team: Arc<EditorialTeam>,
    pub gpt: Arc<ScriptedBackend>,
    pub claude: Arc<ScriptedBackend>,
}

pub(crate) fn mock_team() -> MockTeam {
    team_with_editor(ScriptedBackend::with("Claude", editor_in_chief))
}

/// Like [`mock_team`], but the Editor-in-Chief takes `delay` to answer.
pub(crate) fn slow_editor_team(delay: Duration) -> MockTeam {
    team_with_editor(ScriptedBackend::slow("Claude", delay, editor_in_chief))
}

fn team_with_editor(claude: Arc<ScriptedBackend>) -> MockTeam {
    let gpt = ScriptedBackend::replying("GPT-4", GPT_REPLY);
    let team = EditorialTeam::new(CallSettings::default())
        .with_backend(Specialist::Gpt, gpt.clone())
        .with_backend(
            Specialist::Gemini,
            ScriptedBackend::replying("Gemini", GEMINI_REPLY),
        )
        .with_backend(
            Specialist::Perplexity,
            ScriptedBackend::replying("Perplexity", PERPLEXITY_REPLY),
        )
        .with_backend(Specialist::Claude, claude.clone());

    MockTeam {
        team: Arc::new(team),
        gpt,
        claude,
    }
}

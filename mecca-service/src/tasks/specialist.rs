use std::sync::Arc;

use async_trait::async_trait;
use review_flow::{Context, FlowError, NextAction, Result, Task, TaskResult};
use tracing::{debug, info};

use super::types::{session_keys, specialist_response_key};
use crate::article::Article;
use crate::llm::{EditorialTeam, Specialist};
use crate::models::ReviewOptions;
use crate::prompts::{PromptTemplate, TemplateVersion};

/// One specialist's review. Runs as a child of the panel fan-out and writes
/// its raw output to the shared context; skipped when the specialist was not
/// picked for this review.
pub struct SpecialistTask {
    id: String,
    specialist: Specialist,
    team: Arc<EditorialTeam>,
}

impl SpecialistTask {
    pub fn new(specialist: Specialist, team: Arc<EditorialTeam>) -> Self {
        Self {
            id: format!("specialist_{}", specialist.key()),
            specialist,
            team,
        }
    }
}

#[async_trait]
impl Task for SpecialistTask {
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        let selected: Vec<Specialist> = context
            .get(session_keys::SELECTED_SPECIALISTS)
            .await
            .unwrap_or_default();
        if !selected.contains(&self.specialist) {
            debug!(specialist = %self.specialist, "not selected, skipping");
            return Ok(TaskResult::new(None, NextAction::ContinueAndExecute));
        }

        let article: Article = context
            .get(session_keys::ARTICLE)
            .await
            .ok_or_else(|| FlowError::ContextError("article not found".to_string()))?;
        let options: ReviewOptions = context
            .get(session_keys::OPTIONS)
            .await
            .unwrap_or_default();
        let version: TemplateVersion = context
            .get(session_keys::TEMPLATE_VERSION)
            .await
            .unwrap_or_default();

        info!(
            specialist = %self.specialist,
            role = PromptTemplate::display_name(version, self.specialist),
            "consulting specialist"
        );
        let prompt = PromptTemplate::specialist(version, self.specialist, &article, &options);
        let response = self.team.consult(self.specialist, prompt).await;

        context
            .set(specialist_response_key(self.specialist), &response)
            .await;

        Ok(TaskResult::new(Some(response), NextAction::ContinueAndExecute))
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use review_flow::{Context, FlowError, NextAction, Result, Task, TaskResult};
use tracing::info;

use super::types::session_keys;
use crate::article::Article;
use crate::llm::EditorialTeam;
use crate::models::{ReviewOptions, SpecialistResponses};
use crate::prompts::{DialogueInputs, PromptTemplate, TemplateVersion};
use crate::synthesis::EditorialSynthesis;
use crate::transcript::{DialogueTurn, Transcript};
use crate::validator::{ResponseValidator, ValidationFlag};

/// Answers one follow-up question as the Editor-in-Chief, then waits for the
/// next one.
pub struct DialogueTask {
    team: Arc<EditorialTeam>,
    validator: Arc<ResponseValidator>,
}

impl DialogueTask {
    pub fn new(team: Arc<EditorialTeam>, validator: Arc<ResponseValidator>) -> Self {
        Self { team, validator }
    }
}

#[async_trait]
impl Task for DialogueTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        info!("running task: {}", self.id());

        let question: String = context
            .remove(session_keys::PENDING_QUESTION)
            .await
            .and_then(|v| serde_json::from_value(v).ok())
            .ok_or_else(|| FlowError::ContextError("pending_question not found".to_string()))?;

        let article: Article = context
            .get(session_keys::ARTICLE)
            .await
            .ok_or_else(|| FlowError::ContextError("article not found".to_string()))?;
        let synthesis: EditorialSynthesis = context
            .get(session_keys::SYNTHESIS)
            .await
            .ok_or_else(|| FlowError::ContextError("synthesis not found".to_string()))?;
        let responses: SpecialistResponses = context
            .get(session_keys::SPECIALIST_RESPONSES)
            .await
            .unwrap_or_default();
        let options: ReviewOptions = context
            .get(session_keys::OPTIONS)
            .await
            .unwrap_or_default();
        let version: TemplateVersion = context
            .get(session_keys::TEMPLATE_VERSION)
            .await
            .unwrap_or_default();
        let mut transcript: Transcript = context
            .get(session_keys::TRANSCRIPT)
            .await
            .unwrap_or_default();

        let system = PromptTemplate::dialogue_system(
            version,
            &DialogueInputs {
                article: &article,
                synthesis: &synthesis.raw,
                responses: &responses,
                options: &options,
            },
        );

        info!(turn = transcript.len() + 1, "asking editor-in-chief");
        let answer = self
            .team
            .converse(system, transcript.to_history(), question.clone())
            .await;

        let sources: Vec<&str> = responses.values().map(String::as_str).collect();
        let flags = self.validator.validate(&answer, &sources);
        if !flags.is_empty() {
            info!(flags = flags.len(), "dialogue answer flagged");
        }

        let mut history: Vec<ValidationFlag> = context
            .get(session_keys::VALIDATION_HISTORY)
            .await
            .unwrap_or_default();
        history.extend(flags.iter().cloned());

        transcript.push(DialogueTurn {
            question,
            answer: answer.clone(),
            flags,
        });
        context.set(session_keys::TRANSCRIPT, &transcript).await;
        context
            .set(session_keys::VALIDATION_HISTORY, &history)
            .await;

        Ok(TaskResult::new_with_status(
            Some(answer),
            NextAction::WaitForInput,
            Some(format!("{} follow-up question(s) answered", transcript.len())),
        ))
    }
}

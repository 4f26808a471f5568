use std::sync::Arc;

use async_trait::async_trait;
use review_flow::{Context, NextAction, Result, Task, TaskResult};
use tracing::info;

use super::types::{session_keys, specialist_response_key};
use crate::llm::{EditorialTeam, Specialist};
use crate::models::{ReviewOptions, SpecialistResponses};
use crate::prompts::{PromptTemplate, TemplateVersion};
use crate::synthesis::EditorialSynthesis;
use crate::validator::{ResponseValidator, ValidationFlag};

/// Collects the panel's outputs, has the Editor-in-Chief synthesize them,
/// then lints the synthesis against what the specialists actually wrote.
pub struct EditorInChiefTask {
    team: Arc<EditorialTeam>,
    validator: Arc<ResponseValidator>,
}

impl EditorInChiefTask {
    pub fn new(team: Arc<EditorialTeam>, validator: Arc<ResponseValidator>) -> Self {
        Self { team, validator }
    }
}

#[async_trait]
impl Task for EditorInChiefTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        info!("running task: {}", self.id());

        let selected: Vec<Specialist> = context
            .get(session_keys::SELECTED_SPECIALISTS)
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

        let responses = collect_responses(&context, &selected);
        context
            .set(session_keys::SPECIALIST_RESPONSES, &responses)
            .await;

        let prompt = PromptTemplate::synthesis(version, &responses, &options);
        let synthesis = EditorialSynthesis::parse(self.team.synthesize(prompt).await);

        let sources: Vec<&str> = responses.values().map(String::as_str).collect();
        let flags = self.validator.validate(&synthesis.raw, &sources);
        info!(
            specialists = responses.len(),
            flags = flags.len(),
            has_quick_fixes = !synthesis.quick_fixes.is_empty(),
            "editorial synthesis ready"
        );

        let mut history: Vec<ValidationFlag> = context
            .get(session_keys::VALIDATION_HISTORY)
            .await
            .unwrap_or_default();
        history.extend(flags.iter().cloned());

        context.set(session_keys::SYNTHESIS, &synthesis).await;
        context.set(session_keys::SYNTHESIS_FLAGS, &flags).await;
        context
            .set(session_keys::VALIDATION_HISTORY, &history)
            .await;
        context.set(session_keys::REVIEW_COMPLETE, true).await;

        Ok(TaskResult::new_with_status(
            Some(synthesis.raw),
            NextAction::Continue,
            Some("Editorial synthesis ready; ask follow-up questions".to_string()),
        ))
    }
}

/// Outputs of the selected specialists, in specialist order. A selected
/// specialist with no stored output is recorded as having given none.
fn collect_responses(context: &Context, selected: &[Specialist]) -> SpecialistResponses {
    selected
        .iter()
        .map(|&specialist| {
            let text = context
                .get_sync::<String>(&specialist_response_key(specialist))
                .unwrap_or_else(|| specialist.missing_feedback_message());
            (specialist, text)
        })
        .collect()
}

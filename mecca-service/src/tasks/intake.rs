use async_trait::async_trait;
use review_flow::{Context, FlowError, NextAction, Result, Task, TaskResult};
use tracing::info;

use super::types::{session_keys, specialist_response_key};
use crate::article::Article;
use crate::llm::Specialist;
use crate::transcript::Transcript;
use crate::validator::ValidationFlag;

/// Checks the submitted article and resets per-analysis state before the
/// specialist panel runs.
pub struct ArticleIntakeTask;

#[async_trait]
impl Task for ArticleIntakeTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        info!("running task: {}", self.id());

        let article: Article = context
            .get(session_keys::ARTICLE)
            .await
            .ok_or_else(|| FlowError::ContextError("article not found".to_string()))?;
        if article.is_empty() {
            return Err(FlowError::TaskExecutionFailed(
                "article body is empty".to_string(),
            ));
        }

        let mut selected: Vec<Specialist> = context
            .get(session_keys::SELECTED_SPECIALISTS)
            .await
            .unwrap_or_else(|| Specialist::DEFAULT_PANEL.to_vec());
        selected.sort();
        selected.dedup();
        info!(
            paragraphs = article.body.lines().filter(|l| !l.trim().is_empty()).count(),
            specialists = ?selected,
            "article accepted for review"
        );

        for specialist in Specialist::ALL {
            context.remove(&specialist_response_key(specialist)).await;
        }
        context.remove(session_keys::SYNTHESIS).await;
        context
            .set(session_keys::SELECTED_SPECIALISTS, &selected)
            .await;
        context.set(session_keys::REVIEW_COMPLETE, false).await;
        context
            .set(session_keys::TRANSCRIPT, Transcript::default())
            .await;
        context
            .set(session_keys::VALIDATION_HISTORY, Vec::<ValidationFlag>::new())
            .await;

        Ok(TaskResult::new_with_status(
            None,
            NextAction::ContinueAndExecute,
            Some(format!("Consulting {} specialists", selected.len())),
        ))
    }
}

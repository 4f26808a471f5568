use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::{
    context::Context,
    error::{FlowError, Result},
    task::{NextAction, Task, TaskResult},
};

/// Runs a set of child tasks concurrently against the same context and
/// joins them before the graph moves on.
///
/// Children communicate through the shared context; their own
/// `next_action` is ignored. If any child fails, the fan-out fails with the
/// first error once every child has finished.
pub struct FanOutTask {
    id: String,
    children: Vec<Arc<dyn Task>>,
}

impl FanOutTask {
    pub fn new(id: impl Into<String>, children: Vec<Arc<dyn Task>>) -> Self {
        Self {
            id: id.into(),
            children,
        }
    }
}

#[async_trait]
impl Task for FanOutTask {
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, context: Context) -> Result<TaskResult> {
        info!(task_id = %self.id, children = self.children.len(), "fanning out");

        let mut set = JoinSet::new();
        for child in &self.children {
            let child = child.clone();
            let context = context.clone();
            set.spawn(async move {
                let child_id = child.id().to_string();
                (child_id, child.run(context).await)
            });
        }

        let mut first_error = None;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((_, Ok(_))) => {}
                Ok((child_id, Err(e))) => {
                    error!(child = %child_id, error = %e, "fan-out child failed");
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    error!(error = %e, "fan-out child panicked");
                    first_error.get_or_insert(FlowError::TaskExecutionFailed(e.to_string()));
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        Ok(TaskResult::new(None, NextAction::ContinueAndExecute))
    }
}

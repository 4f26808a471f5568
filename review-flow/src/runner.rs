//! `FlowRunner` loads a session, executes one graph step and persists the
//! updated session back to storage.
//!
//! One step means the current task plus any tasks it chains into with
//! `NextAction::ContinueAndExecute`. A web service shares one runner across
//! requests:
//!
//! ```ignore
//! let result = state.flow_runner.run(&session_id).await?;
//! ```
//!
//! Use [`Graph::execute_session`] directly when the session should be
//! inspected before it is saved.

use std::sync::Arc;

use crate::{
    error::{FlowError, Result},
    graph::{ExecutionResult, Graph},
    storage::SessionStorage,
};

/// Orchestrates the _load → execute → save_ pattern.
#[derive(Clone)]
pub struct FlowRunner {
    graph: Arc<Graph>,
    storage: Arc<dyn SessionStorage>,
}

impl FlowRunner {
    pub fn new(graph: Arc<Graph>, storage: Arc<dyn SessionStorage>) -> Self {
        Self { graph, storage }
    }

    /// Execute one step for `session_id` and persist the session.
    ///
    /// The session is saved even when a task fails, so context written before
    /// the failure stays visible.
    pub async fn run(&self, session_id: &str) -> Result<ExecutionResult> {
        let mut session = self
            .storage
            .get(session_id)
            .await?
            .ok_or_else(|| FlowError::SessionNotFound(session_id.to_string()))?;

        let result = self.graph.execute_session(&mut session).await;
        self.storage.save(session).await?;

        result
    }
}

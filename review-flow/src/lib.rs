pub mod context;
pub mod error;
pub mod fanout;
pub mod graph;
pub mod runner;
pub mod storage;
pub mod task;

// Re-export commonly used types
pub use context::Context;
pub use error::{FlowError, Result};
pub use fanout::FanOutTask;
pub use graph::{ExecutionResult, ExecutionStatus, Graph, GraphBuilder};
pub use runner::FlowRunner;
pub use storage::{InMemorySessionStorage, Session, SessionStorage};
pub use task::{NextAction, Task, TaskResult};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct TestTask {
        id: String,
        next: NextAction,
    }

    impl TestTask {
        fn new(id: &str, next: NextAction) -> Arc<Self> {
            Arc::new(Self {
                id: id.to_string(),
                next,
            })
        }
    }

    #[async_trait]
    impl Task for TestTask {
        fn id(&self) -> &str {
            &self.id
        }

        async fn run(&self, context: Context) -> Result<TaskResult> {
            let mut visited: Vec<String> = context.get("visited").await.unwrap_or_default();
            visited.push(self.id.clone());
            context.set("visited", visited).await;

            Ok(TaskResult::new_with_status(
                Some(format!("{} done", self.id)),
                self.next.clone(),
                Some(format!("ran {}", self.id)),
            ))
        }
    }

    struct SlowWriter {
        key: &'static str,
        delay_ms: u64,
    }

    #[async_trait]
    impl Task for SlowWriter {
        fn id(&self) -> &str {
            self.key
        }

        async fn run(&self, context: Context) -> Result<TaskResult> {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            context.set(self.key, self.delay_ms).await;
            Ok(TaskResult::new(None, NextAction::End))
        }
    }

    struct FailingTask;

    #[async_trait]
    impl Task for FailingTask {
        async fn run(&self, _context: Context) -> Result<TaskResult> {
            Err(FlowError::TaskExecutionFailed("boom".to_string()))
        }
    }

    fn chain() -> Graph {
        GraphBuilder::new("test_graph")
            .add_task(TestTask::new("a", NextAction::ContinueAndExecute))
            .add_task(TestTask::new("b", NextAction::ContinueAndExecute))
            .add_task(TestTask::new("c", NextAction::WaitForInput))
            .add_edge("a", "b")
            .add_edge("b", "c")
            .build()
    }

    #[tokio::test]
    async fn test_continue_and_execute_chains_until_wait() {
        let graph = chain();
        let mut session = Session::new_from_task("s1".to_string(), "a");

        let result = graph.execute_session(&mut session).await.unwrap();

        assert_eq!(result.status, ExecutionStatus::WaitingForInput);
        assert_eq!(result.response.as_deref(), Some("c done"));
        assert_eq!(session.current_task_id, "c");
        assert_eq!(session.status_message.as_deref(), Some("ran c"));

        let visited: Vec<String> = session.context.get("visited").await.unwrap();
        assert_eq!(visited, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_wait_for_input_reruns_same_task() {
        let graph = chain();
        let mut session = Session::new_from_task("s1".to_string(), "c");

        graph.execute_session(&mut session).await.unwrap();
        graph.execute_session(&mut session).await.unwrap();

        let visited: Vec<String> = session.context.get("visited").await.unwrap();
        assert_eq!(visited, vec!["c", "c"]);
        assert_eq!(session.current_task_id, "c");
    }

    #[tokio::test]
    async fn test_continue_stops_after_one_task() {
        let graph = GraphBuilder::new("g")
            .add_task(TestTask::new("a", NextAction::Continue))
            .add_task(TestTask::new("b", NextAction::End))
            .add_edge("a", "b")
            .build();
        let mut session = Session::new_from_task("s".to_string(), "a");

        let first = graph.execute_session(&mut session).await.unwrap();
        assert_eq!(first.status, ExecutionStatus::WaitingForInput);
        assert_eq!(session.current_task_id, "b");

        let second = graph.execute_session(&mut session).await.unwrap();
        assert_eq!(second.status, ExecutionStatus::Completed);
    }

    #[tokio::test]
    async fn test_conditional_edge() {
        let graph = GraphBuilder::new("g")
            .add_task(TestTask::new("a", NextAction::Continue))
            .add_task(TestTask::new("b", NextAction::End))
            .add_task(TestTask::new("c", NextAction::End))
            .add_conditional_edge("a", "b", |ctx| ctx.get_sync::<bool>("go_b").unwrap_or(false))
            .add_edge("a", "c")
            .build();

        let context = Context::new();
        assert_eq!(graph.find_next_task("a", &context).as_deref(), Some("c"));
        context.set("go_b", true).await;
        assert_eq!(graph.find_next_task("a", &context).as_deref(), Some("b"));
        assert_eq!(graph.start_task_id(), Some("a"));
    }

    #[tokio::test]
    async fn test_goto_unknown_task_fails() {
        let graph = GraphBuilder::new("g")
            .add_task(TestTask::new("a", NextAction::GoTo("missing".to_string())))
            .build();
        let mut session = Session::new_from_task("s".to_string(), "a");

        let err = graph.execute_session(&mut session).await.unwrap_err();
        assert!(matches!(err, FlowError::TaskNotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_fanout_runs_children_on_shared_context() {
        let fanout = Arc::new(FanOutTask::new(
            "panel",
            vec![
                Arc::new(SlowWriter {
                    key: "slow",
                    delay_ms: 30,
                }),
                Arc::new(SlowWriter {
                    key: "fast",
                    delay_ms: 1,
                }),
            ],
        ));
        let graph = GraphBuilder::new("g")
            .add_task(fanout)
            .add_task(TestTask::new("after", NextAction::End))
            .add_edge("panel", "after")
            .build();
        let mut session = Session::new_from_task("s".to_string(), "panel");

        let result = graph.execute_session(&mut session).await.unwrap();

        assert_eq!(result.status, ExecutionStatus::Completed);
        assert_eq!(session.context.get_sync::<u64>("slow"), Some(30));
        assert_eq!(session.context.get_sync::<u64>("fast"), Some(1));
        assert_eq!(session.current_task_id, "after");
    }

    #[tokio::test]
    async fn test_fanout_reports_child_failure() {
        let fanout = FanOutTask::new(
            "panel",
            vec![
                Arc::new(FailingTask),
                Arc::new(SlowWriter {
                    key: "ok",
                    delay_ms: 1,
                }),
            ],
        );

        let context = Context::new();
        let err = fanout.run(context.clone()).await.unwrap_err();

        assert!(matches!(err, FlowError::TaskExecutionFailed(_)));
        assert!(context.contains_key("ok"));
    }

    #[tokio::test]
    async fn test_runner_persists_session() {
        let storage = Arc::new(InMemorySessionStorage::new());
        let runner = FlowRunner::new(Arc::new(chain()), storage.clone());

        storage
            .save(Session::new_from_task("s1".to_string(), "a"))
            .await
            .unwrap();
        runner.run("s1").await.unwrap();

        let saved = storage.get("s1").await.unwrap().unwrap();
        assert_eq!(saved.current_task_id, "c");

        assert!(matches!(
            runner.run("nope").await,
            Err(FlowError::SessionNotFound(_))
        ));
        assert!(storage.delete("s1").await.unwrap());
        assert!(!storage.delete("s1").await.unwrap());
        assert!(storage.is_empty());
    }
}

use std::sync::Arc;

use review_flow::{FanOutTask, FlowRunner, Graph, GraphBuilder, Session, SessionStorage, Task};
use uuid::Uuid;

use crate::article::Article;
use crate::llm::{EditorialTeam, Specialist};
use crate::models::ReviewOptions;
use crate::prompts::TemplateVersion;
use crate::tasks::*;
use crate::validator::ResponseValidator;

pub const REVIEW_GRAPH_ID: &str = "editorial_review";
pub const SPECIALIST_PANEL_ID: &str = "specialist_panel";

/// Intake → specialist panel (concurrent) → Editor-in-Chief → dialogue.
pub fn build_review_workflow(
    team: Arc<EditorialTeam>,
    validator: Arc<ResponseValidator>,
) -> Graph {
    let intake_task = Arc::new(ArticleIntakeTask);
    let intake_id = intake_task.id().to_string();

    let children: Vec<Arc<dyn Task>> = Specialist::ALL
        .into_iter()
        .map(|specialist| {
            Arc::new(SpecialistTask::new(specialist, team.clone())) as Arc<dyn Task>
        })
        .collect();
    let panel_task = Arc::new(FanOutTask::new(SPECIALIST_PANEL_ID, children));

    let eic_task = Arc::new(EditorInChiefTask::new(team.clone(), validator.clone()));
    let eic_id = eic_task.id().to_string();

    let dialogue_task = Arc::new(DialogueTask::new(team, validator));
    let dialogue_id = dialogue_task.id().to_string();

    GraphBuilder::new(REVIEW_GRAPH_ID)
        .add_task(intake_task)
        .add_task(panel_task)
        .add_task(eic_task)
        .add_task(dialogue_task)
        .add_edge(&intake_id, SPECIALIST_PANEL_ID)
        .add_edge(SPECIALIST_PANEL_ID, &eic_id)
        .add_edge(&eic_id, &dialogue_id)
        .build()
}

/// Inputs for a new review session.
pub struct ReviewSetup {
    pub article: Article,
    pub options: ReviewOptions,
    pub specialists: Vec<Specialist>,
    pub template_version: TemplateVersion,
}

pub async fn create_review_session(setup: ReviewSetup) -> Session {
    let session_id = Uuid::new_v4().to_string();
    let mut session = Session::new_from_task(session_id, ArticleIntakeTask.id());
    session.graph_id = REVIEW_GRAPH_ID.to_string();

    let context = &session.context;
    context.set(session_keys::ARTICLE, &setup.article).await;
    context.set(session_keys::OPTIONS, &setup.options).await;
    context
        .set(session_keys::SELECTED_SPECIALISTS, &setup.specialists)
        .await;
    context
        .set(session_keys::TEMPLATE_VERSION, setup.template_version)
        .await;

    session
}

pub fn dialogue_task_id() -> &'static str {
    std::any::type_name::<DialogueTask>()
}

pub fn create_flow_runner(graph: Graph, session_storage: Arc<dyn SessionStorage>) -> FlowRunner {
    FlowRunner::new(Arc::new(graph), session_storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;
    use crate::testing::*;
    use crate::transcript::Transcript;
    use crate::validator::{FlagKind, ValidationFlag, ValidatorConfig};
    use review_flow::{ExecutionStatus, InMemorySessionStorage};

    struct Harness {
        mocks: MockTeam,
        storage: Arc<InMemorySessionStorage>,
        runner: FlowRunner,
    }

    fn harness() -> Harness {
        let mocks = mock_team();
        let storage = Arc::new(InMemorySessionStorage::new());
        let graph = build_review_workflow(
            mocks.team.clone(),
            Arc::new(ResponseValidator::new(ValidatorConfig::default())),
        );
        let runner = create_flow_runner(graph, storage.clone());
        Harness {
            mocks,
            storage,
            runner,
        }
    }

    async fn start_review(h: &Harness, specialists: Vec<Specialist>) -> String {
        let session = create_review_session(ReviewSetup {
            article: Article::new(Some("Bridge falls".to_string()), ARTICLE_BODY),
            options: ReviewOptions::default(),
            specialists,
            template_version: TemplateVersion::Enhanced,
        })
        .await;
        let id = session.id.clone();
        h.storage.save(session).await.unwrap();

        let result = h.runner.run(&id).await.unwrap();
        assert_eq!(result.status, ExecutionStatus::WaitingForInput);
        id
    }

    async fn ask(h: &Harness, id: &str, question: &str) {
        let session = h.storage.get(id).await.unwrap().unwrap();
        session
            .context
            .set(session_keys::PENDING_QUESTION, question)
            .await;
        h.storage.save(session).await.unwrap();
        h.runner.run(id).await.unwrap();
    }

    async fn transcript(h: &Harness, id: &str) -> Transcript {
        let session = h.storage.get(id).await.unwrap().unwrap();
        session
            .context
            .get(session_keys::TRANSCRIPT)
            .await
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn review_synthesizes_every_panel_output() {
        let h = harness();
        let id = start_review(&h, Specialist::DEFAULT_PANEL.to_vec()).await;

        let session = h.storage.get(&id).await.unwrap().unwrap();
        assert_eq!(session.current_task_id, dialogue_task_id());
        assert_eq!(
            session.context.get::<bool>(session_keys::REVIEW_COMPLETE).await,
            Some(true)
        );

        // Claude is only the editor here, so it saw exactly one request.
        let claude = h.mocks.claude.requests();
        assert_eq!(claude.len(), 1);
        for reply in [GPT_REPLY, GEMINI_REPLY, PERPLEXITY_REPLY] {
            assert!(claude[0].prompt.contains(reply), "missing {reply}");
        }
        assert!(h.mocks.gpt.requests()[0].prompt.contains(ARTICLE_BODY));

        let flags: Vec<ValidationFlag> = session
            .context
            .get(session_keys::SYNTHESIS_FLAGS)
            .await
            .unwrap();
        assert!(flags.is_empty());
    }

    #[tokio::test]
    async fn claude_joins_the_panel_when_selected() {
        let h = harness();
        let id = start_review(&h, vec![Specialist::Gpt, Specialist::Claude]).await;

        assert_eq!(h.mocks.claude.requests().len(), 2);
        let session = h.storage.get(&id).await.unwrap().unwrap();
        let responses: crate::models::SpecialistResponses = session
            .context
            .get(session_keys::SPECIALIST_RESPONSES)
            .await
            .unwrap();
        assert_eq!(
            responses.keys().copied().collect::<Vec<_>>(),
            vec![Specialist::Gpt, Specialist::Claude]
        );
    }

    #[tokio::test]
    async fn dialogue_replays_prior_turns_in_order() {
        let h = harness();
        let id = start_review(&h, Specialist::DEFAULT_PANEL.to_vec()).await;

        for question in ["Is the lede clear?", "What about the age?", "Anything else?"] {
            ask(&h, &id, question).await;
        }

        let requests = h.mocks.claude.requests();
        let last = requests.last().unwrap();
        assert_eq!(last.prompt, "Anything else?");
        assert!(last.system.as_deref().unwrap().contains(ARTICLE_BODY));

        let transcript = transcript(&h, &id).await;
        assert_eq!(transcript.len(), 3);

        let expected: Vec<ChatMessage> = transcript.turns()[..2]
            .iter()
            .flat_map(|turn| {
                [
                    ChatMessage::user(turn.question.clone()),
                    ChatMessage::assistant(turn.answer.clone()),
                ]
            })
            .collect();
        assert_eq!(last.history, expected);
        assert_eq!(last.history[0].content, "Is the lede clear?");
        assert_eq!(last.history[2].content, "What about the age?");
        assert_eq!(
            last.history[3].content,
            "Answer to: What about the age?. GPT-4 asked you to \"verify her age\"."
        );

        // The first follow-up was asked with no history at all.
        assert!(requests[1].history.is_empty());
        assert!(transcript.turns().iter().all(|t| t.flags.is_empty()));
    }

    #[tokio::test]
    async fn misquoted_answer_is_flagged_once() {
        let h = harness();
        let id = start_review(&h, Specialist::DEFAULT_PANEL.to_vec()).await;

        ask(&h, &id, "Did it happen on Monday?").await;

        let transcript = transcript(&h, &id).await;
        let turn = transcript.last().unwrap();
        assert_eq!(turn.flags.len(), 1);
        assert_eq!(turn.flags[0].kind, FlagKind::UnverifiedQuote);
        assert!(!turn.answer.contains("VALIDATION WARNINGS"));

        let session = h.storage.get(&id).await.unwrap().unwrap();
        let history: Vec<ValidationFlag> = session
            .context
            .get(session_keys::VALIDATION_HISTORY)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn dialogue_without_question_fails() {
        let h = harness();
        let id = start_review(&h, vec![Specialist::Gemini]).await;

        assert!(h.runner.run(&id).await.is_err());
        let session = h.storage.get(&id).await.unwrap().unwrap();
        assert_eq!(session.current_task_id, dialogue_task_id());
    }
}

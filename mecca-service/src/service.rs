use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::{Json, Response},
    routing::{get, post},
};
use dashmap::DashMap;
use review_flow::{ExecutionStatus, InMemorySessionStorage, Session, SessionStorage};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info};
use uuid::Uuid;

use crate::{
    article::Article,
    config::ServiceConfig,
    llm::{EditorialTeam, Specialist},
    models::{
        AskRequest, AskResponse, QueryRequest, QueryResponse, ReviewRequest, ReviewResponse,
        SessionSnapshot,
    },
    prompts::TemplateVersion,
    tasks::session_keys,
    transcript::Transcript,
    validator::{ResponseValidator, ValidationFlag, warning_block},
    workflow::{
        ReviewSetup, build_review_workflow, create_flow_runner, create_review_session,
        dialogue_task_id,
    },
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;
type ApiError = (StatusCode, Json<Value>);

const CORRELATION_HEADER: &str = "x-correlation-id";

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn not_found_error(message: &str, id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": message,
            "session_id": id
        })),
    )
}

fn conflict_error(message: &str, id: &str) -> ApiError {
    (
        StatusCode::CONFLICT,
        Json(json!({
            "error": message,
            "session_id": id
        })),
    )
}

fn internal_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub session_storage: Arc<dyn SessionStorage>,
    pub flow_runner: review_flow::FlowRunner,
    pub team: Arc<EditorialTeam>,
    pub default_template: TemplateVersion,
    /// One lock per session; a request that advances a session's workflow
    /// holds it until the session has been read back.
    pub session_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl AppState {
    fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.session_locks
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }
}

pub fn create_app(config: &ServiceConfig) -> anyhow::Result<Router> {
    let team = Arc::new(EditorialTeam::from_config(config)?);
    let validator = ResponseValidator::new(config.validator.clone());
    let session_storage = Arc::new(InMemorySessionStorage::with_ttl(config.session_ttl));
    Ok(build_app(
        team,
        validator,
        config.template_version,
        session_storage,
    ))
}

/// Router over the given session store, team and validator.
pub fn build_app(
    team: Arc<EditorialTeam>,
    validator: ResponseValidator,
    default_template: TemplateVersion,
    session_storage: Arc<dyn SessionStorage>,
) -> Router {
    let graph = build_review_workflow(team.clone(), Arc::new(validator));
    let flow_runner = create_flow_runner(graph, session_storage.clone());

    build_router(AppState {
        session_storage,
        flow_runner,
        team,
        default_template,
        session_locks: Arc::new(DashMap::new()),
    })
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/reviews", post(start_review))
        .route("/reviews/{session_id}", get(get_review).delete(delete_review))
        .route("/reviews/{session_id}/questions", post(ask_question))
        .route("/queries", post(query_models))
        .route("/diagnostics/connections", get(test_connections))
        .layer(from_fn(correlation_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Tag every request with a correlation id, in a span and on the response.
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let header = HeaderValue::from_str(&correlation_id).ok();
    if let Some(value) = &header {
        request.headers_mut().insert(CORRELATION_HEADER, value.clone());
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    let mut response = next.run(request).instrument(span).await;
    if let Some(value) = header {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "MECCA Editorial Review Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Specialist LLM reviews synthesized by an Editor-in-Chief, with follow-up dialogue",
        "endpoints": {
            "POST /reviews": "Start a new article review",
            "GET /reviews/{session_id}": "Get review state, synthesis and dialogue",
            "POST /reviews/{session_id}/questions": "Ask the Editor-in-Chief a follow-up question",
            "DELETE /reviews/{session_id}": "Discard a review session",
            "POST /queries": "Send one raw prompt to several models",
            "GET /diagnostics/connections": "Test every vendor connection",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn start_review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> ApiResult<ReviewResponse> {
    if request.article.trim().is_empty() {
        return Err(bad_request_error("Article text is required"));
    }
    let specialists = request
        .specialists
        .unwrap_or_else(|| Specialist::DEFAULT_PANEL.to_vec());
    if specialists.is_empty() {
        return Err(bad_request_error("Select at least one specialist"));
    }

    let template_version = request.template_version.unwrap_or(state.default_template);
    info!(
        chars = request.article.len(),
        specialists = ?specialists,
        template = %template_version,
        "starting review"
    );

    let session = create_review_session(ReviewSetup {
        article: Article::new(request.headline, request.article),
        options: request.options,
        specialists,
        template_version,
    })
    .await;
    let session_id = session.id.clone();

    save_session(&state, session).await?;
    run_workflow(&state, &session_id).await?;

    let session = load_session(&state, &session_id).await?;
    let context = &session.context;
    let synthesis = context
        .get(session_keys::SYNTHESIS)
        .await
        .ok_or_else(|| internal_error("Review finished without a synthesis", &session_id))?;

    Ok(Json(ReviewResponse {
        session_id,
        status: "ready_for_questions".to_string(),
        synthesis,
        specialist_responses: context
            .get(session_keys::SPECIALIST_RESPONSES)
            .await
            .unwrap_or_default(),
        validation_flags: context
            .get(session_keys::SYNTHESIS_FLAGS)
            .await
            .unwrap_or_default(),
    }))
}

async fn get_review(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<SessionSnapshot> {
    let session = load_session(&state, &session_id).await?;
    Ok(Json(build_snapshot(&session).await))
}

async fn ask_question(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<AskRequest>,
) -> ApiResult<AskResponse> {
    if request.question.trim().is_empty() {
        return Err(bad_request_error("Question cannot be empty"));
    }

    if let Err(e) = load_session(&state, &session_id).await {
        state.session_locks.remove(&session_id);
        return Err(e);
    }
    let lock = state.session_lock(&session_id);
    let _guard = lock.lock().await;

    let session = load_session(&state, &session_id).await?;
    let review_complete: bool = session
        .context
        .get(session_keys::REVIEW_COMPLETE)
        .await
        .unwrap_or(false);
    if !review_complete || session.current_task_id != dialogue_task_id() {
        return Err(conflict_error(
            "Review is not ready for questions",
            &session_id,
        ));
    }

    info!(session_id = %session_id, "follow-up question received");
    session
        .context
        .set(session_keys::PENDING_QUESTION, &request.question)
        .await;
    save_session(&state, session).await?;
    run_workflow(&state, &session_id).await?;

    let session = load_session(&state, &session_id).await?;
    let transcript: Transcript = session
        .context
        .get(session_keys::TRANSCRIPT)
        .await
        .unwrap_or_default();
    let turn = transcript
        .last()
        .ok_or_else(|| internal_error("Dialogue turn was not recorded", &session_id))?;

    Ok(Json(AskResponse {
        session_id: session_id.clone(),
        turn: transcript.len(),
        answer: format!("{}{}", turn.answer, warning_block(&turn.flags)),
        flags: turn.flags.clone(),
    }))
}

async fn delete_review(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.session_storage.delete(&session_id).await {
        Ok(true) => {
            state.session_locks.remove(&session_id);
            info!(session_id = %session_id, "review discarded");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(not_found_error("Session not found", &session_id)),
        Err(e) => {
            error!("Failed to delete session {}: {}", session_id, e);
            Err(internal_error("Failed to delete session", &e.to_string()))
        }
    }
}

async fn query_models(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<QueryResponse> {
    if request.query.trim().is_empty() {
        return Err(bad_request_error("Please enter a query"));
    }
    let models = request.models.unwrap_or_else(|| Specialist::ALL.to_vec());
    if models.is_empty() {
        return Err(bad_request_error("Please select at least one model"));
    }

    info!(models = ?models, "querying models");
    let responses = state.team.query_all(&request.query, &models).await;

    Ok(Json(QueryResponse {
        query: request.query,
        timestamp: chrono::Utc::now().to_rfc3339(),
        responses,
    }))
}

async fn test_connections(State(state): State<AppState>) -> Json<Value> {
    let results = state.team.test_connections().await;
    Json(json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "results": results
    }))
}

async fn load_session(state: &AppState, session_id: &str) -> Result<Session, ApiError> {
    match state.session_storage.get(session_id).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(not_found_error("Session not found", session_id)),
        Err(e) => {
            error!("Failed to load session {}: {}", session_id, e);
            Err(internal_error("Failed to load session", &e.to_string()))
        }
    }
}

async fn save_session(state: &AppState, session: Session) -> Result<(), ApiError> {
    state.session_storage.save(session).await.map_err(|e| {
        error!("Failed to save session: {}", e);
        internal_error("Failed to save review session", &e.to_string())
    })
}

async fn run_workflow(state: &AppState, session_id: &str) -> Result<(), ApiError> {
    match state.flow_runner.run(session_id).await {
        Ok(result) => {
            info!(
                "Workflow step finished for session {}: {:?}",
                session_id, result.status
            );
            if result.status == ExecutionStatus::Completed {
                error!("Review workflow ended unexpectedly for session {}", session_id);
            }
            Ok(())
        }
        Err(e) => {
            error!("Workflow failed for session {}: {}", session_id, e);
            Err(internal_error("Review workflow failed", &e.to_string()))
        }
    }
}

async fn build_snapshot(session: &Session) -> SessionSnapshot {
    let context = &session.context;
    let transcript: Transcript = context
        .get(session_keys::TRANSCRIPT)
        .await
        .unwrap_or_default();
    let validation_history: Vec<ValidationFlag> = context
        .get(session_keys::VALIDATION_HISTORY)
        .await
        .unwrap_or_default();

    SessionSnapshot {
        session_id: session.id.clone(),
        current_task: session.current_task_id.clone(),
        status_message: session.status_message.clone(),
        review_complete: context
            .get(session_keys::REVIEW_COMPLETE)
            .await
            .unwrap_or(false),
        template_version: context.get(session_keys::TEMPLATE_VERSION).await,
        article: context.get(session_keys::ARTICLE).await,
        options: context.get(session_keys::OPTIONS).await,
        specialists: context
            .get(session_keys::SELECTED_SPECIALISTS)
            .await
            .unwrap_or_default(),
        specialist_responses: context
            .get(session_keys::SPECIALIST_RESPONSES)
            .await
            .unwrap_or_default(),
        synthesis: context.get(session_keys::SYNTHESIS).await,
        transcript: transcript.into_turns(),
        validation_history,
    }
}

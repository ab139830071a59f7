//! Question endpoints.
//!
//! `POST /chat` (text search): blank check -> co-lead clarification -> knowledge base ->
//! fallback provider on no-match.
//!
//! `POST /voice`: blank check -> knowledge base -> fixed refusal on no-match. The voice
//! path never clarifies and never calls the fallback provider.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use electra_core::{EngineError, FallbackError, Intent, MatchOutcome};
use serde::{Deserialize, Serialize};

use crate::AppState;

pub(crate) const EMPTY_CHAT_PROMPT: &str = "Ask a question about G-electra Club.";
pub(crate) const EMPTY_VOICE_PROMPT: &str = "Please ask again.";
pub(crate) const VOICE_REFUSAL: &str = "I can answer only about G-electra Club information.";

/// Body of both question endpoints. A missing `question` is treated as blank.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRequest {
    #[serde(default)]
    question: Option<String>,
}

impl QuestionRequest {
    fn trimmed(&self) -> &str {
        self.question.as_deref().unwrap_or("").trim()
    }
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AnswerSource {
    Prompt,
    Clarification,
    Knowledge,
    Fallback,
    Refusal,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnswerResponse {
    answer: String,
    source: AnswerSource,
    /// Matched rule, present only for knowledge-base answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    intent: Option<Intent>,
}

fn reply(answer: impl Into<String>, source: AnswerSource) -> Json<AnswerResponse> {
    Json(AnswerResponse {
        answer: answer.into(),
        source,
        intent: None,
    })
}

fn knowledge_reply(intent: Intent, text: String) -> Json<AnswerResponse> {
    Json(AnswerResponse {
        answer: text,
        source: AnswerSource::Knowledge,
        intent: Some(intent),
    })
}

/// Failure surfaced to the client as a JSON error body.
#[derive(Debug)]
pub(crate) enum ApiError {
    Engine(EngineError),
    Fallback(FallbackError),
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        ApiError::Engine(e)
    }
}

impl From<FallbackError> for ApiError {
    fn from(e: FallbackError) -> Self {
        ApiError::Fallback(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Engine(e) => (StatusCode::INTERNAL_SERVER_ERROR, "missing_record", e.to_string()),
            ApiError::Fallback(e) => (StatusCode::BAD_GATEWAY, e.code(), e.to_string()),
        };
        let body = serde_json::json!({
            "status": "error",
            "code": code,
            "error": message,
        });
        (status, axum::Json(body)).into_response()
    }
}

/// POST /chat – text search.
pub(crate) async fn chat(
    State(state): State<AppState>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    let question = req.trimmed();
    if question.is_empty() {
        return Ok(reply(EMPTY_CHAT_PROMPT, AnswerSource::Prompt));
    }
    tracing::info!(target: "electra::chat", %request_id, "Chat question received: {} chars", question.len());

    if let Some(message) = state.engine.resolve_clarification(question) {
        tracing::info!(target: "electra::chat", %request_id, "Co-lead question without wing; asking back");
        return Ok(reply(message, AnswerSource::Clarification));
    }

    match state.engine.answer(question) {
        Ok(MatchOutcome::Answered { intent, text }) => {
            tracing::info!(target: "electra::chat", %request_id, ?intent, "Answered from knowledge base");
            Ok(knowledge_reply(intent, text))
        }
        Ok(MatchOutcome::NoMatch) => {
            let answer = state.fallback.ask(question).await.map_err(|e| {
                tracing::error!(target: "electra::chat", %request_id, provider = state.fallback.name(), error = %e, "Fallback failed");
                e
            })?;
            Ok(reply(answer, AnswerSource::Fallback))
        }
        Err(e) => {
            tracing::error!(target: "electra::chat", %request_id, error = %e, "Knowledge base is missing a referenced record");
            Err(e.into())
        }
    }
}

/// POST /voice – spoken questions; knowledge base only.
pub(crate) async fn voice(
    State(state): State<AppState>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    let question = req.trimmed();
    if question.is_empty() {
        return Ok(reply(EMPTY_VOICE_PROMPT, AnswerSource::Prompt));
    }
    tracing::info!(target: "electra::voice", %request_id, "Voice question received: {} chars", question.len());

    match state.engine.answer(question) {
        Ok(MatchOutcome::Answered { intent, text }) => {
            tracing::info!(target: "electra::voice", %request_id, ?intent, "Answered from knowledge base");
            Ok(knowledge_reply(intent, text))
        }
        Ok(MatchOutcome::NoMatch) => Ok(reply(VOICE_REFUSAL, AnswerSource::Refusal)),
        Err(e) => {
            tracing::error!(target: "electra::voice", %request_id, error = %e, "Knowledge base is missing a referenced record");
            Err(e.into())
        }
    }
}

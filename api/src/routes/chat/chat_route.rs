//! POST /api/ai/chat — answers a visitor question.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use tracing::info;

use crate::{
    core::app_state::AppState,
    routes::chat::{
        chat_request::{RequestError, parse_chat_request},
        chat_response::{ChatError, ChatResponse},
    },
};

/// Handler: POST /api/ai/chat
///
/// Never fails at the transport level: malformed bodies and unexpected
/// upstream errors still produce `200` with a generic answer.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/api/ai/chat \
///   -H 'content-type: application/json' \
///   -d '{"question":"What internships has Rishav completed?","topic":"about"}'
/// ```
pub async fn ask_chat(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Json<ChatResponse> {
    Json(ChatResponse::compose(answer(&state, body).await))
}

async fn answer(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<answer_resolver::Answer, ChatError> {
    let body = body.map_err(RequestError::from)?;
    let question = parse_chat_request(&body)?;

    let answer = state.resolver.resolve(&question).await?;
    info!(
        topic = question.topic().as_str(),
        source = ?answer.source,
        has_diagnostic = answer.diagnostic.is_some(),
        "chat answered"
    );
    Ok(answer)
}

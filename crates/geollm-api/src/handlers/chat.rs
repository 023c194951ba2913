use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{ChatRequest, ChatResponse};
use crate::error::ApiError;
use crate::extract::LenientJson;
use crate::state::AppState;

pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    LenientJson(request): LenientJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let query = match request.query {
        Some(query) if !query.is_empty() => query,
        _ => {
            tracing::warn!("Empty query received");
            return Err(ApiError::bad_request("No query provided"));
        }
    };

    tracing::info!(query = %query, "Processing chat query");

    let response = state.responder.answer(&query).await;

    Ok(Json(ChatResponse { response }))
}

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{ToolCall, ToolRequest, ToolResponse};
use crate::error::ApiError;
use crate::extract::LenientJson;
use crate::services::ToolService;
use crate::state::AppState;

pub async fn handle_tool(
    State(state): State<Arc<AppState>>,
    LenientJson(request): LenientJson<ToolRequest>,
) -> Result<Json<ToolResponse>, ApiError> {
    let name = request
        .tool
        .filter(|tool| !tool.is_empty())
        .ok_or_else(|| ApiError::bad_request("No tool specified"))?;

    let call = ToolCall::from_request(&name, request.params)?;

    tracing::info!(tool = call.name(), "Running tool");

    let result = ToolService::run(&state, &call).await;

    Ok(Json(ToolResponse { tool: name, result }))
}

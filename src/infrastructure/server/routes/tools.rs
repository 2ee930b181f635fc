use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::debug;

use super::super::dto::ToolInventoryResponse;
use super::super::state::ServerState;
use crate::application::tooling::ToolSpec;

#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    responses(
        (status = 200, description = "Registered tool declarations", body = ToolInventoryResponse)
    )
)]
pub async fn tools_handler(State(state): State<Arc<ServerState>>) -> Json<ToolInventoryResponse> {
    let specs = state.registry().describe_all();
    debug!(tool_count = specs.len(), "serving /tools request");
    Json(ToolInventoryResponse {
        tools: specs.iter().map(ToolSpec::to_schema).collect(),
    })
}

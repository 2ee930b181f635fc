use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::super::dto::{AgentInvokeRequest, AgentInvokeResponse, AnswerMessage, ErrorResponse};
use super::super::state::ServerState;
use crate::application::agent::{AgentError, formatter};

#[utoipa::path(
    post,
    path = "/agent/invoke",
    tag = "agent",
    request_body = AgentInvokeRequest,
    responses(
        (status = 200, description = "Final answer produced", body = AgentInvokeResponse),
        (status = 400, description = "Malformed history or empty question", body = ErrorResponse),
        (status = 502, description = "Decision model could not be used", body = ErrorResponse)
    )
)]
pub async fn invoke_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<AgentInvokeRequest>,
) -> Result<Json<AgentInvokeResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        history = payload.chat_history.len(),
        "received /agent/invoke request"
    );

    let conversation = match formatter::to_conversation(&payload.chat_history, &payload.question) {
        Ok(conversation) => conversation,
        Err(err) => {
            error!(%err, "rejecting request at the boundary");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            ));
        }
    };

    match state.agent().run(conversation).await {
        Ok(outcome) => {
            info!(tool_steps = outcome.steps.len(), "agent run completed");
            let answer = formatter::to_response(outcome.answer);
            Ok(Json(AgentInvokeResponse {
                answer: AnswerMessage::assistant(answer.content),
                tool_steps: outcome.steps,
            }))
        }
        Err(err @ AgentError::Exhausted { .. }) => {
            // Degraded answer, not a server failure: the caller still gets
            // a single assistant message it can show to the user.
            warn!(%err, "agent ran out of decision rounds");
            Ok(Json(AgentInvokeResponse {
                answer: AnswerMessage::assistant(err.user_message()),
                tool_steps: Vec::new(),
            }))
        }
        Err(err) => {
            error!(%err, "agent run failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: err.user_message(),
                }),
            ))
        }
    }
}

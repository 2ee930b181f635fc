use super::dto::{
    AgentInvokeRequest, AgentInvokeResponse, AnswerMessage, ErrorResponse, ToolInventoryResponse,
};
use super::routes;
use crate::application::agent::AgentStep;
use crate::application::agent::formatter::HistoryMessage;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(routes::agent::invoke_handler, routes::tools::tools_handler),
    components(
        schemas(
            AgentInvokeRequest,
            AgentInvokeResponse,
            AnswerMessage,
            ErrorResponse,
            ToolInventoryResponse,
            AgentStep,
            HistoryMessage
        )
    ),
    tags(
        (name = "agent", description = "Conversational agent turns"),
        (name = "tools", description = "Registered tool inventory")
    )
)]
pub(super) struct ApiDoc;

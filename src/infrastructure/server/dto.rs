use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::application::agent::AgentStep;
use crate::application::agent::formatter::HistoryMessage;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AgentInvokeRequest {
    #[serde(default)]
    pub chat_history: Vec<HistoryMessage>,
    pub question: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AgentInvokeResponse {
    pub answer: AnswerMessage,
    pub tool_steps: Vec<AgentStep>,
}

/// The single assistant-role message the external contract promises.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerMessage {
    pub role: String,
    pub content: String,
}

impl AnswerMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolInventoryResponse {
    /// Tool declarations in the shape the decision model sees them.
    #[schema(value_type = Vec<Object>)]
    pub tools: Vec<Value>,
}

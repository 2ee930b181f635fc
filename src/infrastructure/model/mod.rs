mod openai;
mod types;

pub use openai::OpenAiDecisionModel;
pub use types::ModelError;

use async_trait::async_trait;

use crate::application::agent::AgentDecision;
use crate::application::tooling::ToolSpec;
use crate::domain::types::Conversation;

/// One call produces one decision: either a finished answer or a batch of
/// tool requests, never both.
#[async_trait]
pub trait DecisionModel: Send + Sync {
    async fn decide(
        &self,
        conversation: &Conversation,
        tools: &[ToolSpec],
    ) -> Result<AgentDecision, ModelError>;
}

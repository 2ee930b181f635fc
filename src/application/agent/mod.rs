mod decision;
mod errors;
pub mod formatter;
#[cfg(test)]
mod tests;

pub use decision::AgentDecision;
pub use errors::AgentError;
pub use formatter::InvalidHistoryError;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::application::tooling::ToolInvoker;
use crate::domain::types::{ChatMessage, Conversation};
use crate::infrastructure::model::DecisionModel;

/// Upper bound on decision rounds per request. The legacy executor looped
/// without one; a model/tool ping-pong would hang a request forever, so the
/// bound is load-bearing, not cosmetic.
pub const DEFAULT_MAX_ROUNDS: usize = 12;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AgentStep {
    pub tool: String,
    #[schema(value_type = Object)]
    pub input: Value,
    pub success: bool,
    #[schema(value_type = Object)]
    pub output: Value,
}

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub answer: String,
    pub steps: Vec<AgentStep>,
}

/// The orchestration loop: ask the model for a decision, dispatch any
/// requested tools, fold the results back in, repeat until a final answer
/// or the round bound.
pub struct Agent {
    model: Arc<dyn DecisionModel>,
    invoker: ToolInvoker,
    max_rounds: usize,
}

impl Agent {
    pub fn new(model: Arc<dyn DecisionModel>, invoker: ToolInvoker) -> Self {
        Self {
            model,
            invoker,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn invoker(&self) -> &ToolInvoker {
        &self.invoker
    }

    pub async fn run(&self, mut conversation: Conversation) -> Result<AgentOutcome, AgentError> {
        info!(turns = conversation.len(), "agent run started");
        let specs = self.invoker.registry().describe_all();
        let mut steps = Vec::new();

        for round in 0..self.max_rounds {
            debug!(round, "requesting next decision");
            match self.model.decide(&conversation, &specs).await? {
                AgentDecision::FinalAnswer(answer) => {
                    info!(
                        rounds = round + 1,
                        tool_steps = steps.len(),
                        "agent reached final answer"
                    );
                    return Ok(AgentOutcome { answer, steps });
                }
                AgentDecision::ToolRequests(invocations) => {
                    // Sequential and in decision order: later invocations may
                    // lean on results that are already in the conversation.
                    for invocation in invocations {
                        info!(tool = %invocation.name, "agent requested tool execution");
                        let result = self.invoker.invoke(invocation).await;
                        steps.push(AgentStep {
                            tool: result.invocation.name.clone(),
                            input: Value::Object(result.invocation.arguments.clone()),
                            success: result.succeeded(),
                            output: result.output(),
                        });
                        conversation.push(ChatMessage::tool_result(result.render()));
                    }
                }
            }
        }

        warn!(max_rounds = self.max_rounds, "agent exhausted its decision rounds");
        Err(AgentError::Exhausted {
            rounds: self.max_rounds,
        })
    }
}

use crate::application::tooling::ToolInvocation;

/// Outcome of one decision round: either the finished answer or an ordered
/// batch of tool requests. Never both.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentDecision {
    FinalAnswer(String),
    ToolRequests(Vec<ToolInvocation>),
}

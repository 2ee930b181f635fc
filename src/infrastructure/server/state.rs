use std::sync::Arc;

use crate::application::agent::Agent;
use crate::application::tooling::ToolRegistry;

pub(crate) struct ServerState {
    agent: Agent,
    registry: Arc<ToolRegistry>,
}

impl ServerState {
    pub(crate) fn new(agent: Agent, registry: Arc<ToolRegistry>) -> Self {
        Self { agent, registry }
    }

    pub(crate) fn agent(&self) -> &Agent {
        &self.agent
    }

    pub(crate) fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }
}

use thiserror::Error;

use crate::infrastructure::model::ModelError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("agent exhausted its {rounds} decision rounds without a final answer")]
    Exhausted { rounds: usize },
}

impl AgentError {
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Model(err) => err.user_message(),
            AgentError::Exhausted { .. } => {
                "I could not complete this request within the allowed number of steps. \
                 Please try rephrasing the question."
                    .to_string()
            }
        }
    }
}

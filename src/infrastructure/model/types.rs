use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("network error calling model provider: {0}")]
    Network(#[from] reqwest::Error),
    #[error("model provider returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("model response could not be interpreted as a decision: {0}")]
    DecisionParse(String),
}

impl ModelError {
    pub fn decision_parse(reason: impl Into<String>) -> Self {
        Self::DecisionParse(reason.into())
    }

    pub fn user_message(&self) -> String {
        match self {
            ModelError::Network(source) => {
                if source.is_connect() {
                    "Could not reach the model provider.".to_string()
                } else if source.is_timeout() {
                    "The model provider took too long to respond.".to_string()
                } else {
                    "A network error occurred while contacting the model provider.".to_string()
                }
            }
            ModelError::Status { status, .. } => {
                format!("The model provider rejected the request ({}).", status.as_u16())
            }
            ModelError::DecisionParse(_) => {
                "The model returned a response that could not be understood. Please try again."
                    .to_string()
            }
        }
    }
}

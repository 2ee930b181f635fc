mod invoker;
mod registry;

pub use invoker::{DEFAULT_TOOL_TIMEOUT, ToolInvoker};
pub use registry::{RegistryError, ToolRegistry};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
}

impl ParamKind {
    pub fn json_type(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
        }
    }

    pub(crate) fn matches(self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => value.as_i64().is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
}

/// Declared surface of one tool: the name the model selects it by, the
/// description that guides that selection, and the typed input parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    /// Render the spec as an OpenAI function-calling tool declaration.
    pub fn to_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in &self.params {
            properties.insert(
                param.name.to_string(),
                json!({
                    "type": param.kind.json_type(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(Value::from(param.name));
            }
        }
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                },
            },
        })
    }
}

/// One requested tool call, as parsed out of a model decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(Value),
    Failure(String),
}

/// Outcome of one invocation. Failures are descriptions, not errors: they
/// travel back into the conversation for the model to react to.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub invocation: ToolInvocation,
    pub outcome: ToolOutcome,
}

impl ToolResult {
    pub fn success(invocation: ToolInvocation, output: Value) -> Self {
        Self {
            invocation,
            outcome: ToolOutcome::Success(output),
        }
    }

    pub fn failure(invocation: ToolInvocation, cause: impl Into<String>) -> Self {
        Self {
            invocation,
            outcome: ToolOutcome::Failure(cause.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, ToolOutcome::Success(_))
    }

    pub fn output(&self) -> Value {
        match &self.outcome {
            ToolOutcome::Success(value) => value.clone(),
            ToolOutcome::Failure(cause) => Value::String(cause.clone()),
        }
    }

    /// Envelope appended to the conversation as a tool-result turn.
    pub fn render(&self) -> String {
        json!({
            "tool_result": {
                "tool": self.invocation.name,
                "success": self.succeeded(),
                "output": self.output(),
            }
        })
        .to_string()
    }
}

/// Execution fault reported by a tool body. Carries a human-readable cause
/// only; the invoker folds it into a failure [`ToolResult`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ToolFailure(pub String);

impl ToolFailure {
    pub fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn spec(&self) -> ToolSpec;

    /// Arguments have already been validated against [`Tool::spec`] when
    /// this is called through the invoker.
    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolFailure>;
}

pub(crate) fn string_argument<'a>(
    arguments: &'a Map<String, Value>,
    name: &str,
) -> Result<&'a str, ToolFailure> {
    arguments
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolFailure(format!("missing string parameter '{name}'")))
}

pub(crate) fn integer_argument(
    arguments: &Map<String, Value>,
    name: &str,
) -> Result<i64, ToolFailure> {
    arguments
        .get(name)
        .and_then(Value::as_i64)
        .ok_or_else(|| ToolFailure(format!("missing integer parameter '{name}'")))
}

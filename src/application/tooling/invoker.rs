use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::{ToolInvocation, ToolRegistry, ToolResult, ToolSpec};

pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes single tool invocations against the registry. `invoke` never
/// fails: unknown tools, bad arguments, execution faults and timeouts all
/// come back as failure results the conversation can absorb.
#[derive(Clone)]
pub struct ToolInvoker {
    registry: Arc<ToolRegistry>,
    timeout: Duration,
}

impl ToolInvoker {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub async fn invoke(&self, invocation: ToolInvocation) -> ToolResult {
        let tool = match self.registry.get(&invocation.name) {
            Ok(tool) => tool,
            Err(err) => {
                warn!(requested_tool = %invocation.name, "unknown tool requested");
                return ToolResult::failure(invocation, err.to_string());
            }
        };

        let spec = tool.spec();
        if let Err(cause) = validate_arguments(&spec, &invocation.arguments) {
            warn!(tool = spec.name, %cause, "rejecting tool invocation");
            return ToolResult::failure(
                invocation,
                format!("invalid arguments for '{}': {cause}", spec.name),
            );
        }

        debug!(tool = spec.name, "dispatching tool");
        match tokio::time::timeout(self.timeout, tool.call(&invocation.arguments)).await {
            Ok(Ok(output)) => {
                info!(tool = spec.name, success = true, "tool executed");
                ToolResult::success(invocation, output)
            }
            Ok(Err(fault)) => {
                warn!(tool = spec.name, %fault, "tool execution failed");
                ToolResult::failure(invocation, format!("tool '{}' failed: {fault}", spec.name))
            }
            Err(_) => {
                warn!(tool = spec.name, timeout = ?self.timeout, "tool execution timed out");
                ToolResult::failure(
                    invocation,
                    format!(
                        "tool '{}' timed out after {} seconds",
                        spec.name,
                        self.timeout.as_secs()
                    ),
                )
            }
        }
    }
}

fn validate_arguments(spec: &ToolSpec, arguments: &Map<String, Value>) -> Result<(), String> {
    for param in &spec.params {
        match arguments.get(param.name) {
            Some(value) if param.kind.matches(value) => {}
            Some(value) => {
                return Err(format!(
                    "parameter '{}' expects {}, got {value}",
                    param.name,
                    param.kind.json_type()
                ));
            }
            None if param.required => {
                return Err(format!("missing required parameter '{}'", param.name));
            }
            None => {}
        }
    }
    for key in arguments.keys() {
        if !spec.params.iter().any(|param| param.name == key) {
            return Err(format!("unexpected parameter '{key}'"));
        }
    }
    Ok(())
}

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::{Tool, ToolSpec};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Fixed set of callable capabilities, built once at startup and read-only
/// afterwards. `describe_all` preserves registration order so the model
/// always sees the tools presented the same way.
#[derive(Default)]
pub struct ToolRegistry {
    ordered: Vec<Arc<dyn Tool>>,
    index: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let name = tool.spec().name;
        let key = name.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(RegistryError::DuplicateTool(name.to_string()));
        }
        debug!(tool = name, "registering tool");
        self.index.insert(key, Arc::clone(&tool));
        self.ordered.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Tool>, RegistryError> {
        self.index
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))
    }

    pub fn describe_all(&self) -> Vec<ToolSpec> {
        self.ordered.iter().map(|tool| tool.spec()).collect()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

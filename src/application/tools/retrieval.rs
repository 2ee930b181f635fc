use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::application::tooling::{
    ParamKind, ParamSpec, Tool, ToolFailure, ToolSpec, string_argument,
};
use crate::infrastructure::retrieval::PassageIndex;

const TOP_K: usize = 4;
const NO_RESULTS_MARKER: &str = "No passages matched the query.";

/// Search over the prebuilt passage index. An empty or unavailable index is
/// not an error here; the model just sees that nothing matched.
pub struct PassageSearchTool {
    index: Arc<PassageIndex>,
}

impl PassageSearchTool {
    pub fn new(index: Arc<PassageIndex>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl Tool for PassageSearchTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "tomas_info",
            description: "Search for information about Tomas. For any questions about Tomas, \
                          you must use this tool!",
            params: vec![ParamSpec {
                name: "query",
                kind: ParamKind::String,
                description: "What to look up about Tomas",
                required: true,
            }],
        }
    }

    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolFailure> {
        let query = string_argument(arguments, "query")?;
        let hits = self.index.search(query, TOP_K);
        debug!(query, hits = hits.len(), "passage search completed");
        if hits.is_empty() {
            return Ok(Value::String(NO_RESULTS_MARKER.to_string()));
        }
        let joined = hits
            .iter()
            .map(|passage| passage.text)
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(Value::String(joined))
    }
}

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::application::tooling::{
    ParamKind, ParamSpec, Tool, ToolFailure, ToolSpec, integer_argument,
};

/// Adds two integers. Pure; fails only on argument validation (handled by
/// the invoker before the call) or integer overflow.
pub struct SumTool;

#[async_trait]
impl Tool for SumTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "sum",
            description: "Sums two numbers and returns a number",
            params: vec![
                ParamSpec {
                    name: "int1",
                    kind: ParamKind::Integer,
                    description: "First addend",
                    required: true,
                },
                ParamSpec {
                    name: "int2",
                    kind: ParamKind::Integer,
                    description: "Second addend",
                    required: true,
                },
            ],
        }
    }

    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolFailure> {
        let int1 = integer_argument(arguments, "int1")?;
        let int2 = integer_argument(arguments, "int2")?;
        let total = int1.checked_add(int2).ok_or_else(|| {
            ToolFailure(format!("sum of {int1} and {int2} overflows the integer range"))
        })?;
        Ok(Value::from(total))
    }
}

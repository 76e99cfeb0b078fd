//! Integer arithmetic tools for the react agent: `add`, `subtract`, `multiply`.
//!
//! Operands are `i64`; overflow wraps. Numbers arriving as integral floats or
//! numeric strings are coerced, anything else is `InvalidInput`.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
use crate::tools::r#trait::Tool;

pub const TOOL_ADD: &str = "add";
pub const TOOL_SUBTRACT: &str = "subtract";
pub const TOOL_MULTIPLY: &str = "multiply";

fn operands_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "a": { "type": "integer", "description": "First integer" },
            "b": { "type": "integer", "description": "Second integer" }
        },
        "required": ["a", "b"]
    })
}

/// Whole floats inside the i64 range; `as` would saturate anything beyond it.
fn integral_f64(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then(|| f as i64)
}

fn coerce_i64(args: &Value, key: &str) -> Result<i64, ToolSourceError> {
    let v = args
        .get(key)
        .ok_or_else(|| ToolSourceError::InvalidInput(format!("missing '{}'", key)))?;
    let n = match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>().ok().and_then(integral_f64)
            })
        }
        _ => None,
    };
    n.ok_or_else(|| ToolSourceError::InvalidInput(format!("'{}' must be an integer, got {}", key, v)))
}

fn operands(args: &Value) -> Result<(i64, i64), ToolSourceError> {
    Ok((coerce_i64(args, "a")?, coerce_i64(args, "b")?))
}

macro_rules! binary_tool {
    ($ty:ident, $name:expr, $desc:expr, $op:ident) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        #[async_trait]
        impl Tool for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn spec(&self) -> ToolSpec {
                ToolSpec {
                    name: $name.to_string(),
                    description: Some($desc.to_string()),
                    input_schema: operands_schema(),
                }
            }

            async fn call(
                &self,
                args: Value,
                _ctx: &mut ToolCallContext<'_>,
            ) -> Result<ToolCallContent, ToolSourceError> {
                let (a, b) = operands(&args)?;
                Ok(ToolCallContent::text(a.$op(b).to_string()))
            }
        }
    };
}

binary_tool!(AddTool, TOOL_ADD, "Adds two numbers together.", wrapping_add);
binary_tool!(
    SubtractTool,
    TOOL_SUBTRACT,
    "Subtracts the second number from the first.",
    wrapping_sub
);
binary_tool!(MultiplyTool, TOOL_MULTIPLY, "Multiplies two numbers.", wrapping_mul);

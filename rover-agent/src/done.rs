use async_trait::async_trait;
use rover_core::tool::required_str;
use rover_core::{ActionResult, Result, Tool};
use serde_json::{Value, json};

pub const DONE_TOOL_NAME: &str = "done";

/// Ends the run with the final answer.
pub struct DoneTool;

#[async_trait]
impl Tool for DoneTool {
    fn name(&self) -> &str {
        DONE_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Finish the task. Put the final answer in text and report whether the task succeeded."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "text": { "type": "string", "description": "Final answer for the user" },
                "success": { "type": "boolean", "description": "Whether the task was accomplished (default: true)" }
            },
            "required": ["text"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<ActionResult> {
        let text = required_str(&args, "text")?;
        let success = args.get("success").and_then(Value::as_bool).unwrap_or(true);
        Ok(ActionResult::done(text, success))
    }
}

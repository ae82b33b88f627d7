use crate::{ActionResult, FunctionDeclaration, Result};
use async_trait::async_trait;
use serde_json::Value;

/// An action the model can request.
///
/// `execute` returns `Err` only for calls that cannot be carried out at all
/// (malformed arguments). Failures of the action itself, like a missing
/// element, are reported through [`ActionResult::failure`] so the model can see
/// them on the next step.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Option<Value> {
        None
    }
    async fn execute(&self, args: Value) -> Result<ActionResult>;

    fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Reads a required string argument.
pub fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| crate::RoverError::Tool(format!("Missing '{}' parameter", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the given text"
        }

        fn parameters_schema(&self) -> Option<Value> {
            Some(json!({
                "type": "object",
                "properties": { "text": { "type": "string" } },
                "required": ["text"]
            }))
        }

        async fn execute(&self, args: Value) -> Result<ActionResult> {
            let text = required_str(&args, "text")?;
            Ok(ActionResult::extracted(text))
        }
    }

    #[test]
    fn test_declaration_from_tool() {
        let decl = EchoTool.declaration();
        assert_eq!(decl.name, "echo");
        assert_eq!(decl.description, "Echo the given text");
        assert_eq!(decl.parameters.unwrap()["required"][0], "text");
    }

    #[tokio::test]
    async fn test_missing_argument_is_tool_error() {
        let err = EchoTool.execute(json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Tool error: Missing 'text' parameter");
    }

    #[tokio::test]
    async fn test_execute() {
        let result = EchoTool.execute(json!({"text": "hi"})).await.unwrap();
        assert_eq!(result.extracted_content.as_deref(), Some("hi"));
    }
}

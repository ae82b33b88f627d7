use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponseData {
    pub name: String,
    pub response: serde_json::Value,
}

/// One turn of the conversation sent to (or received from) a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FunctionCall {
        name: String,
        args: serde_json::Value,
        /// Tool call ID for providers that use one. None for Gemini.
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Opaque signature Gemini attaches to calls made after thinking.
        /// It must be sent back unchanged with the call.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thought_signature: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    FunctionResponse {
        function_response: FunctionResponseData,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
}

impl Content {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into(), parts: Vec::new() }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text { text: text.into() });
        self
    }

    pub fn with_function_call(mut self, name: impl Into<String>, args: serde_json::Value) -> Self {
        self.parts.push(Part::function_call(name, args));
        self
    }

    /// Concatenated text of all text parts, or `None` when there is no text.
    pub fn text(&self) -> Option<String> {
        let text: Vec<&str> = self.parts.iter().filter_map(Part::text).collect();
        if text.is_empty() { None } else { Some(text.join("")) }
    }
}

impl Part {
    /// Returns the text content if this is a Text part, None otherwise
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn text_part(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn function_call(name: impl Into<String>, args: serde_json::Value) -> Self {
        Part::FunctionCall { name: name.into(), args, id: None, thought_signature: None }
    }

    pub fn function_response(name: impl Into<String>, response: serde_json::Value) -> Self {
        Part::FunctionResponse {
            function_response: FunctionResponseData { name: name.into(), response },
            id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_text_joins_parts() {
        let content = Content::new("model")
            .with_text("Hello, ")
            .with_function_call("go_to_url", json!({"url": "https://duckduckgo.com"}))
            .with_text("world");
        assert_eq!(content.text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_content_without_text() {
        let content = Content::new("model").with_function_call("go_back", json!({}));
        assert_eq!(content.text(), None);
    }

    #[test]
    fn test_function_response_serializes_camel_case() {
        let part = Part::function_response("go_back", json!({"ok": true}));
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value["functionResponse"]["name"], "go_back");
        assert!(value.get("id").is_none());
    }
}

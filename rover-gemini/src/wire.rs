//! JSON shapes of the `generateContent` endpoint and conversions from/to the
//! provider-neutral types in `rover-core`.

use crate::safety::SafetySetting;
use rover_core::{
    Content, FinishReason, FunctionDeclaration, GenerateContentConfig, LlmResponse, Part,
    UsageMetadata,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<WireContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum WirePart {
    Text {
        text: String,
        /// Set on thought summaries, which are not part of the answer.
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        thought: bool,
    },
    #[serde(rename_all = "camelCase")]
    FunctionCall {
        function_call: WireFunctionCall,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thought_signature: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    FunctionResponse {
        function_response: WireFunctionResponse,
    },
    /// Parts we do not use (inline data, executable code, ...).
    Other(Value),
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireFunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireTool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<WireUsage>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<WireContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireUsage {
    pub prompt_token_count: Option<i32>,
    pub candidates_token_count: Option<i32>,
    pub total_token_count: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl From<&Content> for WireContent {
    fn from(content: &Content) -> Self {
        let parts = content
            .parts
            .iter()
            .map(|part| match part {
                Part::Text { text } => WirePart::Text { text: text.clone(), thought: false },
                Part::FunctionCall { name, args, thought_signature, .. } => WirePart::FunctionCall {
                    function_call: WireFunctionCall { name: name.clone(), args: args.clone() },
                    thought_signature: thought_signature.clone(),
                },
                Part::FunctionResponse { function_response, .. } => WirePart::FunctionResponse {
                    function_response: WireFunctionResponse {
                        name: function_response.name.clone(),
                        response: function_response.response.clone(),
                    },
                },
            })
            .collect();

        Self { role: Some(content.role.clone()), parts }
    }
}

impl WireContent {
    pub fn system(text: &str) -> Self {
        Self { role: None, parts: vec![WirePart::Text { text: text.to_string(), thought: false }] }
    }

    fn into_content(self) -> Content {
        let parts = self
            .parts
            .into_iter()
            .filter_map(|p| match p {
                WirePart::Text { thought: true, .. } => None,
                WirePart::Text { text, .. } => Some(Part::Text { text }),
                WirePart::FunctionCall { function_call, thought_signature } => {
                    Some(Part::FunctionCall {
                        name: function_call.name,
                        args: function_call.args,
                        id: None,
                        thought_signature,
                    })
                }
                WirePart::FunctionResponse { function_response } => {
                    Some(Part::function_response(function_response.name, function_response.response))
                }
                WirePart::Other(_) => None,
            })
            .collect();

        Content { role: self.role.unwrap_or_else(|| "model".to_string()), parts }
    }
}

impl GenerationConfig {
    /// Request settings win over the client's defaults field by field.
    pub fn merge(request: Option<&GenerateContentConfig>, default_temperature: Option<f32>) -> Option<Self> {
        let request = request.cloned().unwrap_or_default();
        let config = Self {
            temperature: request.temperature.or(default_temperature),
            top_p: request.top_p,
            top_k: request.top_k,
            max_output_tokens: request.max_output_tokens,
        };

        let empty = config.temperature.is_none()
            && config.top_p.is_none()
            && config.top_k.is_none()
            && config.max_output_tokens.is_none();
        if empty { None } else { Some(config) }
    }
}

fn convert_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::MaxTokens,
        "SAFETY" => FinishReason::Safety,
        "RECITATION" => FinishReason::Recitation,
        _ => FinishReason::Other,
    }
}

impl GenerateContentResponse {
    pub fn into_llm_response(self) -> LlmResponse {
        let usage_metadata = self.usage_metadata.map(|u| UsageMetadata {
            prompt_token_count: u.prompt_token_count.unwrap_or(0),
            candidates_token_count: u.candidates_token_count.unwrap_or(0),
            total_token_count: u.total_token_count.unwrap_or(0),
        });

        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = block_reason.unwrap_or_else(|| "NO_CANDIDATES".to_string());
            let mut response =
                LlmResponse::error(reason.clone(), format!("Gemini returned no candidates ({})", reason));
            response.usage_metadata = usage_metadata;
            return response;
        };

        let content = candidate.content.map(WireContent::into_content).filter(|c| !c.parts.is_empty());
        let finish_reason = candidate.finish_reason.as_deref().map(convert_finish_reason);

        // A candidate cut off by a filter or the token limit often has no parts.
        if let (None, Some(reason)) = (&content, finish_reason) {
            if reason != FinishReason::Stop {
                let code = candidate.finish_reason.unwrap_or_else(|| reason.as_str().to_string());
                let mut response =
                    LlmResponse::error(code.clone(), format!("Gemini returned no content ({})", code));
                response.usage_metadata = usage_metadata;
                response.finish_reason = Some(reason);
                return response;
            }
        }

        LlmResponse { content, usage_metadata, finish_reason, error_code: None, error_message: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_with_unknown_parts() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "Let me search."},
                        {"executableCode": {"language": "PYTHON", "code": "print(1)"}},
                        {"functionCall": {"name": "search_duckduckgo", "args": {"query": "rust"}}}
                    ]
                },
                "finishReason": "STOP"
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let response = response.into_llm_response();

        let content = response.content.unwrap();
        assert_eq!(content.parts.len(), 2);
        assert_eq!(content.parts[0].text(), Some("Let me search."));
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
    }

    #[test]
    fn test_thought_parts_and_signatures() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "The user wants the docs page, so I should search.", "thought": true},
                        {"functionCall": {"name": "search_duckduckgo", "args": {"query": "rust"}}, "thoughtSignature": "c2lnLTE="}
                    ]
                },
                "finishReason": "STOP"
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let content = response.into_llm_response().content.unwrap();

        assert_eq!(content.text(), None);
        assert_eq!(content.parts.len(), 1);
        match &content.parts[0] {
            Part::FunctionCall { thought_signature, .. } => {
                assert_eq!(thought_signature.as_deref(), Some("c2lnLTE="))
            }
            other => panic!("unexpected part: {other:?}"),
        }

        let echoed = serde_json::to_value(WireContent::from(&content)).unwrap();
        assert_eq!(echoed["parts"][0]["thoughtSignature"], "c2lnLTE=");
        assert_eq!(echoed["parts"][0]["functionCall"]["name"], "search_duckduckgo");
    }

    #[test]
    fn test_empty_candidate_with_finish_reason_is_error() {
        for reason in ["SAFETY", "RECITATION", "MAX_TOKENS", "BLOCKLIST"] {
            let raw = json!({"candidates": [{"finishReason": reason}]});
            let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
            let response = response.into_llm_response();

            assert!(response.content.is_none());
            assert_eq!(response.error_code.as_deref(), Some(reason));
            assert!(response.error_message.unwrap().contains(reason));
        }

        let raw = json!({"candidates": [{"content": {"role": "model", "parts": [{"text": "partial"}]}, "finishReason": "MAX_TOKENS"}]});
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let response = response.into_llm_response();
        assert!(response.error_code.is_none());
        assert_eq!(response.finish_reason, Some(FinishReason::MaxTokens));
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![WireContent::from(
                &Content::new("user").with_text("Find the docs"),
            )],
            system_instruction: Some(WireContent::system("You browse the web.")),
            tools: vec![],
            generation_config: GenerationConfig::merge(None, Some(0.0)),
            safety_settings: vec![],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "You browse the web.");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["generationConfig"], json!({"temperature": 0.0}));
        assert!(value.get("tools").is_none());
        assert!(value.get("safetySettings").is_none());
    }

    #[test]
    fn test_merge_prefers_request() {
        let request = GenerateContentConfig { temperature: Some(1.0), ..Default::default() };
        let merged = GenerationConfig::merge(Some(&request), Some(0.0)).unwrap();
        assert_eq!(merged.temperature, Some(1.0));
        assert!(GenerationConfig::merge(None, None).is_none());
    }
}

use rover_core::{
    Content, FinishReason, FunctionDeclaration, GenerateContentConfig, Llm, LlmRequest, Part,
    RoverError,
};
use rover_gemini::{GeminiModel, HarmBlockThreshold, HarmCategory, SafetySetting};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn model_for(server: &MockServer) -> GeminiModel {
    GeminiModel::new("test-key", "gemini-pro")
        .unwrap()
        .with_base_url(Url::parse(&server.uri()).unwrap())
}

fn text_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3, "totalTokenCount": 15}
    })
}

#[tokio::test]
async fn test_request_carries_model_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-pro:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Go to duckduckgo.com"}]}],
            "systemInstruction": {"parts": [{"text": "You control a browser."}]},
            "generationConfig": {"temperature": 0.0},
            "safetySettings": [
                {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE"}
            ],
            "tools": [{"functionDeclarations": [{"name": "go_to_url", "description": "Open a URL"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let model = model_for(&server).with_temperature(0.0).with_safety_settings(vec![
        SafetySetting::new(HarmCategory::DangerousContent, HarmBlockThreshold::BlockNone),
    ]);

    let mut request =
        LlmRequest::new("gemini-pro", vec![Content::new("user").with_text("Go to duckduckgo.com")]);
    request.system_instruction = Some("You control a browser.".to_string());
    request.tools.push(FunctionDeclaration {
        name: "go_to_url".to_string(),
        description: "Open a URL".to_string(),
        parameters: None,
    });

    let response = model.generate_content(request).await.unwrap();
    assert_eq!(response.text().as_deref(), Some("ok"));
    assert_eq!(response.finish_reason, Some(FinishReason::Stop));
    assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 12);
}

#[tokio::test]
async fn test_request_config_overrides_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"generationConfig": {"temperature": 1.0, "maxOutputTokens": 256}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let model = model_for(&server).with_temperature(0.0);
    let mut request = LlmRequest::new("gemini-pro", vec![Content::new("user").with_text("hi")]);
    request.config = Some(GenerateContentConfig {
        temperature: Some(1.0),
        max_output_tokens: Some(256),
        ..Default::default()
    });

    model.generate_content(request).await.unwrap();
}

#[tokio::test]
async fn test_function_call_and_response_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "search"}]},
                {"role": "model", "parts": [{"functionCall": {"name": "search_duckduckgo", "args": {"query": "rust"}}}]},
                {"role": "user", "parts": [{"functionResponse": {"name": "search_duckduckgo", "response": {"extracted_content": "results"}}}]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"functionCall": {"name": "done", "args": {"text": "https://docs.rs", "success": true}}}
                ]}
            }]
        })))
        .mount(&server)
        .await;

    let contents = vec![
        Content::new("user").with_text("search"),
        Content::new("model").with_function_call("search_duckduckgo", json!({"query": "rust"})),
        Content {
            role: "user".to_string(),
            parts: vec![Part::function_response(
                "search_duckduckgo",
                json!({"extracted_content": "results"}),
            )],
        },
    ];

    let response =
        model_for(&server).generate_content(LlmRequest::new("gemini-pro", contents)).await.unwrap();
    let calls = response.function_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "done");
    assert_eq!(calls[0].1["text"], "https://docs.rs");
}

#[tokio::test]
async fn test_blocked_prompt_becomes_error_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let response = model_for(&server)
        .generate_content(LlmRequest::new("gemini-pro", vec![Content::new("user").with_text("x")]))
        .await
        .unwrap();
    assert!(response.content.is_none());
    assert_eq!(response.error_code.as_deref(), Some("SAFETY"));
    assert!(response.error_message.unwrap().contains("SAFETY"));
}

#[tokio::test]
async fn test_safety_stop_without_content_becomes_error_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"finishReason": "SAFETY"}],
            "usageMetadata": {"promptTokenCount": 40, "totalTokenCount": 40}
        })))
        .mount(&server)
        .await;

    let response = model_for(&server)
        .generate_content(LlmRequest::new("gemini-pro", vec![Content::new("user").with_text("x")]))
        .await
        .unwrap();

    assert!(response.content.is_none());
    assert!(response.function_calls().is_empty());
    assert_eq!(response.finish_reason, Some(FinishReason::Safety));
    assert_eq!(response.error_code.as_deref(), Some("SAFETY"));
    assert_eq!(response.error_message.as_deref(), Some("Gemini returned no content (SAFETY)"));
    assert_eq!(response.usage_metadata.map(|u| u.prompt_token_count), Some(40));
}

#[tokio::test]
async fn test_http_error_is_model_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = model_for(&server)
        .generate_content(LlmRequest::new("gemini-pro", vec![Content::new("user").with_text("x")]))
        .await
        .unwrap_err();
    match err {
        RoverError::Model(msg) => {
            assert!(msg.contains("code 400"));
            assert!(msg.contains("API key not valid"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_construction_sends_nothing() {
    let server = MockServer::start().await;

    let model = model_for(&server)
        .with_temperature(0.0)
        .with_safety_settings(SafetySetting::for_all(HarmBlockThreshold::BlockOnlyHigh));
    assert_eq!(model.temperature(), Some(0.0));
    assert_eq!(model.safety_settings().len(), 4);

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

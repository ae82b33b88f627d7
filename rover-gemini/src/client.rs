use crate::safety::SafetySetting;
use crate::wire::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, WireContent, WireTool};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use rover_core::{Llm, LlmRequest, LlmResponse, Result, RoverError};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Gemini chat model bound to one model name.
#[derive(Debug, Clone)]
pub struct GeminiModel {
    http_client: Client,
    base_url: Url,
    model_name: String,
    temperature: Option<f32>,
    safety_settings: Vec<SafetySetting>,
}

impl GeminiModel {
    /// Creates the client. No request is sent; an empty key is accepted and
    /// rejected by the API on the first call.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let header = HeaderValue::from_str(&api_key)
            .map_err(|e| RoverError::Config(format!("failed to parse API key: {}", e)))?;
        let headers = HeaderMap::from_iter([(HeaderName::from_static("x-goog-api-key"), header)]);

        let http_client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RoverError::Model(format!("failed to build HTTP client: {}", e)))?;
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| RoverError::Config(format!("invalid base URL: {}", e)))?;

        let model = model.into();
        let model_name = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Ok(Self { http_client, base_url, model_name, temperature: None, safety_settings: Vec::new() })
    }

    /// Sampling temperature used when a request does not set one.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = settings;
        self
    }

    /// Points the client at another endpoint (a proxy, or a mock server).
    pub fn with_base_url(mut self, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        self.base_url = base_url;
        self
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn safety_settings(&self) -> &[SafetySetting] {
        &self.safety_settings
    }

    fn endpoint(&self) -> Result<Url> {
        self.base_url
            .join(&format!("models/{}:generateContent", self.model_name))
            .map_err(|e| {
                RoverError::Config(format!(
                    "failed to construct URL (probably incorrect model name '{}'): {}",
                    self.model_name, e
                ))
            })
    }

    fn build_request(&self, req: &LlmRequest) -> GenerateContentRequest {
        let tools = if req.tools.is_empty() {
            Vec::new()
        } else {
            vec![WireTool { function_declarations: req.tools.clone() }]
        };

        GenerateContentRequest {
            contents: req.contents.iter().map(WireContent::from).collect(),
            system_instruction: req
                .system_instruction
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(WireContent::system),
            tools,
            generation_config: GenerationConfig::merge(req.config.as_ref(), self.temperature),
            safety_settings: self.safety_settings.clone(),
        }
    }
}

#[async_trait]
impl Llm for GeminiModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn generate_content(&self, req: LlmRequest) -> Result<LlmResponse> {
        let url = self.endpoint()?;
        let body = self.build_request(&req);
        tracing::debug!(model = %self.model_name, contents = body.contents.len(), "Sending generateContent request");

        let response = self
            .http_client
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| RoverError::Model(format!("failed to perform request to '{}': {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let description = response.text().await.unwrap_or_default();
            return Err(RoverError::Model(format!(
                "bad response from server; code {}; description: {}",
                status.as_u16(),
                if description.is_empty() { "none" } else { description.as_str() }
            )));
        }

        let decoded: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RoverError::Model(format!("failed to deserialize JSON response: {}", e)))?;

        let converted = decoded.into_llm_response();
        if let Some(usage) = &converted.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                total_tokens = usage.total_token_count,
                "generateContent completed"
            );
        }
        Ok(converted)
    }
}

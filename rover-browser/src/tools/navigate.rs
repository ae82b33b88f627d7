use super::outcome;
use crate::session::BrowserSession;
use async_trait::async_trait;
use rover_core::tool::required_str;
use rover_core::{ActionResult, Result, RoverError, Tool};
use serde_json::{Value, json};
use std::sync::Arc;
use url::Url;

const DUCKDUCKGO_URL: &str = "https://duckduckgo.com/";

/// Tool for opening a URL in the current tab.
pub struct GoToUrlTool {
    browser: Arc<BrowserSession>,
}

impl GoToUrlTool {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl Tool for GoToUrlTool {
    fn name(&self) -> &str {
        "go_to_url"
    }

    fn description(&self) -> &str {
        "Navigate the current tab to a URL."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "Absolute URL to open, e.g. https://duckduckgo.com"
                }
            },
            "required": ["url"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<ActionResult> {
        let url = required_str(&args, "url")?;
        let result = self.browser.navigate(url).await.map(|_| format!("Navigated to {}", url));
        Ok(outcome(result))
    }
}

/// Tool for running a DuckDuckGo search in the current tab.
pub struct SearchDuckDuckGoTool {
    browser: Arc<BrowserSession>,
}

impl SearchDuckDuckGoTool {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }

    pub fn search_url(query: &str) -> Result<Url> {
        Url::parse_with_params(DUCKDUCKGO_URL, &[("q", query)])
            .map_err(|e| RoverError::Tool(format!("Invalid search query: {}", e)))
    }
}

#[async_trait]
impl Tool for SearchDuckDuckGoTool {
    fn name(&self) -> &str {
        "search_duckduckgo"
    }

    fn description(&self) -> &str {
        "Search DuckDuckGo for a query and open the results page."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search terms" }
            },
            "required": ["query"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<ActionResult> {
        let query = required_str(&args, "query")?;
        let url = Self::search_url(query)?;
        let result = self
            .browser
            .navigate(url.as_str())
            .await
            .map(|_| format!("Searched DuckDuckGo for '{}'", query));
        Ok(outcome(result))
    }
}

/// Tool for going back in history.
pub struct GoBackTool {
    browser: Arc<BrowserSession>,
}

impl GoBackTool {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl Tool for GoBackTool {
    fn name(&self) -> &str {
        "go_back"
    }

    fn description(&self) -> &str {
        "Go back to the previous page."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({ "type": "object", "properties": {} }))
    }

    async fn execute(&self, _args: Value) -> Result<ActionResult> {
        let result = self.browser.back().await.map(|_| "Navigated back".to_string());
        Ok(outcome(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_is_encoded() {
        let url = SearchDuckDuckGoTool::search_url("LangChain Google Gemini integration").unwrap();
        assert_eq!(url.as_str(), "https://duckduckgo.com/?q=LangChain+Google+Gemini+integration");
    }

    #[tokio::test]
    async fn test_navigation_without_browser_is_failure_result() {
        let tool = GoToUrlTool::new(Arc::new(BrowserSession::with_defaults()));
        let result = tool.execute(json!({"url": "https://duckduckgo.com"})).await.unwrap();
        assert_eq!(result.error.as_deref(), Some("Browser error: Browser session not started"));
        assert!(result.extracted_content.is_none());
    }

    #[tokio::test]
    async fn test_missing_url_is_error() {
        let tool = GoToUrlTool::new(Arc::new(BrowserSession::with_defaults()));
        assert!(tool.execute(json!({})).await.is_err());
    }
}

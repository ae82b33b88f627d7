//! Extract tools for getting content from the page.

use super::{MAX_EXTRACTED_CHARS, outcome, truncate};
use crate::session::{BrowserSession, PageLink};
use async_trait::async_trait;
use rover_core::{ActionResult, Result, Tool};
use serde_json::{Value, json};
use std::sync::Arc;

const DEFAULT_LINK_LIMIT: usize = 50;

/// Tool for reading the text of the page or of one element.
pub struct ExtractContentTool {
    browser: Arc<BrowserSession>,
}

impl ExtractContentTool {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }

    async fn extract(&self, selector: Option<&str>) -> Result<String> {
        let text = match selector {
            Some(selector) => self.browser.text_of(selector).await?,
            None => self.browser.page_text().await?,
        };
        let url = self.browser.current_url().await.unwrap_or_default();
        Ok(format!("Content of {}:\n{}", url, truncate(text.trim(), MAX_EXTRACTED_CHARS)))
    }
}

#[async_trait]
impl Tool for ExtractContentTool {
    fn name(&self) -> &str {
        "extract_content"
    }

    fn description(&self) -> &str {
        "Read the visible text of the page, or of the element matching a CSS selector."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "selector": {
                    "type": "string",
                    "description": "CSS selector to read; the whole page when omitted"
                }
            }
        }))
    }

    async fn execute(&self, args: Value) -> Result<ActionResult> {
        let selector = args.get("selector").and_then(Value::as_str);
        Ok(outcome(self.extract(selector).await))
    }
}

/// Tool for listing the links of the page.
pub struct ExtractLinksTool {
    browser: Arc<BrowserSession>,
}

impl ExtractLinksTool {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }
}

pub(crate) fn format_links(links: &[PageLink]) -> String {
    if links.is_empty() {
        return "No links found".to_string();
    }
    links
        .iter()
        .map(|l| {
            if l.text.is_empty() { l.href.clone() } else { format!("{} -> {}", l.text, l.href) }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Tool for ExtractLinksTool {
    fn name(&self) -> &str {
        "extract_links"
    }

    fn description(&self) -> &str {
        "List the links on the current page as 'text -> url' lines."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of links (default: 50)"
                }
            }
        }))
    }

    async fn execute(&self, args: Value) -> Result<ActionResult> {
        let limit = args
            .get("limit")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_LINK_LIMIT);
        let result = self.browser.links(limit).await.map(|links| format_links(&links));
        Ok(outcome(result))
    }
}

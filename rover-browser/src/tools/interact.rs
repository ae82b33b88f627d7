use super::outcome;
use crate::session::BrowserSession;
use async_trait::async_trait;
use rover_core::tool::required_str;
use rover_core::{ActionResult, Result, Tool};
use serde_json::{Value, json};
use std::sync::Arc;

/// Tool for clicking an element.
pub struct ClickElementTool {
    browser: Arc<BrowserSession>,
}

impl ClickElementTool {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl Tool for ClickElementTool {
    fn name(&self) -> &str {
        "click_element"
    }

    fn description(&self) -> &str {
        "Click the first element matching a CSS selector."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "selector": { "type": "string", "description": "CSS selector of the element" }
            },
            "required": ["selector"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<ActionResult> {
        let selector = required_str(&args, "selector")?;
        let result = self.browser.click(selector).await.map(|_| format!("Clicked '{}'", selector));
        Ok(outcome(result))
    }
}

/// Tool for typing into an input, optionally submitting its form.
pub struct InputTextTool {
    browser: Arc<BrowserSession>,
}

impl InputTextTool {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }

    async fn input(&self, selector: &str, text: &str, submit: bool) -> Result<String> {
        self.browser.type_text(selector, text).await?;
        if submit {
            self.browser.submit(selector).await?;
            return Ok(format!("Typed '{}' into '{}' and submitted", text, selector));
        }
        Ok(format!("Typed '{}' into '{}'", text, selector))
    }
}

#[async_trait]
impl Tool for InputTextTool {
    fn name(&self) -> &str {
        "input_text"
    }

    fn description(&self) -> &str {
        "Replace the text of an input field. Set submit to press Enter afterwards."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "selector": { "type": "string", "description": "CSS selector of the input" },
                "text": { "type": "string", "description": "Text to type" },
                "submit": { "type": "boolean", "description": "Press Enter after typing (default: false)" }
            },
            "required": ["selector", "text"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<ActionResult> {
        let selector = required_str(&args, "selector")?;
        let text = required_str(&args, "text")?;
        let submit = args.get("submit").and_then(Value::as_bool).unwrap_or(false);
        Ok(outcome(self.input(selector, text, submit).await))
    }
}

/// Tool for scrolling the page down.
pub struct ScrollDownTool {
    browser: Arc<BrowserSession>,
}

impl ScrollDownTool {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl Tool for ScrollDownTool {
    fn name(&self) -> &str {
        "scroll_down"
    }

    fn description(&self) -> &str {
        "Scroll the page down by a number of pixels, or by one screen when omitted."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "pixels": { "type": "integer", "description": "Distance to scroll" }
            }
        }))
    }

    async fn execute(&self, args: Value) -> Result<ActionResult> {
        let pixels = args.get("pixels").and_then(Value::as_i64);
        let result = self.browser.scroll_by(pixels).await.map(|_| match pixels {
            Some(px) => format!("Scrolled down {} pixels", px),
            None => "Scrolled down one page".to_string(),
        });
        Ok(outcome(result))
    }
}

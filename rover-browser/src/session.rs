//! Browser session management wrapping thirtyfour WebDriver.

use crate::config::{BrowserConfig, BrowserType};
use rover_core::{BrowserStateSnapshot, Result, RoverError};
use std::time::Duration;
use thirtyfour::prelude::*;
use tokio::sync::RwLock;

const ENTER_KEY: &str = "\u{E007}";

fn not_started() -> RoverError {
    RoverError::Browser("Browser session not started".to_string())
}

/// A link found on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub text: String,
    pub href: String,
}

/// A browser session that wraps thirtyfour's WebDriver.
///
/// Shared across tools via `Arc<BrowserSession>`.
pub struct BrowserSession {
    driver: RwLock<Option<WebDriver>>,
    config: BrowserConfig,
}

impl BrowserSession {
    /// Create a new browser session with the given configuration.
    ///
    /// This does not contact WebDriver. Call `start()` to open the browser.
    pub fn new(config: BrowserConfig) -> Self {
        Self { driver: RwLock::new(None), config }
    }

    pub fn with_defaults() -> Self {
        Self::new(BrowserConfig::default())
    }

    /// Start the browser session by connecting to WebDriver.
    pub async fn start(&self) -> Result<()> {
        let mut driver_guard = self.driver.write().await;

        if driver_guard.is_some() {
            return Ok(());
        }

        tracing::info!(webdriver = %self.config.webdriver_url, "Starting browser session");
        let caps = self.build_capabilities()?;
        let driver = WebDriver::new(&self.config.webdriver_url, caps)
            .await
            .map_err(|e| RoverError::Browser(format!("Failed to start browser: {}", e)))?;

        driver
            .set_page_load_timeout(Duration::from_secs(self.config.page_load_timeout_secs))
            .await
            .map_err(|e| RoverError::Browser(format!("Failed to set page load timeout: {}", e)))?;

        driver
            .set_implicit_wait_timeout(Duration::from_secs(self.config.implicit_wait_secs))
            .await
            .map_err(|e| RoverError::Browser(format!("Failed to set implicit wait: {}", e)))?;

        driver
            .set_window_rect(0, 0, self.config.viewport_width, self.config.viewport_height)
            .await
            .map_err(|e| RoverError::Browser(format!("Failed to set viewport: {}", e)))?;

        *driver_guard = Some(driver);
        Ok(())
    }

    /// Stop the browser session. Stopping a session that is not running is a no-op.
    pub async fn stop(&self) -> Result<()> {
        let mut driver_guard = self.driver.write().await;

        if let Some(driver) = driver_guard.take() {
            tracing::info!("Stopping browser session");
            driver
                .quit()
                .await
                .map_err(|e| RoverError::Browser(format!("Failed to quit browser: {}", e)))?;
        }

        Ok(())
    }

    pub async fn is_active(&self) -> bool {
        self.driver.read().await.is_some()
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub async fn navigate(&self, url: &str) -> Result<()> {
        let driver_guard = self.driver.read().await;
        let driver = driver_guard.as_ref().ok_or_else(not_started)?;

        driver
            .goto(url)
            .await
            .map_err(|e| RoverError::Browser(format!("Navigation to '{}' failed: {}", url, e)))
    }

    pub async fn current_url(&self) -> Result<String> {
        let driver_guard = self.driver.read().await;
        let driver = driver_guard.as_ref().ok_or_else(not_started)?;

        driver
            .current_url()
            .await
            .map(|u| u.to_string())
            .map_err(|e| RoverError::Browser(format!("Failed to get URL: {}", e)))
    }

    pub async fn title(&self) -> Result<String> {
        let driver_guard = self.driver.read().await;
        let driver = driver_guard.as_ref().ok_or_else(not_started)?;

        driver.title().await.map_err(|e| RoverError::Browser(format!("Failed to get title: {}", e)))
    }

    /// Find an element by CSS selector.
    pub async fn find_element(&self, selector: &str) -> Result<WebElement> {
        let driver_guard = self.driver.read().await;
        let driver = driver_guard.as_ref().ok_or_else(not_started)?;

        driver
            .find(By::Css(selector))
            .await
            .map_err(|e| RoverError::Browser(format!("Element not found '{}': {}", selector, e)))
    }

    pub async fn click(&self, selector: &str) -> Result<()> {
        let element = self.find_element(selector).await?;
        element
            .click()
            .await
            .map_err(|e| RoverError::Browser(format!("Click failed on '{}': {}", selector, e)))
    }

    /// Replace the value of an input with `text`.
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        let element = self.find_element(selector).await?;
        element
            .clear()
            .await
            .map_err(|e| RoverError::Browser(format!("Clear failed on '{}': {}", selector, e)))?;
        element
            .send_keys(text)
            .await
            .map_err(|e| RoverError::Browser(format!("Type failed on '{}': {}", selector, e)))
    }

    /// Press Enter on an element, submitting its form.
    pub async fn submit(&self, selector: &str) -> Result<()> {
        let element = self.find_element(selector).await?;
        element
            .send_keys(ENTER_KEY)
            .await
            .map_err(|e| RoverError::Browser(format!("Submit failed on '{}': {}", selector, e)))
    }

    pub async fn text_of(&self, selector: &str) -> Result<String> {
        let element = self.find_element(selector).await?;
        element
            .text()
            .await
            .map_err(|e| RoverError::Browser(format!("Get text failed on '{}': {}", selector, e)))
    }

    /// Visible text of the whole page.
    pub async fn page_text(&self) -> Result<String> {
        self.text_of("body").await
    }

    /// Up to `limit` links of the current page, in document order.
    pub async fn links(&self, limit: usize) -> Result<Vec<PageLink>> {
        let script = format!(
            "return Array.from(document.querySelectorAll('a[href]')).slice(0, {}).map(a => [(a.innerText || '').trim(), a.href]);",
            limit
        );
        let value = self.execute_script(&script).await?;
        let pairs: Vec<(String, String)> = serde_json::from_value(value)?;
        Ok(pairs.into_iter().map(|(text, href)| PageLink { text, href }).collect())
    }

    pub async fn back(&self) -> Result<()> {
        let driver_guard = self.driver.read().await;
        let driver = driver_guard.as_ref().ok_or_else(not_started)?;

        driver.back().await.map_err(|e| RoverError::Browser(format!("Back navigation failed: {}", e)))
    }

    /// Scroll down by `pixels`, or by one viewport height.
    pub async fn scroll_by(&self, pixels: Option<i64>) -> Result<()> {
        let script = match pixels {
            Some(px) => format!("window.scrollBy(0, {});", px),
            None => "window.scrollBy(0, window.innerHeight);".to_string(),
        };
        self.execute_script(&script).await.map(|_| ())
    }

    pub async fn execute_script(&self, script: &str) -> Result<serde_json::Value> {
        let driver_guard = self.driver.read().await;
        let driver = driver_guard.as_ref().ok_or_else(not_started)?;

        let result = driver
            .execute(script, vec![])
            .await
            .map_err(|e| RoverError::Browser(format!("Script execution failed: {}", e)))?;

        Ok(result.json().clone())
    }

    /// Current URL and title. Never fails; missing values stay `None`.
    pub async fn state(&self) -> BrowserStateSnapshot {
        if !self.is_active().await {
            return BrowserStateSnapshot::default();
        }
        BrowserStateSnapshot { url: self.current_url().await.ok(), title: self.title().await.ok() }
    }

    fn build_capabilities(&self) -> Result<Capabilities> {
        let caps = match self.config.browser {
            BrowserType::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if self.config.headless {
                    caps.add_arg("--headless=new").map_err(|e| {
                        RoverError::Browser(format!("Failed to add headless arg: {}", e))
                    })?;
                }
                caps.add_arg("--no-sandbox")
                    .map_err(|e| RoverError::Browser(format!("Failed to add no-sandbox: {}", e)))?;
                caps.add_arg("--disable-dev-shm-usage").map_err(|e| {
                    RoverError::Browser(format!("Failed to add disable-dev-shm: {}", e))
                })?;
                caps.into()
            }
            BrowserType::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if self.config.headless {
                    caps.add_arg("-headless")
                        .map_err(|e| RoverError::Browser(format!("Failed to add headless: {}", e)))?;
                }
                caps.into()
            }
            BrowserType::Edge => {
                let mut caps = DesiredCapabilities::edge();
                if self.config.headless {
                    caps.add_arg("--headless")
                        .map_err(|e| RoverError::Browser(format!("Failed to add headless: {}", e)))?;
                }
                caps.into()
            }
        };

        Ok(caps)
    }
}

//! Browser configuration options.

use serde::{Deserialize, Serialize};

/// Configuration for browser sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// WebDriver server URL (e.g., "http://localhost:4444")
    pub webdriver_url: String,

    pub browser: BrowserType,

    /// Run without a visible window
    pub headless: bool,

    pub viewport_width: u32,
    pub viewport_height: u32,

    pub page_load_timeout_secs: u64,

    /// How long element lookups keep retrying before failing
    pub implicit_wait_secs: u64,
}

/// Supported browser types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    Chrome,
    Firefox,
    Edge,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            browser: BrowserType::Chrome,
            headless: true,
            viewport_width: 1280,
            viewport_height: 1100,
            page_load_timeout_secs: 30,
            implicit_wait_secs: 5,
        }
    }
}

impl BrowserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = url.into();
        self
    }

    pub fn browser(mut self, browser: BrowserType) -> Self {
        self.browser = browser;
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn page_load_timeout(mut self, secs: u64) -> Self {
        self.page_load_timeout_secs = secs;
        self
    }

    pub fn implicit_wait(mut self, secs: u64) -> Self {
        self.implicit_wait_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert!(config.headless);
        assert_eq!(config.browser, BrowserType::Chrome);
    }

    #[test]
    fn test_builder() {
        let config = BrowserConfig::new()
            .webdriver_url("http://selenium:4444")
            .browser(BrowserType::Firefox)
            .headless(false)
            .viewport(1920, 1080)
            .implicit_wait(0);

        assert_eq!(config.webdriver_url, "http://selenium:4444");
        assert_eq!(config.browser, BrowserType::Firefox);
        assert!(!config.headless);
        assert_eq!(config.viewport_width, 1920);
        assert_eq!(config.implicit_wait_secs, 0);
    }
}

//! # rover-browser
//!
//! Browser actions for rover agents, driven over WebDriver (via thirtyfour).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rover_browser::{BrowserConfig, BrowserSession, BrowserToolset};
//! use std::sync::Arc;
//!
//! # async fn example() -> rover_core::Result<()> {
//! let browser = Arc::new(BrowserSession::new(BrowserConfig::new().headless(true)));
//! browser.start().await?;
//!
//! let tools = BrowserToolset::new(browser.clone()).all_tools();
//! assert_eq!(tools.len(), 8);
//!
//! browser.stop().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Available Tools
//!
//! - `search_duckduckgo` - Open DuckDuckGo results for a query
//! - `go_to_url` - Navigate to a URL
//! - `go_back` - Go back in history
//! - `click_element` - Click an element by CSS selector
//! - `input_text` - Type into an input, optionally pressing Enter
//! - `scroll_down` - Scroll the page
//! - `extract_content` - Read the text of the page or an element
//! - `extract_links` - List the links on the page
//!
//! ## Requirements
//!
//! A WebDriver server (ChromeDriver, geckodriver or Selenium) must be
//! reachable. The default address is `http://localhost:4444`.
//!
//! ```bash
//! docker run -d -p 4444:4444 selenium/standalone-chrome
//! ```

mod config;
mod session;
pub mod tools;
mod toolset;

pub use config::{BrowserConfig, BrowserType};
pub use session::{BrowserSession, PageLink};
pub use toolset::BrowserToolset;

pub use tools::{
    ClickElementTool, ExtractContentTool, ExtractLinksTool, GoBackTool, GoToUrlTool,
    InputTextTool, ScrollDownTool, SearchDuckDuckGoTool,
};

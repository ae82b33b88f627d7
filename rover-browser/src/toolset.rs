//! Bundles the browser tools around one shared session.

use crate::session::BrowserSession;
use crate::tools::{
    ClickElementTool, ExtractContentTool, ExtractLinksTool, GoBackTool, GoToUrlTool,
    InputTextTool, ScrollDownTool, SearchDuckDuckGoTool,
};
use rover_core::Tool;
use std::sync::Arc;

/// All browser tools bound to the same [`BrowserSession`].
#[derive(Clone)]
pub struct BrowserToolset {
    browser: Arc<BrowserSession>,
}

impl BrowserToolset {
    pub fn new(browser: Arc<BrowserSession>) -> Self {
        Self { browser }
    }

    pub fn browser(&self) -> &Arc<BrowserSession> {
        &self.browser
    }

    /// Every browser action, in the order they are offered to the model.
    pub fn all_tools(&self) -> Vec<Arc<dyn Tool>> {
        let b = &self.browser;
        vec![
            Arc::new(SearchDuckDuckGoTool::new(b.clone())),
            Arc::new(GoToUrlTool::new(b.clone())),
            Arc::new(GoBackTool::new(b.clone())),
            Arc::new(ClickElementTool::new(b.clone())),
            Arc::new(InputTextTool::new(b.clone())),
            Arc::new(ScrollDownTool::new(b.clone())),
            Arc::new(ExtractContentTool::new(b.clone())),
            Arc::new(ExtractLinksTool::new(b.clone())),
        ]
    }
}

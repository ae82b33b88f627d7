//! Browser actions exposed to the model.
//!
//! Every tool reports browser failures as [`ActionResult::failure`] so the
//! model can react to them; only malformed arguments are returned as errors.

mod extract;
mod interact;
mod navigate;

pub use extract::{ExtractContentTool, ExtractLinksTool};
pub use interact::{ClickElementTool, InputTextTool, ScrollDownTool};
pub use navigate::{GoBackTool, GoToUrlTool, SearchDuckDuckGoTool};

use rover_core::{ActionResult, Result};

/// Longest text handed back to the model from one extraction.
pub const MAX_EXTRACTED_CHARS: usize = 8_000;

pub(crate) fn outcome(result: Result<String>) -> ActionResult {
    match result {
        Ok(message) => ActionResult::extracted(message),
        Err(e) => {
            tracing::debug!(error = %e, "Browser action failed");
            ActionResult::failure(e.to_string())
        }
    }
}

/// Cuts `text` to at most `max` characters, marking the cut.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}\n[... truncated]", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_core::RoverError;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 10), "héllo");
        assert_eq!(truncate("héllo", 2), "hé\n[... truncated]");
    }

    #[test]
    fn test_outcome() {
        let ok = outcome(Ok("Navigated".to_string()));
        assert_eq!(ok.extracted_content.as_deref(), Some("Navigated"));
        assert!(ok.error.is_none());

        let failed = outcome(Err(RoverError::Browser("gone".to_string())));
        assert_eq!(failed.error.as_deref(), Some("Browser error: gone"));
        assert!(!failed.is_done);
    }
}

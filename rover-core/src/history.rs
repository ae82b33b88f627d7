//! Run history: what the agent did at every step and what came out of it.

use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outcome of a single action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Set by the action that ends the run.
    #[serde(default)]
    pub is_done: bool,
    /// Only meaningful when `is_done` is set.
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub extracted_content: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Whether the content is fed back to the model.
    #[serde(default)]
    pub include_in_memory: bool,
}

impl ActionResult {
    pub fn extracted(content: impl Into<String>) -> Self {
        Self {
            extracted_content: Some(content.into()),
            include_in_memory: true,
            ..Default::default()
        }
    }

    pub fn done(text: impl Into<String>, success: bool) -> Self {
        Self {
            is_done: true,
            success: Some(success),
            extracted_content: Some(text.into()),
            include_in_memory: true,
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), include_in_memory: true, ..Default::default() }
    }

    /// Extracted content, treating the empty string as absent.
    pub fn content(&self) -> Option<&str> {
        self.extracted_content.as_deref().filter(|s| !s.is_empty())
    }

    /// Error text, treating the empty string as absent.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCall {
    pub name: String,
    pub args: serde_json::Value,
}

/// What the model produced for one step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentOutput {
    pub thinking: Option<String>,
    pub actions: Vec<ActionCall>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserStateSnapshot {
    pub url: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepMetadata {
    pub step_number: u32,
    pub step_start: DateTime<Utc>,
    pub step_end: DateTime<Utc>,
    pub input_tokens: u32,
}

impl StepMetadata {
    pub fn duration_seconds(&self) -> f64 {
        (self.step_end - self.step_start).num_milliseconds() as f64 / 1000.0
    }
}

/// One step of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentHistory {
    pub model_output: Option<AgentOutput>,
    pub result: Vec<ActionResult>,
    #[serde(default)]
    pub state: BrowserStateSnapshot,
    pub metadata: Option<StepMetadata>,
}

impl AgentHistory {
    pub fn from_results(result: Vec<ActionResult>) -> Self {
        Self { result, ..Default::default() }
    }
}

/// Ordered step records of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentHistoryList {
    pub history: Vec<AgentHistory>,
}

impl AgentHistoryList {
    pub fn push(&mut self, step: AgentHistory) {
        self.history.push(step);
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn number_of_steps(&self) -> usize {
        self.history.len()
    }

    /// The last result of the last step.
    pub fn last_action_result(&self) -> Option<&ActionResult> {
        self.history.last().and_then(|h| h.result.last())
    }

    pub fn is_done(&self) -> bool {
        self.last_action_result().is_some_and(|r| r.is_done)
    }

    /// `None` until the run is done.
    pub fn is_successful(&self) -> Option<bool> {
        self.last_action_result().filter(|r| r.is_done).and_then(|r| r.success)
    }

    pub fn final_result(&self) -> Option<&str> {
        self.last_action_result().and_then(ActionResult::content)
    }

    /// First error of each step, `None` for steps without one.
    pub fn errors(&self) -> Vec<Option<&str>> {
        self.history
            .iter()
            .map(|h| h.result.iter().find_map(ActionResult::error_message))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().iter().any(Option::is_some)
    }

    pub fn urls(&self) -> Vec<Option<&str>> {
        self.history.iter().map(|h| h.state.url.as_deref()).collect()
    }

    pub fn action_names(&self) -> Vec<&str> {
        self.history
            .iter()
            .filter_map(|h| h.model_output.as_ref())
            .flat_map(|o| o.actions.iter().map(|a| a.name.as_str()))
            .collect()
    }

    pub fn extracted_content(&self) -> Vec<&str> {
        self.history.iter().flat_map(|h| h.result.iter().filter_map(ActionResult::content)).collect()
    }

    pub fn total_duration_seconds(&self) -> f64 {
        self.history.iter().filter_map(|h| h.metadata.as_ref()).map(StepMetadata::duration_seconds).sum()
    }

    pub fn total_input_tokens(&self) -> u64 {
        self.history
            .iter()
            .filter_map(|h| h.metadata.as_ref())
            .map(|m| u64::from(m.input_tokens))
            .sum()
    }

    /// Writes the history as pretty JSON, creating parent directories.
    ///
    /// The JSON goes to a temporary file in the target directory that is then
    /// renamed over `path`, so readers never see a partial file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

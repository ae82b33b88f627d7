use crate::config::RunnerSettings;
use crate::error::RunnerError;
use crate::report::{write_banner, write_report};
use rover_agent::BrowserAgent;
use rover_core::{Agent, AgentHistoryList, Llm};
use rover_gemini::{GeminiModel, SafetySetting};
use std::io::Write;
use std::sync::Arc;

/// Runs one task with a Gemini-backed browser agent and prints the outcome.
pub struct TaskRunner {
    settings: RunnerSettings,
}

impl TaskRunner {
    pub fn new(settings: RunnerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Configures the chat model. Sends nothing.
    pub fn build_model(&self) -> Result<GeminiModel, RunnerError> {
        let mut model = GeminiModel::new(&self.settings.api_key, &self.settings.model)?
            .with_temperature(self.settings.temperature);
        if let Some(threshold) = self.settings.safety_threshold {
            model = model.with_safety_settings(SafetySetting::for_all(threshold));
        }
        Ok(model)
    }

    /// Binds the task and the model into an agent. Sends nothing and does not
    /// open the browser.
    pub fn build_agent(&self) -> Result<BrowserAgent, RunnerError> {
        let model: Arc<dyn Llm> = Arc::new(self.build_model()?);
        let agent = BrowserAgent::builder(&self.settings.task)
            .model(model)
            .browser_config(self.settings.browser_config())
            .max_steps(self.settings.max_steps)
            .build()?;
        Ok(agent)
    }

    pub async fn run(&self, out: &mut impl Write) -> Result<AgentHistoryList, RunnerError> {
        let agent = self.build_agent()?;
        self.run_agent(&agent, out).await
    }

    /// Prints the banner, awaits one run of `agent`, prints the summary, then
    /// saves and logs the history.
    pub async fn run_agent(
        &self,
        agent: &dyn Agent,
        out: &mut impl Write,
    ) -> Result<AgentHistoryList, RunnerError> {
        write_banner(out, agent.task())?;
        out.flush()?;

        let history = agent.run().await?;

        write_report(out, &history)?;
        out.flush()?;

        if let Some(path) = &self.settings.history_path {
            history.save_to_file(path)?;
            tracing::info!(path = %path.display(), "Saved agent history");
        }
        log_summary(&history);

        Ok(history)
    }
}

fn log_summary(history: &AgentHistoryList) {
    let mut urls: Vec<&str> = history.urls().into_iter().flatten().collect();
    urls.dedup();

    tracing::info!(
        steps = history.number_of_steps(),
        duration_secs = history.total_duration_seconds(),
        input_tokens = history.total_input_tokens(),
        errors = history.errors().iter().flatten().count(),
        successful = ?history.is_successful(),
        "Run finished"
    );
    if !urls.is_empty() {
        tracing::info!(urls = ?urls, "Visited pages");
    }
}

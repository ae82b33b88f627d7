use crate::done::DoneTool;
use crate::prompt;
use async_trait::async_trait;
use chrono::Utc;
use rover_browser::{BrowserConfig, BrowserSession, BrowserToolset};
use rover_core::{
    ActionCall, ActionResult, Agent, AgentHistory, AgentHistoryList, AgentOutput,
    BrowserStateSnapshot, Content, FinishReason, FunctionDeclaration, Llm, LlmRequest,
    LlmResponse, Part, Result, RoverError, StepMetadata, Tool,
};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::Instrument;

pub const DEFAULT_MAX_STEPS: u32 = 100;
pub const DEFAULT_MAX_ACTIONS_PER_STEP: usize = 10;

/// An agent that lets a chat model drive a browser until the task is done.
pub struct BrowserAgent {
    task: String,
    model: Arc<dyn Llm>,
    browser: Option<Arc<BrowserSession>>,
    tools: Vec<Arc<dyn Tool>>,
    instruction: String,
    max_steps: u32,
    max_actions_per_step: usize,
}

pub struct BrowserAgentBuilder {
    task: String,
    model: Option<Arc<dyn Llm>>,
    browser_config: BrowserConfig,
    use_browser: bool,
    tools: Vec<Arc<dyn Tool>>,
    instruction: Option<String>,
    max_steps: u32,
    max_actions_per_step: usize,
}

impl BrowserAgentBuilder {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            model: None,
            browser_config: BrowserConfig::default(),
            use_browser: true,
            tools: Vec::new(),
            instruction: None,
            max_steps: DEFAULT_MAX_STEPS,
            max_actions_per_step: DEFAULT_MAX_ACTIONS_PER_STEP,
        }
    }

    pub fn model(mut self, model: Arc<dyn Llm>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn browser_config(mut self, config: BrowserConfig) -> Self {
        self.browser_config = config;
        self
    }

    /// Run without a browser; only the tools added with [`tool`](Self::tool)
    /// and `done` are offered.
    pub fn without_browser(mut self) -> Self {
        self.use_browser = false;
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn max_actions_per_step(mut self, max_actions: usize) -> Self {
        self.max_actions_per_step = max_actions;
        self
    }

    /// Assembles the agent. Nothing is started and no request is sent.
    pub fn build(self) -> Result<BrowserAgent> {
        let model = self.model.ok_or_else(|| RoverError::Agent("Model is required".to_string()))?;

        if self.max_steps == 0 {
            return Err(RoverError::Agent("max_steps must be at least 1".to_string()));
        }
        if self.max_actions_per_step == 0 {
            return Err(RoverError::Agent("max_actions_per_step must be at least 1".to_string()));
        }

        let browser = self.use_browser.then(|| Arc::new(BrowserSession::new(self.browser_config)));

        let mut tools: Vec<Arc<dyn Tool>> = match &browser {
            Some(browser) => BrowserToolset::new(browser.clone()).all_tools(),
            None => Vec::new(),
        };
        tools.extend(self.tools);
        tools.push(Arc::new(DoneTool));

        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.name().to_string()) {
                return Err(RoverError::Agent(format!("Duplicate tool name '{}'", tool.name())));
            }
        }

        let instruction = self
            .instruction
            .unwrap_or_else(|| prompt::default_instruction(self.max_actions_per_step));

        Ok(BrowserAgent {
            task: self.task,
            model,
            browser,
            tools,
            instruction,
            max_steps: self.max_steps,
            max_actions_per_step: self.max_actions_per_step,
        })
    }
}

/// What one step produced before its bookkeeping is attached.
struct StepOutcome {
    model_output: Option<AgentOutput>,
    results: Vec<ActionResult>,
    input_tokens: u32,
    /// The run ends after this step.
    stop: bool,
}

impl StepOutcome {
    fn failed(error: String) -> Self {
        Self {
            model_output: None,
            results: vec![ActionResult::failure(error)],
            input_tokens: 0,
            stop: true,
        }
    }
}

impl BrowserAgent {
    /// Agent with the default browser and toolset.
    pub fn new(task: impl Into<String>, model: Arc<dyn Llm>) -> Result<Self> {
        Self::builder(task).model(model).build()
    }

    pub fn builder(task: impl Into<String>) -> BrowserAgentBuilder {
        BrowserAgentBuilder::new(task)
    }

    pub fn browser(&self) -> Option<&Arc<BrowserSession>> {
        self.browser.as_ref()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn max_actions_per_step(&self) -> usize {
        self.max_actions_per_step
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    fn declarations(&self) -> Vec<FunctionDeclaration> {
        self.tools.iter().map(|t| t.declaration()).collect()
    }

    fn find_tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    async fn browser_state(&self) -> BrowserStateSnapshot {
        match &self.browser {
            Some(browser) => browser.state().await,
            None => BrowserStateSnapshot::default(),
        }
    }

    async fn run_steps(&self) -> AgentHistoryList {
        let mut history = AgentHistoryList::default();
        let mut conversation = vec![Content::new("user").with_text(prompt::task_message(&self.task))];
        let declarations = self.declarations();

        for step_number in 1..=self.max_steps {
            let step_start = Utc::now();
            let outcome = self
                .step(&mut conversation, &declarations)
                .instrument(tracing::info_span!("agent.step", step = step_number))
                .await;

            let step = AgentHistory {
                model_output: outcome.model_output,
                result: outcome.results,
                state: self.browser_state().await,
                metadata: Some(StepMetadata {
                    step_number,
                    step_start,
                    step_end: Utc::now(),
                    input_tokens: outcome.input_tokens,
                }),
            };
            tracing::info!(
                step = step_number,
                url = step.state.url.as_deref().unwrap_or(""),
                actions = step.model_output.as_ref().map_or(0, |o| o.actions.len()),
                "Step finished"
            );
            history.push(step);

            if outcome.stop {
                return history;
            }
        }

        tracing::warn!(max_steps = self.max_steps, "Stopped after reaching the step limit");
        history
    }

    async fn step(
        &self,
        conversation: &mut Vec<Content>,
        declarations: &[FunctionDeclaration],
    ) -> StepOutcome {
        let request = LlmRequest {
            model: self.model.name().to_string(),
            system_instruction: Some(self.instruction.clone()),
            contents: conversation.clone(),
            tools: declarations.to_vec(),
            config: None,
        };

        let response = match self.model.generate_content(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Model call failed");
                return StepOutcome::failed(e.to_string());
            }
        };

        if response.error_code.is_some() || response.error_message.is_some() {
            let error = response_error(&response);
            tracing::error!(error = %error, "Model returned no usable response");
            return StepOutcome::failed(error);
        }

        let input_tokens = response
            .usage_metadata
            .and_then(|u| u32::try_from(u.prompt_token_count).ok())
            .unwrap_or(0);
        let thinking = response.text().filter(|t| !t.trim().is_empty());
        let calls = response.function_calls();

        if calls.is_empty() {
            if let Some(error) = unfinished_reply(response.finish_reason, thinking.is_some()) {
                tracing::error!(error = %error, "Model stopped before answering");
                let mut outcome = StepOutcome::failed(error);
                outcome.input_tokens = input_tokens;
                return outcome;
            }
            tracing::debug!("Model answered without calling a function");
            return StepOutcome {
                model_output: Some(AgentOutput { thinking: None, actions: Vec::new() }),
                results: vec![ActionResult::done(thinking.unwrap_or_default(), true)],
                input_tokens,
                stop: true,
            };
        }

        if calls.len() > self.max_actions_per_step {
            tracing::warn!(
                requested = calls.len(),
                limit = self.max_actions_per_step,
                "Dropping actions beyond the per-step limit"
            );
        }

        let mut actions = Vec::new();
        let mut results = Vec::new();
        let mut responses = Vec::new();
        for (name, args) in calls.into_iter().take(self.max_actions_per_step) {
            let result = self.execute_action(name, args).await;
            actions.push(ActionCall { name: name.to_string(), args: args.clone() });
            responses.push(Part::function_response(name, function_response_payload(&result)));
            let done = result.is_done;
            results.push(result);
            if done {
                break;
            }
        }

        // Only the calls that ran are echoed back, so every call has a response.
        // Parts are copied as received to keep their thought signatures.
        let mut model_turn = Content::new("model");
        let mut echoed = 0;
        for part in response.content.iter().flat_map(|c| c.parts.iter()) {
            match part {
                Part::FunctionCall { .. } if echoed >= actions.len() => {}
                Part::FunctionCall { .. } => {
                    echoed += 1;
                    model_turn.parts.push(part.clone());
                }
                _ => model_turn.parts.push(part.clone()),
            }
        }
        conversation.push(model_turn);
        conversation.push(Content { role: "user".to_string(), parts: responses });

        let stop = results.iter().any(|r| r.is_done);
        StepOutcome {
            model_output: Some(AgentOutput { thinking, actions }),
            results,
            input_tokens,
            stop,
        }
    }

    async fn execute_action(&self, name: &str, args: &Value) -> ActionResult {
        let Some(tool) = self.find_tool(name) else {
            tracing::warn!(action = name, "Model requested an unknown action");
            return ActionResult::failure(format!("Unknown action '{}'", name));
        };

        let span = tracing::info_span!("tool.execute", tool.name = name);
        match tool.execute(args.clone()).instrument(span).await {
            Ok(result) => {
                if let Some(error) = result.error_message() {
                    tracing::info!(action = name, error, "Action failed");
                } else {
                    tracing::info!(action = name, "Action executed");
                }
                result
            }
            Err(e) => {
                tracing::warn!(action = name, error = %e, "Action rejected");
                ActionResult::failure(e.to_string())
            }
        }
    }
}

/// Error for a reply without function calls that the model did not finish.
fn unfinished_reply(reason: Option<FinishReason>, has_text: bool) -> Option<String> {
    match reason {
        Some(reason @ (FinishReason::Safety | FinishReason::Recitation | FinishReason::Other)) => {
            Some(format!("Model stopped without an answer ({})", reason.as_str()))
        }
        Some(FinishReason::MaxTokens) if !has_text => {
            Some("Model stopped without an answer (MAX_TOKENS)".to_string())
        }
        _ => None,
    }
}

fn response_error(response: &LlmResponse) -> String {
    match (response.error_code.as_deref(), response.error_message.as_deref()) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => "Model returned an empty response".to_string(),
    }
}

fn function_response_payload(result: &ActionResult) -> Value {
    match (result.error_message(), result.content()) {
        (Some(error), _) => json!({ "error": error }),
        (None, Some(content)) if result.include_in_memory => json!({ "result": content }),
        _ => json!({ "result": "ok" }),
    }
}

#[async_trait]
impl Agent for BrowserAgent {
    fn name(&self) -> &str {
        "browser_agent"
    }

    fn task(&self) -> &str {
        &self.task
    }

    async fn run(&self) -> Result<AgentHistoryList> {
        let run_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("agent.run", run.id = %run_id, model = self.model.name());

        async {
            tracing::info!(task = %self.task, "Starting agent run");

            if let Some(browser) = &self.browser {
                browser.start().await?;
            }

            let history = self.run_steps().await;

            if let Some(browser) = &self.browser {
                if let Err(e) = browser.stop().await {
                    tracing::warn!(error = %e, "Failed to stop browser");
                }
            }

            tracing::info!(
                steps = history.number_of_steps(),
                done = history.is_done(),
                "Agent run finished"
            );
            Ok::<_, RoverError>(history)
        }
        .instrument(span)
        .await
    }
}

use async_trait::async_trait;
use rover_cli::{RunnerError, RunnerSettings, TaskRunner};
use rover_core::{
    ActionResult, Agent, AgentHistory, AgentHistoryList, BrowserStateSnapshot, Result, RoverError,
};

/// Agent that returns a canned outcome without touching a browser or a model.
struct StubAgent {
    outcome: std::result::Result<AgentHistoryList, String>,
}

#[async_trait]
impl Agent for StubAgent {
    fn name(&self) -> &str {
        "stub"
    }

    fn task(&self) -> &str {
        "Find the LangChain Gemini page"
    }

    async fn run(&self) -> Result<AgentHistoryList> {
        self.outcome.clone().map_err(RoverError::Agent)
    }
}

fn finished_history() -> AgentHistoryList {
    let mut history = AgentHistoryList::default();
    history.push(AgentHistory {
        result: vec![ActionResult::extracted("Searched DuckDuckGo")],
        state: BrowserStateSnapshot {
            url: Some("https://duckduckgo.com/?q=langchain".to_string()),
            title: None,
        },
        ..Default::default()
    });
    history.push(AgentHistory::from_results(vec![ActionResult::done(
        "https://python.langchain.com/docs/integrations/chat/google_generative_ai/",
        true,
    )]));
    history
}

#[tokio::test]
async fn prints_banner_and_summary() {
    let runner = TaskRunner::new(RunnerSettings::default());
    let agent = StubAgent { outcome: Ok(finished_history()) };
    let mut out = Vec::new();

    let history = runner.run_agent(&agent, &mut out).await.unwrap();

    assert_eq!(history.number_of_steps(), 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Starting agent with task: Find the LangChain Gemini page\n\
         \n\
         Agent Result:\n  \
         Extracted content: https://python.langchain.com/docs/integrations/chat/google_generative_ai/\n  \
         Task marked as completed.\n"
    );
}

#[tokio::test]
async fn empty_history_prints_only_the_notice() {
    let runner = TaskRunner::new(RunnerSettings::default());
    let agent = StubAgent { outcome: Ok(AgentHistoryList::default()) };
    let mut out = Vec::new();

    runner.run_agent(&agent, &mut out).await.unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.ends_with("Agent Result:\n  No history found or agent did not run.\n"));
    assert!(!output.contains("Task"));
}

#[tokio::test]
async fn run_failure_propagates_after_banner() {
    let runner = TaskRunner::new(RunnerSettings::default());
    let agent = StubAgent { outcome: Err("exploded".to_string()) };
    let mut out = Vec::new();

    let err = runner.run_agent(&agent, &mut out).await.unwrap_err();

    assert!(matches!(err, RunnerError::Run(RoverError::Agent(_))));
    assert_eq!(String::from_utf8(out).unwrap(), "Starting agent with task: Find the LangChain Gemini page\n");
}

#[tokio::test]
async fn history_is_saved_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs").join("history.json");
    let settings = RunnerSettings { history_path: Some(path.clone()), ..Default::default() };
    let agent = StubAgent { outcome: Ok(finished_history()) };

    TaskRunner::new(settings).run_agent(&agent, &mut Vec::<u8>::new()).await.unwrap();

    let saved = AgentHistoryList::load_from_file(&path).unwrap();
    assert_eq!(saved, finished_history());
}

#[test]
fn building_the_agent_sends_nothing() {
    let settings = RunnerSettings::from_lookup(|key| match key {
        "ROVER_MAX_STEPS" => Some("7".to_string()),
        "WEBDRIVER_URL" => Some("http://127.0.0.1:1".to_string()),
        _ => None,
    })
    .unwrap();
    let runner = TaskRunner::new(settings);

    let agent = runner.build_agent().unwrap();

    assert_eq!(agent.task(), rover_cli::DEFAULT_TASK);
    assert_eq!(agent.max_steps(), 7);
    let browser = agent.browser().unwrap();
    assert_eq!(browser.config().webdriver_url, "http://127.0.0.1:1");
}

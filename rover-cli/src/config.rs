//! Runner settings read from the environment.

use crate::error::RunnerError;
use rover_browser::BrowserConfig;
use rover_gemini::HarmBlockThreshold;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";
pub const DEFAULT_MAX_STEPS: u32 = 100;
pub const DEFAULT_TASK: &str = "Go to duckduckgo.com, search for 'LangChain Google Gemini integration', and find the main LangChain documentation page about it. Return the URL of that page.";

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerSettings {
    /// Empty when no credential is configured.
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub safety_threshold: Option<HarmBlockThreshold>,
    pub task: String,
    pub webdriver_url: String,
    pub headless: bool,
    pub max_steps: u32,
    pub history_path: Option<PathBuf>,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            safety_threshold: None,
            task: DEFAULT_TASK.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: true,
            max_steps: DEFAULT_MAX_STEPS,
            history_path: None,
        }
    }
}

impl RunnerSettings {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a local `.env` file.
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RunnerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let api_key = match get("GOOGLE_API_KEY").or_else(|| get("GEMINI_API_KEY")) {
            Some(key) => key,
            None => {
                tracing::warn!(
                    "GOOGLE_API_KEY is not set; requests to Gemini will fail to authenticate"
                );
                String::new()
            }
        };

        let temperature = match get("ROVER_TEMPERATURE") {
            Some(raw) => parse_temperature(&raw)?,
            None => defaults.temperature,
        };

        let safety_threshold = get("ROVER_SAFETY_THRESHOLD")
            .map(|raw| {
                HarmBlockThreshold::from_str(&raw).map_err(|e| {
                    RunnerError::Config(format!("ROVER_SAFETY_THRESHOLD: {}", e))
                })
            })
            .transpose()?;

        let headless = match get("ROVER_HEADLESS") {
            Some(raw) => parse_bool("ROVER_HEADLESS", &raw)?,
            None => defaults.headless,
        };

        let max_steps = match get("ROVER_MAX_STEPS") {
            Some(raw) => parse_max_steps(&raw)?,
            None => defaults.max_steps,
        };

        Ok(Self {
            api_key,
            model: get("ROVER_MODEL").unwrap_or(defaults.model),
            temperature,
            safety_threshold,
            task: get("ROVER_TASK").unwrap_or(defaults.task),
            webdriver_url: get("WEBDRIVER_URL").unwrap_or(defaults.webdriver_url),
            headless,
            max_steps,
            history_path: get("ROVER_HISTORY_PATH").map(PathBuf::from),
        })
    }

    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig::new().webdriver_url(&self.webdriver_url).headless(self.headless)
    }
}

fn parse_temperature(raw: &str) -> Result<f32, RunnerError> {
    let value: f32 = raw.parse().map_err(|_| {
        RunnerError::Config(format!("ROVER_TEMPERATURE must be a number, got '{}'", raw))
    })?;
    if !(0.0..=2.0).contains(&value) {
        return Err(RunnerError::Config(format!(
            "ROVER_TEMPERATURE must be between 0.0 and 2.0, got {}",
            value
        )));
    }
    Ok(value)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, RunnerError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(RunnerError::Config(format!("{} must be true or false, got '{}'", key, raw))),
    }
}

fn parse_max_steps(raw: &str) -> Result<u32, RunnerError> {
    match raw.parse::<u32>() {
        Ok(0) | Err(_) => Err(RunnerError::Config(format!(
            "ROVER_MAX_STEPS must be a positive integer, got '{}'",
            raw
        ))),
        Ok(n) => Ok(n),
    }
}

//! # rover-cli
//!
//! The `rover` task runner: reads its settings from the environment, builds
//! a Gemini chat model and a browser agent, runs the task once and prints a
//! summary of the last step.
//!
//! ## Environment
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GOOGLE_API_KEY` / `GEMINI_API_KEY` | empty |
//! | `ROVER_MODEL` | `gemini-pro` |
//! | `ROVER_TEMPERATURE` | `0.0` |
//! | `ROVER_SAFETY_THRESHOLD` | unset |
//! | `ROVER_TASK` | DuckDuckGo search for the LangChain Gemini docs |
//! | `WEBDRIVER_URL` | `http://localhost:4444` |
//! | `ROVER_HEADLESS` | `true` |
//! | `ROVER_MAX_STEPS` | `100` |
//! | `ROVER_HISTORY_PATH` | unset |
//!
//! A `.env` file in the working directory is loaded first.

mod config;
mod error;
pub mod report;
mod runner;
mod telemetry;

pub use config::{DEFAULT_MODEL, DEFAULT_TASK, RunnerSettings};
pub use error::RunnerError;
pub use runner::TaskRunner;
pub use telemetry::init_telemetry;

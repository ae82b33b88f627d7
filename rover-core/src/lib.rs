//! # rover-core
//!
//! Core traits and types shared by the rover crates.
//!
//! ## Overview
//!
//! - [`Llm`] - A chat model that turns an [`LlmRequest`] into an [`LlmResponse`]
//! - [`Tool`] - A browser action (or any other action) the model can call
//! - [`Agent`] - Something that runs a task to completion and returns its history
//! - [`AgentHistoryList`] - The ordered step records produced by a run
//! - [`RoverError`] / [`Result`] - Unified error handling
//!
//! ## Reading a run result
//!
//! ```rust
//! use rover_core::{ActionResult, AgentHistory, AgentHistoryList};
//!
//! let mut history = AgentHistoryList::default();
//! history.push(AgentHistory::from_results(vec![ActionResult::done("https://example.com", true)]));
//!
//! assert!(history.is_done());
//! assert_eq!(history.final_result(), Some("https://example.com"));
//! ```

pub mod agent;
pub mod error;
pub mod history;
pub mod mock;
pub mod model;
pub mod tool;
pub mod types;

pub use agent::Agent;
pub use error::{Result, RoverError};
pub use history::{
    ActionCall, ActionResult, AgentHistory, AgentHistoryList, AgentOutput, BrowserStateSnapshot,
    StepMetadata,
};
pub use mock::MockLlm;
pub use model::{
    FinishReason, FunctionDeclaration, GenerateContentConfig, Llm, LlmRequest, LlmResponse,
    UsageMetadata,
};
pub use tool::Tool;
pub use types::{Content, FunctionResponseData, Part};

//! # rover-agent
//!
//! A browser agent: a chat model calls browser actions step by step until it
//! calls `done` or answers in plain text.
//!
//! ```rust,no_run
//! use rover_agent::BrowserAgent;
//! use rover_core::{Agent, Llm};
//! use std::sync::Arc;
//!
//! # async fn example(model: Arc<dyn Llm>) -> rover_core::Result<()> {
//! let agent = BrowserAgent::builder("Find the Rust homepage and return its URL")
//!     .model(model)
//!     .max_steps(20)
//!     .build()?;
//!
//! let history = agent.run().await?;
//! println!("{:?}", history.final_result());
//! # Ok(())
//! # }
//! ```
//!
//! Each step sends the system instruction, the conversation so far and the
//! declarations of every tool. Function calls run in order and their results
//! are fed back as function responses on the next step.

mod browser_agent;
mod done;
mod prompt;

pub use browser_agent::{
    BrowserAgent, BrowserAgentBuilder, DEFAULT_MAX_ACTIONS_PER_STEP, DEFAULT_MAX_STEPS,
};
pub use done::{DONE_TOOL_NAME, DoneTool};

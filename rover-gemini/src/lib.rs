//! # rover-gemini
//!
//! Chat-model client for the Gemini `generateContent` REST endpoint.
//!
//! ```rust,no_run
//! use rover_gemini::{GeminiModel, HarmBlockThreshold, SafetySetting};
//!
//! # fn main() -> rover_core::Result<()> {
//! let api_key = std::env::var("GOOGLE_API_KEY").unwrap_or_default();
//! let model = GeminiModel::new(api_key, "gemini-pro")?
//!     .with_temperature(0.0)
//!     .with_safety_settings(SafetySetting::for_all(HarmBlockThreshold::BlockNone));
//! # Ok(())
//! # }
//! ```
//!
//! Building a [`GeminiModel`] never touches the network; the first request is
//! sent by [`rover_core::Llm::generate_content`].

pub mod client;
pub mod safety;
mod wire;

pub use client::GeminiModel;
pub use safety::{HarmBlockThreshold, HarmCategory, SafetySetting};

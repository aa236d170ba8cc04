//! AI plumbing for mood analysis.
//!
//! This module covers everything between a composed prompt and a parsed JSON
//! object: calling the generation backend, falling back across models, building
//! prompts and chat context, and recovering JSON from raw model output.
//!
//! # Module Structure
//!
//! - `gemini`: HTTP client for the generation backend
//! - `dispatch`: the `ModelInvoker` seam and priority-ordered fallback
//! - `prompts`: prompt templates and generation settings
//! - `context`: bounded conversation history for chat prompts
//! - `sanitize`: JSON recovery from raw model output
//!
//! # Example
//!
//! ```no_run
//! use moodlog::ai::{journal_prompt, parse_model_json, FallbackDispatcher, GeminiClient, ModelChain};
//!
//! let client = GeminiClient::new("https://generativelanguage.googleapis.com/v1beta/models", "key");
//! let dispatcher = FallbackDispatcher::new(client, ModelChain::parse("gemini-2.5-flash")?);
//! let prompt = journal_prompt("Long day, but I'm proud of myself.");
//! let reply = dispatcher.dispatch(&prompt.render(), prompt.generation())?;
//! let parsed = parse_model_json(&reply.text);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod context;
pub mod dispatch;
pub mod gemini;
pub mod prompts;
pub mod sanitize;

// Re-export commonly used types
pub use context::build_context_window;
pub use dispatch::{FallbackDispatcher, ModelAttempt, ModelChain, ModelInvoker, ModelReply};
pub use gemini::{GeminiClient, GenerationConfig};
pub use prompts::{chat_prompt, journal_prompt, validation_prompt, Prompt};
pub use sanitize::parse_model_json;

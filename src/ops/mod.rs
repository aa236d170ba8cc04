//! High-level operations: the response pipeline and dashboard statistics.
//!
//! This module provides the user-facing operations that orchestrate the AI
//! plumbing in [`crate::ai`]: the validation gate, journal and chat analysis, and
//! the streak/activity aggregation shown on the dashboard.

pub mod gate;
pub mod pipeline;
pub mod stats;

// Re-export commonly used types
pub use gate::{GateState, ValidationGate};
pub use pipeline::ResponsePipeline;
pub use stats::{aggregate, ActivityStats, MoodSample};

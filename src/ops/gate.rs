//! Pre-analysis check that turns away unintelligible input.
//!
//! The gate spends one small model call to decide whether text is worth a full
//! analysis. Anything short of an explicit `{"isValid": true}` rejects the input:
//! a failed dispatch, unparseable output, or a verdict of the wrong shape.

use crate::ai::prompts::validation_prompt;
use crate::ai::sanitize::parse_model_json;
use crate::ai::{FallbackDispatcher, ModelInvoker};
use crate::journal_core::{AnalysisResult, GateVerdict, DEFAULT_CLARIFICATION};
use tracing::{debug, info, warn};

/// State of the validation gate for one piece of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Not yet checked
    Pending,
    /// Input may proceed to full analysis
    Valid,
    /// Input was rejected; `message` asks the user for clarification
    Invalid {
        /// Clarification shown to the user
        message: String,
    },
}

impl GateState {
    fn invalid(message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_CLARIFICATION.to_string());
        GateState::Invalid { message }
    }

    /// Returns true if the input may proceed.
    pub fn is_valid(&self) -> bool {
        matches!(self, GateState::Valid)
    }

    /// Converts an `Invalid` state into the short-circuit result (`mood: None`).
    ///
    /// Returns `None` for `Pending` and `Valid`.
    pub fn into_rejection(self) -> Option<AnalysisResult> {
        match self {
            GateState::Invalid { message } => Some(AnalysisResult::rejection(message)),
            GateState::Pending | GateState::Valid => None,
        }
    }
}

/// Runs the validation check through a dispatcher.
#[derive(Debug)]
pub struct ValidationGate<'a, I> {
    dispatcher: &'a FallbackDispatcher<I>,
}

impl<'a, I: ModelInvoker> ValidationGate<'a, I> {
    /// Creates a gate that sends its checks through `dispatcher`.
    pub fn new(dispatcher: &'a FallbackDispatcher<I>) -> Self {
        Self { dispatcher }
    }

    /// Moves `text` from `Pending` to `Valid` or `Invalid`.
    pub fn run(&self, text: &str) -> GateState {
        let state = GateState::Pending;
        debug!("Validation gate: {:?} ({} chars)", state, text.len());

        let prompt = validation_prompt(text);
        let reply = match self.dispatcher.dispatch(&prompt.render(), prompt.generation()) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Validation gate could not reach a model: {}", e);
                return GateState::invalid(None);
            }
        };

        let Some(value) = parse_model_json(&reply.text) else {
            info!("Validation gate output from {} was not JSON", reply.model_id);
            return GateState::invalid(None);
        };

        match GateVerdict::from_model_value(&value) {
            Some(GateVerdict { is_valid: true, .. }) => {
                debug!("Validation gate accepted input");
                GateState::Valid
            }
            Some(GateVerdict { message, .. }) => {
                info!("Validation gate rejected input");
                GateState::invalid(message)
            }
            None => {
                info!("Validation gate verdict had the wrong shape");
                GateState::invalid(None)
            }
        }
    }
}

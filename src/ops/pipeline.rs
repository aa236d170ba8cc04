//! End-to-end response pipeline: raw text in, `AnalysisResult` out.
//!
//! The pipeline holds no state between calls and never persists anything; saving
//! a result is the caller's job. Failure policy:
//!
//! - the analysis call exhausting every model returns `AIError::AllModelsFailed`
//! - malformed model output degrades to a fixed fallback result
//! - the validation gate rejecting input returns a `mood: None` result

use crate::ai::context::build_context_window;
use crate::ai::prompts::{chat_prompt, journal_prompt, Prompt};
use crate::ai::sanitize::parse_model_json;
use crate::ai::{FallbackDispatcher, ModelChain, ModelInvoker};
use crate::errors::AppResult;
use crate::journal_core::{AnalysisRequest, AnalysisResult, ParsedOutput};
use crate::ops::gate::ValidationGate;
use tracing::{debug, info, warn};

/// Orchestrates the validation gate, prompt composition, dispatch and parsing.
///
/// # Example
///
/// ```no_run
/// use moodlog::ai::{GeminiClient, ModelChain};
/// use moodlog::journal_core::AnalysisRequest;
/// use moodlog::ops::ResponsePipeline;
///
/// let client = GeminiClient::new("https://generativelanguage.googleapis.com/v1beta/models", "key");
/// let pipeline = ResponsePipeline::new(client, ModelChain::parse("gemini-2.5-flash")?);
///
/// let request = AnalysisRequest::new("I finally called my sister today.", Vec::new())?;
/// let result = pipeline.analyze_journal(&request)?;
/// println!("{:?}", result.mood);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ResponsePipeline<I> {
    dispatcher: FallbackDispatcher<I>,
}

impl<I: ModelInvoker> ResponsePipeline<I> {
    /// Creates a pipeline calling `invoker` with the given model priority order.
    pub fn new(invoker: I, models: ModelChain) -> Self {
        Self::from_dispatcher(FallbackDispatcher::new(invoker, models))
    }

    /// Creates a pipeline around an existing dispatcher.
    pub fn from_dispatcher(dispatcher: FallbackDispatcher<I>) -> Self {
        Self { dispatcher }
    }

    /// The validation gate used by journal analysis.
    pub fn gate(&self) -> ValidationGate<'_, I> {
        ValidationGate::new(&self.dispatcher)
    }

    /// Routes to chat analysis when the request carries history, journal analysis otherwise.
    pub fn analyze(&self, request: &AnalysisRequest) -> AppResult<AnalysisResult> {
        if request.history().is_empty() {
            self.analyze_journal(request)
        } else {
            self.analyze_chat(request)
        }
    }

    /// Analyzes a standalone journal entry.
    ///
    /// # Flow
    ///
    /// 1. Run the validation gate; return its rejection if the input is invalid
    /// 2. Compose the journal-analysis prompt
    /// 3. Dispatch through the model chain
    /// 4. Parse and schema-check the output, falling back to a neutral result
    ///
    /// Any history on the request is ignored.
    ///
    /// # Errors
    ///
    /// Returns `AIError::AllModelsFailed` if no model answered the analysis call.
    pub fn analyze_journal(&self, request: &AnalysisRequest) -> AppResult<AnalysisResult> {
        info!("Analyzing journal entry ({} chars)", request.text().len());

        if let Some(rejection) = self.gate().run(request.text()).into_rejection() {
            info!("Journal entry rejected by validation gate");
            return Ok(rejection);
        }

        let prompt = journal_prompt(request.text());
        self.complete(&prompt, AnalysisResult::journal_fallback())
    }

    /// Produces a counselor reply to a chat message, using the request history as context.
    ///
    /// Chat turns are not gated.
    ///
    /// # Errors
    ///
    /// Returns `AIError::AllModelsFailed` if no model answered.
    pub fn analyze_chat(&self, request: &AnalysisRequest) -> AppResult<AnalysisResult> {
        info!(
            "Analyzing chat message ({} chars, {} prior exchanges)",
            request.text().len(),
            request.history().len()
        );

        let context = build_context_window(request.history());
        let prompt = chat_prompt(request.text(), &context);
        self.complete(&prompt, AnalysisResult::chat_fallback())
    }

    fn complete(&self, prompt: &Prompt, fallback: AnalysisResult) -> AppResult<AnalysisResult> {
        let reply = self.dispatcher.dispatch(&prompt.render(), prompt.generation())?;
        debug!("Parsing reply from {}", reply.model_id);

        let parsed = match parse_model_json(&reply.text) {
            Some(value) => AnalysisResult::from_model_value(&value),
            None => ParsedOutput::Malformed,
        };

        if parsed == ParsedOutput::Malformed {
            warn!(
                "Model {} returned malformed output, using fallback",
                reply.model_id
            );
        }

        Ok(parsed.unwrap_or(fallback))
    }
}

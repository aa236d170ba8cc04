//! Priority-ordered fallback across generation models.
//!
//! The only resilience strategy is horizontal: each model id in the chain gets
//! exactly one attempt, in order, and the first success wins. There are no retries
//! and no backoff, and attempts never overlap, so at most one paid call is in
//! flight per dispatch.

use super::gemini::GenerationConfig;
use crate::constants::DEFAULT_MODELS;
use crate::errors::{AIError, AppError, AppResult};
use tracing::{debug, info, warn};

/// A single text-generation backend.
///
/// Implementations perform one call per invocation and report failure as a value.
pub trait ModelInvoker {
    /// Generates text for `prompt` with `model_id`, returning the raw model output.
    fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> Result<String, AIError>;
}

impl<T: ModelInvoker + ?Sized> ModelInvoker for &T {
    fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> Result<String, AIError> {
        (**self).invoke(model_id, prompt, generation)
    }
}

/// Immutable, non-empty, priority-ordered list of model ids.
///
/// # Examples
///
/// ```
/// use moodlog::ai::ModelChain;
///
/// let chain = ModelChain::parse("gemini-2.5-pro, gemini-2.5-flash,,").unwrap();
/// assert_eq!(chain.ids(), ["gemini-2.5-pro", "gemini-2.5-flash"]);
///
/// assert!(ModelChain::parse(" , ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChain {
    ids: Vec<String>,
}

impl ModelChain {
    /// Builds a chain from model ids, most preferred first. Blank ids are dropped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if no ids remain.
    pub fn new<I, S>(ids: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<String> = ids
            .into_iter()
            .map(|id| id.as_ref().trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        if ids.is_empty() {
            return Err(AppError::Config(
                "At least one model id must be configured".to_string(),
            ));
        }

        Ok(Self { ids })
    }

    /// Parses a comma-separated list of model ids.
    pub fn parse(list: &str) -> AppResult<Self> {
        Self::new(list.split(','))
    }

    /// Model ids in priority order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

impl Default for ModelChain {
    /// The built-in priority order, [`DEFAULT_MODELS`].
    fn default() -> Self {
        Self {
            ids: DEFAULT_MODELS.iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Record of one attempt made during a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAttempt {
    /// The model id that was tried
    pub model_id: String,
    /// Whether the attempt produced a response
    pub succeeded: bool,
}

/// Successful dispatch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    /// The model that answered
    pub model_id: String,
    /// Raw generated text
    pub text: String,
    /// Every attempt made, ending with the successful one
    pub attempts: Vec<ModelAttempt>,
}

/// Tries each model in a [`ModelChain`] until one succeeds.
#[derive(Debug)]
pub struct FallbackDispatcher<I> {
    invoker: I,
    models: ModelChain,
}

impl<I: ModelInvoker> FallbackDispatcher<I> {
    /// Creates a dispatcher over `invoker` using the given model priority order.
    pub fn new(invoker: I, models: ModelChain) -> Self {
        Self { invoker, models }
    }

    /// The configured model chain.
    pub fn models(&self) -> &ModelChain {
        &self.models
    }

    /// Sends `prompt` to each model in order and returns the first success.
    ///
    /// # Errors
    ///
    /// Returns `AIError::AllModelsFailed` with every attempt, in order, if no model
    /// produced a response.
    pub fn dispatch(
        &self,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> Result<ModelReply, AIError> {
        let mut attempts = Vec::with_capacity(self.models.ids().len());

        for model_id in self.models.ids() {
            match self.invoker.invoke(model_id, prompt, generation) {
                Ok(text) => {
                    attempts.push(ModelAttempt {
                        model_id: model_id.clone(),
                        succeeded: true,
                    });
                    debug!("Model {} answered after {} attempt(s)", model_id, attempts.len());
                    return Ok(ModelReply {
                        model_id: model_id.clone(),
                        text,
                        attempts,
                    });
                }
                Err(e) => {
                    warn!("Model {} failed, falling back: {}", model_id, e);
                    attempts.push(ModelAttempt {
                        model_id: model_id.clone(),
                        succeeded: false,
                    });
                }
            }
        }

        info!("All {} models failed", attempts.len());
        Err(AIError::AllModelsFailed { attempts })
    }
}

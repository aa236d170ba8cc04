//! HTTP client for the hosted text-generation backend.
//!
//! This module provides [`GeminiClient`], the production [`ModelInvoker`]. It makes
//! exactly one outbound call per invocation and reports every failure as an
//! [`AIError`] so the fallback dispatcher can move on to the next model.

use super::dispatch::ModelInvoker;
use crate::constants::REDACTED_PLACEHOLDER;
use crate::errors::{AIError, AppError, AppResult};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Sampling settings sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum number of tokens the model may produce
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Creates a new generation config.
    pub const fn new(temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            max_output_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<TextPart<'a>>,
}

/// Request body for `:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: &'a GenerationConfig,
}

/// Response from `:generateContent`. Every level is optional in practice.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text at `candidates[0].content.parts[0].text`, or an empty string.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default()
    }
}

/// Client for the generation backend.
pub struct GeminiClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl GeminiClient {
    /// Creates a new client without a request timeout.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL of the models collection (e.g. "https://generativelanguage.googleapis.com/v1beta/models")
    /// * `api_key` - Backend secret, sent as the `key` query parameter
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Creates a new client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client,
        })
    }

    fn model_url(&self, model_id: &str) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            model_id
        )
    }
}

impl ModelInvoker for GeminiClient {
    /// Sends one generation request for `model_id`.
    ///
    /// A 2xx reply whose envelope carries no text yields an empty string; deciding
    /// whether that is usable is left to the sanitizer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The backend is unreachable or the request times out (`Transport`)
    /// - The backend answers with a non-success status (`HttpStatus`)
    /// - The response envelope is not valid JSON (`InvalidResponse`)
    fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> Result<String, AIError> {
        debug!(
            "Calling model {} (prompt {} chars, temperature {})",
            model_id,
            prompt.len(),
            generation.temperature
        );

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: generation,
        };

        let response = self
            .client
            .post(self.model_url(model_id))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            // The URL carries the API key as a query parameter.
            .map_err(|source| AIError::Transport {
                model: model_id.to_string(),
                source: source.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AIError::HttpStatus {
                model: model_id.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().map_err(|e| {
            AIError::InvalidResponse(format!(
                "Failed to parse response from {}: {}",
                model_id,
                e.without_url()
            ))
        })?;

        let text = parsed.into_text();
        debug!("Model {} returned {} chars", model_id, text.len());
        Ok(text)
    }
}

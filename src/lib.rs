/*!
# moodlog

moodlog turns free-text journal entries into a structured mood analysis using a
hosted large language model, and keeps simple streak and mood statistics.

## Core Features

- Analyze a journal entry into `{mood, summary, advice}`, after a validation check
  that turns away unintelligible input
- Chat with a counselor persona that sees the last few exchanges
- Fall back across a priority-ordered list of models when one is unavailable
- Recover JSON from model output wrapped in fences, markup or prose
- Compute the current writing streak, weekly average and dominant mood

## Architecture

- `ai`: backend client, model fallback, prompts, chat context, output sanitizing
- `ops`: validation gate, response pipeline, activity statistics
- `journal_core`: request/result types and schema checks
- `journal_io`: JSON-file journal store used by the command-line caller
- `cli`, `config`, `errors`, `constants`: ambient plumbing

## Usage Example

```rust,no_run
use moodlog::ai::GeminiClient;
use moodlog::journal_core::AnalysisRequest;
use moodlog::ops::ResponsePipeline;
use moodlog::Config;

fn main() -> moodlog::AppResult<()> {
    let config = Config::load()?;
    let client = GeminiClient::with_timeout(
        &config.endpoint,
        config.require_api_key()?,
        config.request_timeout(),
    )?;
    let pipeline = ResponsePipeline::new(client, config.models.clone());

    let request = AnalysisRequest::new("Work was overwhelming but I went for a run.", Vec::new())?;
    let result = pipeline.analyze_journal(&request)?;
    println!("{}", result.advice);
    Ok(())
}
```
*/

/// Backend client, model fallback, prompts and output parsing
pub mod ai;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Constants used throughout the application
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Request/result types for the response pipeline
pub mod journal_core;
/// JSON-file journal entry store
pub mod journal_io;
/// Validation gate, response pipeline and statistics
pub mod ops;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::{AnalysisRequest, AnalysisResult, PriorExchange};
pub use ops::ResponsePipeline;

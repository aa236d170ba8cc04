/*!
# moodlog

A command-line mood journal. Entries are analyzed by a hosted language model,
which returns a mood label, a short summary and supportive advice.

## Usage

```text
moodlog [OPTIONS] <COMMAND>

Commands:
  analyze  Analyze a journal entry: mood, summary and advice
  chat     Talk with the counselor; recent journal entries are used as context
  list     List journal entries, newest first
  delete   Delete a journal entry
  stats    Show streak and mood statistics

Options:
  -v, --verbose                  Print verbose output (debug-level logs)
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
      --log-level <LOG_LEVEL>    Log level filter (overrides RUST_LOG)
```

## Configuration

See [`moodlog::config`] for the environment variables read at startup.
*/

use chrono::{Local, Utc};
use clap::Parser;
use moodlog::ai::GeminiClient;
use moodlog::cli::{join_text, CliArgs, Command};
use moodlog::config::Config;
use moodlog::constants::{
    ACTIVITY_TIMELINE_DAYS, DATE_FORMAT_ISO, DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON,
    TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use moodlog::errors::{AppError, AppResult};
use moodlog::journal_core::{AnalysisRequest, AnalysisResult};
use moodlog::journal_io::JournalStore;
use moodlog::ops::stats::{aggregate, MoodSample};
use moodlog::ops::ResponsePipeline;
use std::process::ExitCode;
use tracing::{error, info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Shown instead of the raw error when every model failed.
const SERVICE_UNAVAILABLE_MESSAGE: &str = "Something went wrong. Please try again.";

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting moodlog");

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::AI(e)) if e.is_all_models_failed() => {
            error!("Generation backend unavailable: {}", e);
            eprintln!("{}", SERVICE_UNAVAILABLE_MESSAGE);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the global subscriber. Logs go to stderr so stdout stays clean.
fn init_tracing(args: &CliArgs) {
    let filter = match (&args.log_level, args.verbose) {
        (Some(level), _) => EnvFilter::new(level),
        (None, true) => EnvFilter::new("debug"),
        (None, false) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A second initialisation only happens in tests; ignoring it is harmless.
    if args.log_format == LOG_FORMAT_JSON {
        let _ = builder.json().with_current_span(true).try_init();
    } else {
        let _ = builder.with_target(false).try_init();
    }
}

fn build_pipeline(config: &Config) -> AppResult<ResponsePipeline<GeminiClient>> {
    let client = GeminiClient::with_timeout(
        &config.endpoint,
        config.require_api_key()?,
        config.request_timeout(),
    )?;
    Ok(ResponsePipeline::new(client, config.models.clone()))
}

fn run(command: Command) -> AppResult<()> {
    let config = Config::load()?;
    let store = JournalStore::new(&config.journal_file);

    match command {
        Command::Analyze { text, save, json } => {
            let request = AnalysisRequest::new(join_text(&text), Vec::new())?;
            let pipeline = build_pipeline(&config)?;
            let result = pipeline.analyze_journal(&request)?;

            if json {
                let out = serde_json::to_string_pretty(&result)
                    .map_err(|e| AppError::Journal(format!("Failed to encode result: {}", e)))?;
                println!("{}", out);
            } else {
                print_result(&result);
            }

            if save && !result.is_rejection() {
                let entry = store.append(request.text(), &result, Utc::now())?;
                info!("Saved entry {}", entry.id);
                if !json {
                    println!("\nSaved entry {}", entry.id);
                }
            }
        }

        Command::Chat { text } => {
            let history = store.history()?;
            let request = AnalysisRequest::new(join_text(&text), history)?;
            let pipeline = build_pipeline(&config)?;
            let result = pipeline.analyze_chat(&request)?;

            println!("{}", result.advice);
            store.append(request.text(), &result, Utc::now())?;
        }

        Command::List { limit } => {
            let entries = store.list()?;
            if entries.is_empty() {
                println!("No journal entries yet.");
            }
            for entry in entries.iter().take(limit.unwrap_or(usize::MAX)) {
                println!(
                    "{}  {}  {:<10} {}",
                    entry.id,
                    entry
                        .created_at
                        .with_timezone(&Local)
                        .format(DATE_FORMAT_ISO),
                    entry.mood,
                    entry.summary
                );
            }
        }

        Command::Delete { id } => {
            store.delete(id)?;
            println!("Deleted entry {}", id);
        }

        Command::Stats => {
            let entries = store.load()?;
            let samples: Vec<MoodSample> = entries.iter().map(MoodSample::from).collect();
            let now = Local::now();
            let stats = aggregate(&samples, &now);

            println!("Total entries:   {}", stats.total_count);
            println!("Current streak:  {} days", stats.current_streak);
            println!("Avg. per week:   {:.1}", stats.avg_per_week);
            println!("Overall mood:    {}", stats.dominant_mood);

            let distribution = stats.mood_distribution();
            if !distribution.is_empty() {
                println!("\nMoods:");
                for (mood, count) in distribution {
                    println!("  {:<10} {}", mood, count);
                }
            }

            println!("\nLast {} days:", ACTIVITY_TIMELINE_DAYS);
            for (date, count) in stats.activity_timeline(now.date_naive(), ACTIVITY_TIMELINE_DAYS)
            {
                println!("  {}  {}", date.format(DATE_FORMAT_ISO), "#".repeat(count));
            }
        }
    }

    Ok(())
}

fn print_result(result: &AnalysisResult) {
    match (&result.mood, &result.summary) {
        (Some(mood), summary) => {
            println!("Mood: {}", mood);
            if let Some(summary) = summary {
                println!("Summary: {}", summary);
            }
            println!("\n{}", result.advice);
        }
        (None, _) => println!("{}", result.advice),
    }
}

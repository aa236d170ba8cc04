//! Command-line interface definitions using clap.

use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use clap::{Parser, Subcommand};
use uuid::Uuid;

/// A mood journal with AI reflections and gentle advice
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, author, version, long_about = None)]
pub struct CliArgs {
    /// What to do
    #[command(subcommand)]
    pub command: Command,

    /// Print verbose output (debug-level logs)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, global = true, default_value = LOG_FORMAT_TEXT, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: String,

    /// Log level filter (overrides RUST_LOG), e.g. "info" or "moodlog=debug"
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Analyze a journal entry: mood, summary and advice
    Analyze {
        /// The entry text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Save the analyzed entry to the journal
        #[arg(short = 's', long)]
        save: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Talk with the counselor; recent journal entries are used as context
    Chat {
        /// Your message
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List journal entries, newest first
    List {
        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Delete a journal entry
    Delete {
        /// Id of the entry to delete
        id: Uuid,
    },

    /// Show streak and mood statistics
    Stats,
}

/// Joins positional words into one text, as typed on the command line.
pub fn join_text(words: &[String]) -> String {
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command() {
        let args = CliArgs::parse_from(["moodlog", "analyze", "I", "feel", "calm"]);
        match args.command {
            Command::Analyze { text, save, json } => {
                assert_eq!(join_text(&text), "I feel calm");
                assert!(!save);
                assert!(!json);
            }
            other => panic!("Expected Analyze, got {:?}", other),
        }
        assert!(!args.verbose);
        assert_eq!(args.log_format, LOG_FORMAT_TEXT);
    }

    #[test]
    fn test_analyze_flags() {
        let args = CliArgs::parse_from(["moodlog", "analyze", "--save", "--json", "hello"]);
        assert_eq!(
            args.command,
            Command::Analyze {
                text: vec!["hello".to_string()],
                save: true,
                json: true,
            }
        );

        let args = CliArgs::parse_from(["moodlog", "analyze", "-s", "hello"]);
        assert!(matches!(args.command, Command::Analyze { save: true, .. }));
    }

    #[test]
    fn test_analyze_requires_text() {
        assert!(CliArgs::try_parse_from(["moodlog", "analyze"]).is_err());
    }

    #[test]
    fn test_chat_command() {
        let args = CliArgs::parse_from(["moodlog", "chat", "how", "are", "you"]);
        assert_eq!(
            args.command,
            Command::Chat {
                text: vec!["how".into(), "are".into(), "you".into()]
            }
        );
    }

    #[test]
    fn test_list_and_stats_commands() {
        let args = CliArgs::parse_from(["moodlog", "list", "-n", "5"]);
        assert_eq!(args.command, Command::List { limit: Some(5) });

        let args = CliArgs::parse_from(["moodlog", "stats"]);
        assert_eq!(args.command, Command::Stats);
    }

    #[test]
    fn test_delete_parses_uuid() {
        let id = Uuid::new_v4();
        let args = CliArgs::parse_from(["moodlog", "delete", &id.to_string()]);
        assert_eq!(args.command, Command::Delete { id });

        assert!(CliArgs::try_parse_from(["moodlog", "delete", "not-a-uuid"]).is_err());
    }

    #[test]
    fn test_global_logging_flags() {
        let args = CliArgs::parse_from([
            "moodlog",
            "stats",
            "--verbose",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ]);
        assert!(args.verbose);
        assert_eq!(args.log_format, LOG_FORMAT_JSON);
        assert_eq!(args.log_level.as_deref(), Some("debug"));

        assert!(CliArgs::try_parse_from(["moodlog", "stats", "--log-format", "xml"]).is_err());
    }
}

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

use moodlog::config::Config;
use moodlog::constants::{DEFAULT_ENDPOINT, DEFAULT_MODELS, DEFAULT_TIMEOUT_SECS};
use moodlog::errors::AppError;

const VARS: [&str; 7] = [
    "MOODLOG_API_KEY",
    "GEMINI_API_KEY",
    "MOODLOG_ENDPOINT",
    "MOODLOG_MODELS",
    "MOODLOG_JOURNAL_FILE",
    "MOODLOG_TIMEOUT_SECS",
    "HOME",
];

/// Clears the config variables for the duration of `test`, then restores them.
fn with_clean_env<F: FnOnce()>(test: F) {
    let saved: Vec<(&str, Option<String>)> = VARS.iter().map(|v| (*v, env::var(v).ok())).collect();
    for var in VARS {
        env::remove_var(var);
    }

    test();

    for (var, value) in saved {
        match value {
            Some(val) => env::set_var(var, val),
            None => env::remove_var(var),
        }
    }
}

#[test]
#[serial]
fn test_config_defaults() {
    with_clean_env(|| {
        env::set_var("HOME", "/home/tester");

        let config = Config::load().unwrap();

        assert_eq!(config.api_key, "");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.models.ids(), DEFAULT_MODELS);
        assert_eq!(
            config.journal_file,
            PathBuf::from("/home/tester/.moodlog/journal.json")
        );
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.require_api_key().is_err());
    });
}

#[test]
#[serial]
fn test_config_load_with_environment_vars() {
    with_clean_env(|| {
        let temp_dir = tempdir().unwrap();
        let journal = temp_dir.path().join("mine.json");

        env::set_var("MOODLOG_API_KEY", "primary-key");
        env::set_var("GEMINI_API_KEY", "secondary-key");
        env::set_var("MOODLOG_ENDPOINT", "http://localhost:8080/models");
        env::set_var("MOODLOG_MODELS", " fast , , slow ");
        env::set_var("MOODLOG_JOURNAL_FILE", &journal);
        env::set_var("MOODLOG_TIMEOUT_SECS", "5");

        let config = Config::load().unwrap();

        assert_eq!(config.require_api_key().unwrap(), "primary-key");
        assert_eq!(config.endpoint, "http://localhost:8080/models");
        assert_eq!(config.models.ids(), ["fast", "slow"]);
        assert_eq!(config.journal_file, journal);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    });
}

#[test]
#[serial]
fn test_gemini_api_key_is_fallback() {
    with_clean_env(|| {
        env::set_var("HOME", "/tmp");
        env::set_var("GEMINI_API_KEY", "fallback-key");

        let config = Config::load().unwrap();
        assert_eq!(config.require_api_key().unwrap(), "fallback-key");
    });
}

#[test]
#[serial]
fn test_journal_path_expands_tilde() {
    with_clean_env(|| {
        env::set_var("HOME", "/home/tester");
        env::set_var("MOODLOG_JOURNAL_FILE", "~/notes/journal.json");

        let config = Config::load().unwrap();
        assert_eq!(
            config.journal_file,
            PathBuf::from("/home/tester/notes/journal.json")
        );
    });
}

#[test]
#[serial]
fn test_models_list_without_ids_is_rejected() {
    with_clean_env(|| {
        env::set_var("HOME", "/tmp");
        env::set_var("MOODLOG_MODELS", " , ,");

        let result = Config::load();
        assert!(matches!(result, Err(AppError::Config(_))));
    });
}

#[test]
#[serial]
fn test_zero_timeout_is_rejected() {
    with_clean_env(|| {
        env::set_var("HOME", "/tmp");
        env::set_var("MOODLOG_TIMEOUT_SECS", "0");

        match Config::load() {
            Err(AppError::Config(msg)) => assert!(msg.contains("MOODLOG_TIMEOUT_SECS")),
            other => panic!("Expected config error, got {:?}", other),
        }
    });
}

#[test]
#[serial]
fn test_non_http_endpoint_is_rejected() {
    with_clean_env(|| {
        env::set_var("HOME", "/tmp");
        env::set_var("MOODLOG_ENDPOINT", "ftp://example.com/models");

        let result = Config::load();
        assert!(matches!(result, Err(AppError::Config(_))));
    });
}

#[test]
#[serial]
fn test_config_debug_hides_secrets() {
    with_clean_env(|| {
        env::set_var("HOME", "/tmp");
        env::set_var("MOODLOG_API_KEY", "very-secret");

        let config = Config::load().unwrap();
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("very-secret"));
        assert!(!debug_output.contains("/tmp/.moodlog"));
    });
}

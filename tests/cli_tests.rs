
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::tempdir;
use test_helpers::{base_moodlog_command, envelope, TEST_API_KEY};

#[test]
fn test_cli_no_args_prints_usage() {
    let dir = tempdir().unwrap();
    let mut cmd = base_moodlog_command(&dir.path().join("journal.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_lists_subcommands() {
    let dir = tempdir().unwrap();
    let mut cmd = base_moodlog_command(&dir.path().join("journal.json"));

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_analyze_blank_text_fails_before_any_request() {
    let dir = tempdir().unwrap();
    let mut cmd = base_moodlog_command(&dir.path().join("journal.json"));

    cmd.env("MOODLOG_API_KEY", TEST_API_KEY)
        .env("MOODLOG_ENDPOINT", "http://127.0.0.1:9")
        .args(["analyze", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn test_analyze_without_api_key_fails() {
    let dir = tempdir().unwrap();
    let mut cmd = base_moodlog_command(&dir.path().join("journal.json"));

    cmd.args(["analyze", "I", "feel", "fine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key configured"));
}

#[test]
fn test_stats_on_empty_journal() {
    let dir = tempdir().unwrap();
    let mut cmd = base_moodlog_command(&dir.path().join("journal.json"));

    cmd.arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total entries:   0"))
        .stdout(predicate::str::contains("Current streak:  0 days"))
        .stdout(predicate::str::contains("No Data"));
}

#[test]
fn test_list_on_empty_journal() {
    let dir = tempdir().unwrap();
    let mut cmd = base_moodlog_command(&dir.path().join("journal.json"));

    cmd.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No journal entries yet."));
}

#[test]
fn test_delete_unknown_entry_fails() {
    let dir = tempdir().unwrap();
    let mut cmd = base_moodlog_command(&dir.path().join("journal.json"));

    cmd.args(["delete", "67e55044-10b1-426f-9247-bb680e5fe0c8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_timeout_is_config_error() {
    let dir = tempdir().unwrap();
    let mut cmd = base_moodlog_command(&dir.path().join("journal.json"));

    cmd.env("MOODLOG_TIMEOUT_SECS", "soon")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MOODLOG_TIMEOUT_SECS"));
}

#[test]
fn test_unreachable_backend_shows_generic_message() {
    let dir = tempdir().unwrap();
    let mut cmd = base_moodlog_command(&dir.path().join("journal.json"));

    cmd.env("MOODLOG_API_KEY", TEST_API_KEY)
        .env("MOODLOG_ENDPOINT", "http://127.0.0.1:9")
        .env("MOODLOG_MODELS", "only-model")
        .env("MOODLOG_TIMEOUT_SECS", "2")
        .args(["chat", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Something went wrong. Please try again.",
        ));
}

#[test]
fn test_failed_requests_keep_api_key_out_of_logs() {
    let secret = "SUPERSECRETKEY123";
    let dir = tempdir().unwrap();
    let mut cmd = base_moodlog_command(&dir.path().join("journal.json"));

    cmd.env("MOODLOG_API_KEY", secret)
        .env("MOODLOG_ENDPOINT", "http://127.0.0.1:9")
        .env("MOODLOG_MODELS", "first-model,second-model")
        .env("MOODLOG_TIMEOUT_SECS", "2")
        .args(["--log-level", "debug", "chat", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("first-model"))
        .stderr(predicate::str::contains(secret).not());
}

#[test]
fn test_analyze_save_then_list_and_stats() {
    let dir = tempdir().unwrap();
    let journal = dir.path().join("journal.json");

    let mut server = Server::new();
    let _gate = server
        .mock("POST", "/m1:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), TEST_API_KEY.into()))
        .match_body(Matcher::Regex("screen input for a mood journal".to_string()))
        .with_status(200)
        .with_body(envelope("{\"isValid\": true}"))
        .create();
    let _analysis = server
        .mock("POST", "/m1:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), TEST_API_KEY.into()))
        .match_body(Matcher::Regex("Analyze the journal entry".to_string()))
        .with_status(200)
        .with_body(envelope(
            "{\"mood\": \"happy\", \"summary\": \"Sunny walk.\", \"advice\": \"Savor it.\"}",
        ))
        .create();

    let mut analyze = base_moodlog_command(&journal);
    analyze
        .env("MOODLOG_API_KEY", TEST_API_KEY)
        .env("MOODLOG_ENDPOINT", server.url())
        .env("MOODLOG_MODELS", "m1")
        .args(["analyze", "--save", "Took", "a", "sunny", "walk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mood: happy"))
        .stdout(predicate::str::contains("Savor it."))
        .stdout(predicate::str::contains("Saved entry"));

    let mut list = base_moodlog_command(&journal);
    list.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunny walk."));

    let mut stats = base_moodlog_command(&journal);
    stats
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total entries:   1"))
        .stdout(predicate::str::contains("Current streak:  1 days"))
        .stdout(predicate::str::contains("Overall mood:    Happy"));
}

#[test]
fn test_analyze_json_output() {
    let dir = tempdir().unwrap();
    let journal = dir.path().join("journal.json");

    let mut server = Server::new();
    let _gate = server
        .mock("POST", "/m1:generateContent")
        .match_query(Matcher::Any)
        .match_body(Matcher::Regex("screen input for a mood journal".to_string()))
        .with_status(200)
        .with_body(envelope("{\"isValid\": false}"))
        .create();

    let mut cmd = base_moodlog_command(&journal);
    let output = cmd
        .env("MOODLOG_API_KEY", TEST_API_KEY)
        .env("MOODLOG_ENDPOINT", server.url())
        .env("MOODLOG_MODELS", "m1")
        .args(["analyze", "--json", "--save", "qwpoeiru"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["mood"].is_null());
    assert!(value["summary"].is_null());
    assert!(value["advice"].as_str().unwrap().len() > 10);

    // Rejected input is never saved.
    assert!(!journal.exists());
}

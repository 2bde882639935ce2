//! End-to-end tests for the `trading-mentor` binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY_ENV: &str = "TRADING_MENTOR_CLI_TEST_KEY";

fn config_yaml(api_base: &str) -> String {
    format!(
        r#"
provider:
  type: gemini
  gemini:
    model: {model}
    api_base: "{api_base}"
    api_key_env: {key_env}
    keyring_service: trading-mentor-cli-test
    keyring_user: nobody
mentor:
  system_instruction: "You are a trading mentor."
  temperature: 0.5
  greeting: null
"#,
        model = common::TEST_MODEL,
        api_base = api_base,
        key_env = KEY_ENV,
    )
}

fn mentor_cmd() -> Command {
    let mut cmd = Command::cargo_bin("trading-mentor").unwrap();
    cmd.env_remove("TRADING_MENTOR_MODEL")
        .env_remove("TRADING_MENTOR_API_BASE")
        .env_remove("TRADING_MENTOR_PROVIDER");
    cmd
}

#[test]
fn test_help_lists_commands() {
    mentor_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("ask"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let (_dir, config_path) = common::temp_config_file(
        r#"
provider:
  type: gemini
mentor:
  temperature: 5.0
"#,
    );

    mentor_cmd()
        .args(["--config", config_path.to_str().unwrap(), "ask", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mentor.temperature"));
}

#[test]
fn test_missing_credentials_fail_fast() {
    let (_dir, config_path) = common::temp_config_file(&config_yaml("http://127.0.0.1:1"));

    mentor_cmd()
        .env_remove(KEY_ENV)
        .args(["--config", config_path.to_str().unwrap(), "ask", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing credentials"));
}

#[tokio::test]
async fn test_ask_prints_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::GENERATE_PATH))
        .and(header("x-goog-api-key", "cli-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "Backtest first."}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config_path) = common::temp_config_file(&config_yaml(&server.uri()));

    tokio::task::spawn_blocking(move || {
        mentor_cmd()
            .env(KEY_ENV, "cli-key")
            .args([
                "--config",
                config_path.to_str().unwrap(),
                "ask",
                "Should I go live?",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Backtest first."));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_ask_reports_reauthorization_on_forbidden() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
        })))
        .mount(&server)
        .await;

    let (_dir, config_path) = common::temp_config_file(&config_yaml(&server.uri()));

    tokio::task::spawn_blocking(move || {
        mentor_cmd()
            .env(KEY_ENV, "revoked-key")
            .args(["--config", config_path.to_str().unwrap(), "ask", "hello"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                trading_mentor::advisor::REAUTHORIZE_MESSAGE,
            ));
    })
    .await
    .unwrap();
}

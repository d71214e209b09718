use std::io::Write;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tempfile::{NamedTempFile, TempDir};
use tokio::time::{sleep, timeout};

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Write label dictionaries into `dir` and return their paths.
fn write_labels(dir: &Path) -> (PathBuf, PathBuf) {
    let triggers = dir.join("triggers.json");
    let themes = dir.join("themes.json");
    std::fs::write(&triggers, r#"["violence", "death"]"#).unwrap();
    std::fs::write(&themes, r#"["heist", "dystopia", "friendship"]"#).unwrap();
    (triggers, themes)
}

/// Create a minimal valid config
fn minimal_config(port: u16, dir: &Path, triggers: &Path, themes: &Path) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}

[labels]
triggers_path = {:?}
themes_path = {:?}

[cache]
path = {:?}
"#,
        port,
        triggers,
        themes,
        dir.join("summary_cache.json")
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

fn server_command(config_path: &Path) -> tokio::process::Command {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_bookblurb"));
    command
        .env("BOOKBLURB_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .env_remove("GOOGLE_KEY")
        .env_remove("OPENAI_KEY");
    command
}

/// Spawn the server and return a handle
fn spawn_server(config_path: &Path) -> tokio::process::Child {
    server_command(config_path)
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

/// Run the binary to completion, expecting it to exit on its own.
async fn run_to_exit(config_path: &Path) -> std::process::Output {
    timeout(Duration::from_secs(5), server_command(config_path).output())
        .await
        .expect("Command timed out")
        .expect("Failed to execute command")
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let (triggers, themes) = write_labels(dir.path());
    let port = get_available_port();
    let config = write_config(&minimal_config(port, dir.path(), &triggers, &themes));

    let mut server = spawn_server(config.path());

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["trigger_labels"], 2);
    assert_eq!(json["theme_labels"], 3);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_config_endpoint_returns_sanitized() {
    let dir = TempDir::new().unwrap();
    let (triggers, themes) = write_labels(dir.path());
    let port = get_available_port();
    let config = write_config(&minimal_config(port, dir.path(), &triggers, &themes));

    let mut server = spawn_server(config.path());

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/config", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["server"]["port"], port);
    assert_eq!(json["llm"]["model"], "gpt-3.5-turbo");
    assert_eq!(json["llm"]["api_key_configured"], false);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_empty_search_is_rejected_without_upstream() {
    let dir = TempDir::new().unwrap();
    let (triggers, themes) = write_labels(dir.path());
    let port = get_available_port();
    let config = write_config(&minimal_config(port, dir.path(), &triggers, &themes));

    let mut server = spawn_server(config.path());

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/search?q=", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 422);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    let result = run_to_exit(Path::new("/nonexistent/config.toml")).await;
    assert!(!result.status.success());
}

#[tokio::test]
async fn test_missing_labels_file_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let port = get_available_port();
    let config = write_config(&minimal_config(
        port,
        dir.path(),
        &dir.path().join("missing-triggers.json"),
        &dir.path().join("missing-themes.json"),
    ));

    let result = run_to_exit(config.path()).await;
    assert!(!result.status.success());
}

#[tokio::test]
async fn test_invalid_config_exits_with_error() {
    let config = write_config(
        r#"
[llm]
temperature = 5.0
"#,
    );

    let result = run_to_exit(config.path()).await;
    assert!(!result.status.success());
}

#[tokio::test]
async fn test_starts_from_environment_without_config_file() {
    // Default label paths resolve against the working directory
    let dir = TempDir::new().unwrap();
    let static_dir = dir.path().join("static");
    std::fs::create_dir(&static_dir).unwrap();
    write_labels(&static_dir);
    let port = get_available_port();

    let mut server = tokio::process::Command::new(env!("CARGO_BIN_EXE_bookblurb"))
        .current_dir(dir.path())
        .env_remove("BOOKBLURB_CONFIG")
        .env("GOOGLE_KEY", "g-key")
        .env("OPENAI_KEY", "sk-test")
        .env("BOOKBLURB_SERVER__HOST", "127.0.0.1")
        .env("BOOKBLURB_SERVER__PORT", port.to_string())
        .env("RUST_LOG", "error")
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server");

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let json: serde_json::Value = Client::new()
        .get(format!("http://127.0.0.1:{}/config", port))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(json["catalog"]["api_key_configured"], true);
    assert_eq!(json["llm"]["api_key_configured"], true);
    assert_eq!(json["labels"]["triggers_path"], "static/triggers.json");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_explicit_missing_config_exits_even_with_environment() {
    let dir = TempDir::new().unwrap();
    let static_dir = dir.path().join("static");
    std::fs::create_dir(&static_dir).unwrap();
    write_labels(&static_dir);

    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_bookblurb"))
            .current_dir(dir.path())
            .env("BOOKBLURB_CONFIG", dir.path().join("missing.toml"))
            .env("OPENAI_KEY", "sk-test")
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

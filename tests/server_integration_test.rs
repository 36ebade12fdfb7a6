use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use youtube_sheets_mcp::{Config, Server};

const TEST_PRIVATE_KEY: &str = include_str!("fixtures/test_private_key.pem");

fn test_config(credentials_path: PathBuf) -> Config {
    Config {
        youtube_api_key: "test-key".to_string(),
        spreadsheet_id: "sheet-123".to_string(),
        credentials_path,
    }
}

fn write_credentials(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("credentials.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "client_email": "robot@project.iam.gserviceaccount.com",
            "private_key": TEST_PRIVATE_KEY,
        })
        .to_string(),
    )
    .unwrap();
    path
}

#[tokio::test]
async fn test_server_lifecycle() {
    let server = Server::new(test_config(PathBuf::from("/nonexistent/credentials.json")));

    // Server should be created successfully
    assert!(!server.is_shutdown_requested());

    // Test immediate shutdown
    server.shutdown().await;
    assert!(server.is_shutdown_requested());
}

#[tokio::test]
async fn test_server_exposes_config() {
    let server = Server::new(test_config(PathBuf::from("credentials.json")));
    assert_eq!(server.config().spreadsheet_id, "sheet-123");
    assert_eq!(server.config().youtube_api_key, "test-key");
}

#[tokio::test]
async fn test_server_does_not_start_without_credentials() {
    // A missing credential file must keep the server from reaching a
    // ready state.
    let server = Server::new(test_config(PathBuf::from("/nonexistent/credentials.json")));
    let result = server.run().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_server_run_stops_on_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let server = Arc::new(Server::new(test_config(write_credentials(&dir))));

    // Start server in background
    let server_clone = Arc::clone(&server);
    let server_handle = tokio::spawn(async move { server_clone.run().await });

    // Give server a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Request shutdown
    server.shutdown().await;

    // The run task must finish within the shutdown window; whether it
    // reports Ok depends on how far the stdio handshake got in the test
    // harness, so only completion is asserted.
    let result = timeout(Duration::from_secs(8), server_handle).await;
    assert!(result.is_ok(), "Server should shut down after cancellation");
}

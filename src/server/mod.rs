pub mod handler;
pub mod transport;

use crate::{Config, Error, Result};
use rmcp::{service::ServiceExt, transport::stdio};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub use handler::{YouTubeSheetsHandler, TOOL_NAME};

/// How long graceful shutdown may take before it is forced.
const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Server {
    config: Arc<Config>,
    cancellation_token: CancellationToken,
}

impl Server {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            cancellation_token: CancellationToken::new(),
        }
    }

    pub async fn run(&self) -> Result<()> {
        info!("Starting MCP server infrastructure");

        // Create server handler; a bad credential document stops us here.
        let handler = YouTubeSheetsHandler::new(Arc::clone(&self.config))?;

        // Validate transport setup
        transport::validate_stdio_transport()
            .map_err(|e| Error::Service(format!("Transport validation failed: {e}")))?;

        info!("MCP server handler initialized successfully");

        // Setup signal handlers
        let shutdown_token = self.cancellation_token.clone();
        tokio::spawn(async move {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to setup SIGTERM handler");
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
                .expect("Failed to setup SIGINT handler");

            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, initiating graceful shutdown");
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, initiating graceful shutdown");
                }
            }

            shutdown_token.cancel();
        });

        // Start MCP server with stdio transport
        info!("Starting MCP server on stdio transport");

        let server_result = tokio::select! {
            result = self.run_mcp_server(handler) => {
                result
            }
            () = self.cancellation_token.cancelled() => {
                info!("Shutdown signal received, stopping MCP server");
                Ok(())
            }
        };

        // Close the transport cleanly before exiting.
        if tokio::time::timeout(GRACEFUL_SHUTDOWN_TIMEOUT, self.graceful_shutdown())
            .await
            .is_err()
        {
            warn!("Graceful shutdown timeout exceeded, forcing shutdown");
        }

        info!("MCP server shutdown complete");
        server_result
    }

    async fn run_mcp_server(&self, handler: YouTubeSheetsHandler) -> Result<()> {
        info!("Connecting MCP server to stdio transport");

        // Create stdio transport
        let transport = stdio();

        // Serve the MCP server
        let server = handler
            .serve(transport)
            .await
            .map_err(|e| Error::Service(format!("Failed to start MCP server: {e}")))?;

        // Wait for the server to complete
        let quit_reason = server
            .waiting()
            .await
            .map_err(|e| Error::Service(format!("MCP server error: {e}")))?;

        info!("MCP server completed with reason: {:?}", quit_reason);
        Ok(())
    }

    async fn graceful_shutdown(&self) -> Result<()> {
        info!("Performing graceful shutdown");

        // One request is processed at a time and nothing is buffered, so
        // closing the transport is the whole job.
        tokio::time::sleep(Duration::from_millis(100)).await;

        info!("Graceful shutdown completed");
        Ok(())
    }

    pub async fn shutdown(&self) {
        warn!("Initiating server shutdown");
        self.cancellation_token.cancel();

        // Give a moment for cleanup to begin
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    /// Check if the server has been requested to shutdown
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Get the server configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

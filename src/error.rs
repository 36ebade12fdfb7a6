use rmcp::model::ErrorCode;
use rmcp::ErrorData;
use thiserror::Error;

/// Error taxonomy for the adapter: fatal configuration problems,
/// per-request input problems, and downstream provider failures.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid credential format: {0}")]
    InvalidCredential(String),

    // I/O errors (credential file reads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    // Network errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Client errors (per-request, reported as invalid params)
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    // Downstream provider errors (per-request, reported as internal errors)
    #[error("{service} error: {message}")]
    Provider { service: String, message: String },

    // General service error
    #[error("Service error: {0}")]
    Service(String),
}

impl Error {
    /// Build a downstream-failure variant carrying the provider name and
    /// the original error's description.
    pub fn provider(service: impl Into<String>, message: impl ToString) -> Self {
        Self::Provider {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error is fatal at startup (the process must not come up).
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidCredential(_) | Self::Io(_)
        )
    }

    /// Map to the MCP protocol error surface. Invalid input becomes
    /// `invalid_params`; every downstream failure becomes `internal_error`
    /// with the original description embedded.
    pub fn into_error_data(self) -> ErrorData {
        match self {
            Self::InvalidInput { .. } => ErrorData::invalid_params(self.to_string(), None),
            other => ErrorData::internal_error(
                format!("Failed to search videos or save to sheets: {other}"),
                None,
            ),
        }
    }

    /// Protocol error for a tool name this server does not register.
    #[must_use]
    pub fn unknown_tool(name: &str) -> ErrorData {
        ErrorData::new(
            ErrorCode::METHOD_NOT_FOUND,
            format!("Unknown tool: {name}"),
            None,
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_preserves_message() {
        let err = Error::provider("YouTube", "quota exceeded");
        assert_eq!(err.to_string(), "YouTube error: quota exceeded");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(Error::Config("missing YOUTUBE_API_KEY".to_string()).is_fatal());
        assert!(Error::InvalidCredential("not JSON".to_string()).is_fatal());
        assert!(!Error::provider("Sheets", "500").is_fatal());
    }

    #[test]
    fn test_invalid_input_maps_to_invalid_params() {
        let err = Error::InvalidInput {
            field: "query".to_string(),
            reason: "Query cannot be empty".to_string(),
        };
        let data = err.into_error_data();
        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
        assert!(data.message.contains("Query cannot be empty"));
    }

    #[test]
    fn test_downstream_maps_to_internal_error_with_cause() {
        let err = Error::provider("YouTube", "Invalid query");
        let data = err.into_error_data();
        assert_eq!(data.code, ErrorCode::INTERNAL_ERROR);
        assert!(data.message.contains("Invalid query"));
    }

    #[test]
    fn test_unknown_tool_is_method_not_found() {
        let data = Error::unknown_tool("does_not_exist");
        assert_eq!(data.code, ErrorCode::METHOD_NOT_FOUND);
        assert!(data.message.contains("does_not_exist"));
    }
}

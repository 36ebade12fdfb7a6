use crate::client::{SheetsClient, TokenProvider, YouTubeClient};
use crate::tools::{SearchAndSaveInput, SearchAndSaveTool};
use crate::{Config, Error, Result};
use rmcp::{
    model::*,
    service::{RequestContext, RoleServer},
    ErrorData,
    ServerHandler,
};
use std::time::Duration;
use std::{future::Future, sync::Arc};
use tracing::{info, instrument};

/// Name of the single registered tool.
pub const TOOL_NAME: &str = "search_and_save";

const SERVER_INSTRUCTIONS: &str =
    "An MCP server that searches YouTube videos and appends the results to a Google Sheet. \
     Exposes a single tool: search_and_save.";

/// Main MCP server handler implementing rmcp
#[derive(Debug, Clone)]
pub struct YouTubeSheetsHandler {
    config: Arc<Config>,
    tool: SearchAndSaveTool,
}

impl YouTubeSheetsHandler {
    /// Wire the outbound clients from configuration and the service-account
    /// credential document. Any failure here is fatal at startup.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        info!("Initializing YouTube Sheets MCP server handler");

        let key = config.load_service_account_key()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("youtube-sheets-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Service(format!("Failed to create HTTP client: {e}")))?;

        let youtube = Arc::new(YouTubeClient::new(config.youtube_api_key.clone())?);
        let tokens = Arc::new(TokenProvider::new(http.clone(), &key)?);
        let sheets = Arc::new(SheetsClient::new(
            http,
            tokens,
            config.spreadsheet_id.clone(),
        ));

        let tool = SearchAndSaveTool::new(youtube, sheets);
        Ok(Self { config, tool })
    }

    /// Build a handler around an already-constructed tool (tests inject
    /// stub-backed clients this way).
    pub fn with_tool(config: Arc<Config>, tool: SearchAndSaveTool) -> Self {
        Self { config, tool }
    }

    /// The configuration this handler was built from.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dispatch one tool call. Unknown names fail with METHOD_NOT_FOUND
    /// before any provider call is issued.
    pub async fn handle_tool_call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        match name {
            TOOL_NAME => {
                let input: SearchAndSaveInput =
                    serde_json::from_value(serde_json::Value::Object(arguments.unwrap_or_default()))
                        .map_err(|e| {
                            ErrorData::invalid_params(
                                format!("Invalid search_and_save input: {e}"),
                                None,
                            )
                        })?;

                let result = self
                    .tool
                    .execute(input)
                    .await
                    .map_err(Error::into_error_data)?;

                let text = serde_json::to_string_pretty(&result).map_err(|e| {
                    ErrorData::internal_error(format!("Serialization failed: {e}"), None)
                })?;

                Ok(CallToolResult {
                    content: Some(vec![Content::text(text)]),
                    structured_content: None,
                    is_error: Some(false),
                })
            }
            other => Err(Error::unknown_tool(other)),
        }
    }
}

impl ServerHandler for YouTubeSheetsHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, request, context))]
    fn initialize(
        &self,
        request: InitializeRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<InitializeResult, ErrorData>> + Send + '_ {
        info!("MCP server initializing");

        async move {
            // Set peer info if not already set
            if context.peer.peer_info().is_none() {
                context.peer.set_peer_info(request);
            }

            Ok(InitializeResult {
                protocol_version: ProtocolVersion::default(),
                capabilities: ServerCapabilities::builder().enable_tools().build(),
                server_info: Implementation {
                    name: "youtube-sheets-mcp".into(),
                    version: env!("CARGO_PKG_VERSION").into(),
                },
                instructions: Some(SERVER_INSTRUCTIONS.into()),
            })
        }
    }

    #[instrument(skip(self, _request, _context))]
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<ListToolsResult, ErrorData>> + Send + '_ {
        info!("Listing available tools");

        async move {
            let tools = vec![Tool {
                name: TOOL_NAME.into(),
                description: Some("Search YouTube videos and save results to Google Sheets".into()),
                input_schema: Arc::new(
                    serde_json::to_value(schemars::schema_for!(SearchAndSaveInput))
                        .unwrap()
                        .as_object()
                        .unwrap()
                        .clone(),
                ),
                output_schema: None,
                annotations: None,
            }];

            Ok(ListToolsResult {
                tools,
                next_cursor: None,
            })
        }
    }

    #[instrument(skip(self, request, _context))]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<CallToolResult, ErrorData>> + Send + '_ {
        info!("Tool called: {}", request.name);

        async move {
            self.handle_tool_call(request.name.as_ref(), request.arguments)
                .await
        }
    }
}

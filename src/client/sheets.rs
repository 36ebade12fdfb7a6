use super::auth::TokenProvider;
use crate::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Default Sheets API endpoint.
const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Append target: the first four columns of the default sheet.
const APPEND_RANGE: &str = "A:D";

/// Localized header row, re-sent on every append call. The adapter does
/// not track whether the sheet already carries one.
pub const HEADER_ROW: [&str; 4] = ["タイトル", "URL", "チャンネル名", "公開日時"];

#[derive(Debug, Serialize)]
struct AppendRequest {
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// Google Sheets append client, authenticated through a service-account
/// token provider.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    tokens: Arc<TokenProvider>,
    spreadsheet_id: String,
    base_url: String,
}

impl SheetsClient {
    /// Create a client targeting one spreadsheet.
    pub fn new(
        client: Client,
        tokens: Arc<TokenProvider>,
        spreadsheet_id: impl Into<String>,
    ) -> Self {
        Self::with_base_url(client, tokens, spreadsheet_id, DEFAULT_BASE_URL)
    }

    /// Create a client against a specific API endpoint (tests point this at
    /// a local stub).
    pub fn with_base_url(
        client: Client,
        tokens: Arc<TokenProvider>,
        spreadsheet_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            tokens,
            spreadsheet_id: spreadsheet_id.into(),
            base_url: base_url.into(),
        }
    }

    fn append_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(APPEND_RANGE)
        )
    }

    /// Append rows after existing content in range `A:D`, interpreting
    /// values as if typed by a user (`USER_ENTERED`).
    pub async fn append(&self, values: Vec<Vec<String>>) -> Result<()> {
        info!(
            "Appending {} rows to spreadsheet {}",
            values.len(),
            self.spreadsheet_id
        );

        let token = self.tokens.access_token().await?;
        let url = self.append_url();
        debug!("Sheets append URL: {url}");

        let response = self
            .client
            .post(&url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(token)
            .json(&AppendRequest { values })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::provider("Sheets", format!("request timed out: {e}"))
                } else if e.is_connect() {
                    Error::provider("Sheets", format!("connection failed: {e}"))
                } else {
                    Error::provider("Sheets", format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(Error::provider(
                "Sheets",
                format!("HTTP {status}: {message}"),
            ));
        }

        debug!("Append accepted by Sheets API");
        Ok(())
    }
}

use crate::config::ServiceAccountKey;
use crate::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// OAuth2 scope granting spreadsheet read/write.
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Grant type for service-account JWT assertions.
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime requested from the token endpoint.
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this long before they actually expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

const fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Mints and caches access tokens for a Google service account.
///
/// The signing key is parsed once at construction so a malformed
/// credential document fails at startup, not on the first request.
pub struct TokenProvider {
    client: Client,
    signing_key: EncodingKey,
    client_email: String,
    token_uri: String,
    cached: RwLock<Option<CachedToken>>,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl TokenProvider {
    /// Create a provider from a decoded service-account key.
    pub fn new(client: Client, key: &ServiceAccountKey) -> Result<Self> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| Error::InvalidCredential(format!("private_key is not a valid RSA PEM: {e}")))?;

        Ok(Self {
            client,
            signing_key,
            client_email: key.client_email.clone(),
            token_uri: key.token_uri.clone(),
            cached: RwLock::new(None),
        })
    }

    /// Return a valid access token, minting a new one when the cached token
    /// is absent or near expiry.
    pub async fn access_token(&self) -> Result<String> {
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref() {
                if token.is_fresh() {
                    debug!("Reusing cached access token");
                    return Ok(token.token.clone());
                }
            }
        }

        let fresh = self.fetch_token().await?;
        let token = fresh.token.clone();
        *self.cached.write().await = Some(fresh);
        Ok(token)
    }

    fn build_assertion(&self) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: self.client_email.clone(),
            scope: SPREADSHEETS_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
            .map_err(|e| Error::AuthenticationFailed(format!("failed to sign assertion: {e}")))
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        info!("Requesting access token for {}", self.client_email);

        let assertion = self.build_assertion()?;
        let response = self
            .client
            .post(&self.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::AuthenticationFailed(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::AuthenticationFailed(format!(
                "token endpoint returned HTTP {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::AuthenticationFailed(format!("invalid token response: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in);
        let expires_at = Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN);

        debug!("Access token minted, valid for {}s", token.expires_in);
        Ok(CachedToken {
            token: token.access_token,
            expires_at,
        })
    }
}

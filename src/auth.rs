//! OAuth2 client-credentials token source.
//!
//! Obtains a bearer token from the configured authorization server and
//! caches it until it is close to expiry. The operations facade only ever
//! asks for "a currently valid token"; it never inspects token contents.

use crate::config::OAuth2Options;
use crate::error::{CredHubError, CredHubResult};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Refresh the token when it has less than this long left to live.
const EXPIRY_GRACE: Duration = Duration::from_secs(30);

/// Fallback lifetime when the token response omits `expires_in`.
const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<u64>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Caching token source for the OAuth2 client-credentials grant.
pub(crate) struct TokenSource {
    options: OAuth2Options,
    state: RwLock<Option<CachedToken>>,
}

impl TokenSource {
    pub(crate) fn new(options: OAuth2Options) -> Self {
        Self {
            options,
            state: RwLock::new(None),
        }
    }

    /// Return a valid bearer token, fetching a fresh one if the cached
    /// token is absent or inside the expiry grace period.
    pub(crate) async fn token(&self, http: &Client) -> CredHubResult<String> {
        if let Some(token) = self.fresh_token().await {
            return Ok(token);
        }

        let mut state = self.state.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(cached) = state.as_ref() {
            if cached.expires_at.saturating_duration_since(Instant::now()) > EXPIRY_GRACE {
                return Ok(cached.access_token.clone());
            }
        }

        debug!(token_url = %self.options.token_url, "Fetching OAuth2 token");
        let response = http
            .post(&self.options.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", &self.options.client_id),
                ("client_secret", self.options.client_secret.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| CredHubError::auth_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CredHubError::auth_failed(format!("Status {status}: {text}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CredHubError::auth_failed(e.to_string()))?;
        let ttl = token.expires_in.map_or(DEFAULT_TTL, Duration::from_secs);

        let access_token = token.access_token.clone();
        *state = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + ttl,
        });

        info!(ttl_secs = ttl.as_secs(), "Obtained OAuth2 token");
        Ok(access_token)
    }

    async fn fresh_token(&self) -> Option<String> {
        let state = self.state.read().await;
        let cached = state.as_ref()?;
        let remaining = cached.expires_at.saturating_duration_since(Instant::now());
        (remaining > EXPIRY_GRACE).then(|| cached.access_token.clone())
    }
}

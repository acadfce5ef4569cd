//! CredHub client configuration.
//!
//! All options are explicit: a [`CredHubConfig`] enumerating the base URL
//! and the optional OAuth2 and mutual-TLS settings is handed to
//! [`crate::CredHubClient::new`], which branches on whatever is present.

use crate::error::{CredHubError, CredHubResult};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// CredHub client configuration.
#[derive(Debug, Clone)]
pub struct CredHubConfig {
    /// CredHub server base URL, e.g. `https://credhub.example.com:8844`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// OAuth2 client-credentials settings; when present, every request
    /// carries a bearer token obtained from the token endpoint
    pub oauth2: Option<OAuth2Options>,
    /// TLS material for the HTTPS connection; when absent the platform
    /// trust roots are used and no client certificate is presented
    pub tls: Option<TlsOptions>,
}

/// OAuth2 client-credentials grant settings.
#[derive(Debug, Clone)]
pub struct OAuth2Options {
    /// Token endpoint URL of the authorization server
    pub token_url: String,
    /// OAuth2 client identifier
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: SecretString,
}

/// TLS material for the connection to CredHub.
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// PEM-encoded CA certificate to trust in addition to platform roots
    pub ca_cert_pem: Option<Vec<u8>>,
    /// PEM-encoded client certificate and private key for mutual TLS
    pub client_identity_pem: Option<Vec<u8>>,
}

impl Default for CredHubConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("CREDHUB_URL")
                .unwrap_or_else(|_| "https://localhost:8844".to_string()),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            oauth2: None,
            tls: None,
        }
    }
}

impl CredHubConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set OAuth2 client-credentials settings.
    #[must_use]
    pub fn with_oauth2(mut self, oauth2: OAuth2Options) -> Self {
        self.oauth2 = Some(oauth2);
        self
    }

    /// Set TLS material.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsOptions) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Validate the configuration before building a client.
    pub fn validate(&self) -> CredHubResult<()> {
        if self.base_url.is_empty() {
            return Err(CredHubError::invalid_config("base URL must not be empty"));
        }
        Url::parse(&self.base_url)
            .map_err(|e| CredHubError::invalid_config(format!("base URL: {e}")))?;

        if let Some(oauth2) = &self.oauth2 {
            if oauth2.client_id.is_empty() {
                return Err(CredHubError::invalid_config(
                    "OAuth2 client ID must not be empty",
                ));
            }
            if oauth2.client_secret.expose_secret().is_empty() {
                return Err(CredHubError::invalid_config(
                    "OAuth2 client secret must not be empty",
                ));
            }
            Url::parse(&oauth2.token_url)
                .map_err(|e| CredHubError::invalid_config(format!("OAuth2 token URL: {e}")))?;
        }
        Ok(())
    }
}

impl OAuth2Options {
    /// Create OAuth2 settings for the given token endpoint and client.
    #[must_use]
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }
}

impl TlsOptions {
    /// Trust an additional PEM-encoded CA certificate.
    #[must_use]
    pub fn with_ca_cert(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.ca_cert_pem = Some(pem.into());
        self
    }

    /// Present a PEM-encoded client certificate and key (mutual TLS).
    #[must_use]
    pub fn with_client_identity(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.client_identity_pem = Some(pem.into());
        self
    }
}

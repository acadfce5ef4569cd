//! CredHub operations facade and HTTP invocation layer.
//!
//! One method per verb: [`CredHubClient::write`], [`CredHubClient::generate`],
//! [`CredHubClient::regenerate`], [`CredHubClient::get_by_id`],
//! [`CredHubClient::get_by_name`], and [`CredHubClient::delete`]. Each call
//! performs exactly one HTTP round trip and either returns the typed result
//! or propagates a [`CredHubError`]; there are no retries and no caching of
//! credential data.

use crate::auth::TokenSource;
use crate::config::CredHubConfig;
use crate::credentials::{CredentialDetails, CredentialDetailsData, CredentialName, CredentialValue};
use crate::error::CredHubResult;
use crate::requests::{CredentialRequest, GenerationParameters, ParametersRequest};
use crate::response;
use reqwest::{Client, Method, StatusCode};
use tracing::{debug, instrument};

/// Collection endpoint for write, generate, and name-based lookups.
const BASE_URL_PATH: &str = "/api/v1/data";

/// Endpoint for regenerating a credential from its original parameters.
const REGENERATE_URL_PATH: &str = "/api/v1/regenerate";

/// CredHub client.
///
/// Holds one underlying HTTP client and, when OAuth2 is configured, a
/// cached bearer token. The client itself has no other mutable state, so
/// it is safe to share across tasks.
pub struct CredHubClient {
    http: Client,
    base_url: String,
    token_source: Option<TokenSource>,
}

impl CredHubClient {
    /// Build a client from the given configuration.
    ///
    /// TLS material and OAuth2 settings are applied here, as ordinary
    /// branching on the options present in the config.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CredHubError::InvalidConfig`] for an invalid
    /// configuration and [`crate::CredHubError::Http`] if the underlying
    /// HTTP client rejects the TLS material.
    pub fn new(config: CredHubConfig) -> CredHubResult<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        if let Some(tls) = &config.tls {
            if let Some(pem) = &tls.ca_cert_pem {
                builder = builder.add_root_certificate(reqwest::Certificate::from_pem(pem)?);
            }
            if let Some(pem) = &tls.client_identity_pem {
                builder = builder.identity(reqwest::Identity::from_pem(pem)?);
            }
        }

        let http = builder.build()?;
        let token_source = config.oauth2.map(TokenSource::new);
        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            token_source,
        })
    }

    /// Store a caller-supplied credential value.
    #[instrument(skip_all, fields(name = %request.name()))]
    pub async fn write<T: CredentialValue>(
        &self,
        request: &CredentialRequest<T>,
    ) -> CredHubResult<CredentialDetails<T>> {
        debug!("Writing credential");
        let body = serde_json::to_value(request)?;
        let (status, bytes) = self
            .exchange(Method::PUT, BASE_URL_PATH, None, Some(body))
            .await?;
        response::decode(status, &bytes)
    }

    /// Ask the service to generate a credential value from parameters.
    #[instrument(skip_all, fields(name = %request.name()))]
    pub async fn generate<P: GenerationParameters>(
        &self,
        request: &ParametersRequest<P>,
    ) -> CredHubResult<CredentialDetails<P::Output>> {
        debug!("Generating credential");
        let body = serde_json::to_value(request)?;
        let (status, bytes) = self
            .exchange(Method::POST, BASE_URL_PATH, None, Some(body))
            .await?;
        response::decode(status, &bytes)
    }

    /// Regenerate a previously generated credential from its original
    /// parameters, producing a new version.
    #[instrument(skip_all)]
    pub async fn regenerate<T: CredentialValue>(
        &self,
        name: impl Into<CredentialName>,
    ) -> CredHubResult<CredentialDetails<T>> {
        let name = name.into();
        debug!(name = %name, "Regenerating credential");
        let body = serde_json::json!({ "name": name.as_str() });
        let (status, bytes) = self
            .exchange(Method::POST, REGENERATE_URL_PATH, None, Some(body))
            .await?;
        response::decode(status, &bytes)
    }

    /// Retrieve a single credential version by its service-assigned id.
    #[instrument(skip(self))]
    pub async fn get_by_id<T: CredentialValue>(
        &self,
        id: &str,
    ) -> CredHubResult<CredentialDetails<T>> {
        debug!("Getting credential by id");
        let path = format!("{BASE_URL_PATH}/{id}");
        let (status, bytes) = self.exchange(Method::GET, &path, None, None).await?;
        response::decode(status, &bytes)
    }

    /// Retrieve all stored versions of a credential by name, in the order
    /// the service returns them (most recent first; not re-sorted locally).
    #[instrument(skip_all)]
    pub async fn get_by_name<T: CredentialValue>(
        &self,
        name: impl Into<CredentialName>,
    ) -> CredHubResult<Vec<CredentialDetails<T>>> {
        let name = name.into();
        debug!(name = %name, "Getting credential by name");
        let (status, bytes) = self
            .exchange(Method::GET, BASE_URL_PATH, Some(("name", name.as_str())), None)
            .await?;
        let envelope: CredentialDetailsData<T> = response::decode(status, &bytes)?;
        Ok(envelope.data)
    }

    /// Delete a credential and all its versions by name.
    #[instrument(skip_all)]
    pub async fn delete(&self, name: impl Into<CredentialName>) -> CredHubResult<()> {
        let name = name.into();
        debug!(name = %name, "Deleting credential");
        let (status, bytes) = self
            .exchange(
                Method::DELETE,
                BASE_URL_PATH,
                Some(("name", name.as_str())),
                None,
            )
            .await?;
        response::ensure_success(status, &bytes)
    }

    /// Perform one HTTP round trip and hand back the raw `(status, body)`
    /// pair for the response module to translate.
    async fn exchange(
        &self,
        method: Method,
        path: &str,
        query: Option<(&str, &str)>,
        body: Option<serde_json::Value>,
    ) -> CredHubResult<(StatusCode, Vec<u8>)> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method, &url);

        if let Some(pair) = query {
            request = request.query(&[pair]);
        }
        if let Some(source) = &self.token_source {
            request = request.bearer_auth(source.token(&self.http).await?);
        }
        if let Some(b) = body {
            request = request.json(&b);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?.to_vec();
        Ok((status, bytes))
    }
}

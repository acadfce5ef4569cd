//! CredHub client SDK.
//!
//! Provides type-safe storage, generation, and retrieval of secrets
//! (passwords, certificates, SSH/RSA keys, JSON blobs, user credentials)
//! in a CredHub-compatible credential management service over HTTPS,
//! with optional OAuth2 client-credentials authentication and mutual TLS.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod requests;

mod auth;
mod response;

pub use client::CredHubClient;
pub use config::{CredHubConfig, OAuth2Options, TlsOptions};
pub use credentials::{
    CertificateCredential, CredentialDetails, CredentialDetailsData, CredentialName,
    CredentialType, CredentialValue, JsonCredential, PasswordCredential, RsaCredential,
    SshCredential, UserCredential, ValueCredential,
};
pub use error::{CredHubError, CredHubResult};
pub use requests::{
    Actor, CertificateParameters, CredentialPermission, CredentialRequest, GenerationParameters,
    Operation, ParametersRequest, PasswordParameters, RsaParameters, SshParameters,
    UserParameters, WriteMode,
};

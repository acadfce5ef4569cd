//! Write and generate request builders.
//!
//! A [`CredentialRequest`] stores a caller-supplied value; a
//! [`ParametersRequest`] asks the service to generate one. Both carry the
//! wire type tag implied by the value or parameter type, so a request can
//! never declare a tag that disagrees with its payload shape.

use crate::credentials::{
    CertificateCredential, CredentialName, CredentialType, CredentialValue, PasswordCredential,
    RsaCredential, SshCredential, UserCredential,
};
use serde::{Deserialize, Serialize};

/// Controls what happens when a credential with the same name exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Keep the existing value; the write is a no-op for an existing name
    #[default]
    NoOverwrite,
    /// Replace the existing value unconditionally
    Overwrite,
    /// Replace the existing value only if the request differs from it
    Converge,
}

/// A party granted access to a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor(String);

impl Actor {
    /// An actor identified by a raw authority string.
    #[must_use]
    pub fn new(actor: impl Into<String>) -> Self {
        Self(actor.into())
    }

    /// A UAA user actor.
    #[must_use]
    pub fn user(user_id: &str) -> Self {
        Self(format!("uaa-user:{user_id}"))
    }

    /// A UAA OAuth2 client actor.
    #[must_use]
    pub fn client(client_id: &str) -> Self {
        Self(format!("uaa-client:{client_id}"))
    }

    /// An application actor authenticated by mutual TLS.
    #[must_use]
    pub fn app(app_id: &str) -> Self {
        Self(format!("mtls-app:{app_id}"))
    }
}

/// An operation an actor may be permitted to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Read the credential value
    Read,
    /// Write the credential value
    Write,
    /// Delete the credential
    Delete,
    /// Read the credential's permissions
    ReadAcl,
    /// Modify the credential's permissions
    WriteAcl,
}

/// A permission granted alongside a write or generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPermission {
    /// The actor the permission applies to
    pub actor: Actor,
    /// The operations granted
    pub operations: Vec<Operation>,
}

impl CredentialPermission {
    /// Grant `operations` to `actor`.
    #[must_use]
    pub fn new(actor: Actor, operations: impl Into<Vec<Operation>>) -> Self {
        Self {
            actor,
            operations: operations.into(),
        }
    }
}

/// A request to store a caller-supplied credential value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialRequest<T: CredentialValue> {
    name: CredentialName,
    #[serde(rename = "type")]
    credential_type: CredentialType,
    mode: WriteMode,
    value: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    additional_permissions: Vec<CredentialPermission>,
}

impl<T: CredentialValue> CredentialRequest<T> {
    /// Create a write request for `name` carrying `value`.
    pub fn new(name: impl Into<CredentialName>, value: T) -> Self {
        Self {
            name: name.into(),
            credential_type: T::TYPE,
            mode: WriteMode::default(),
            value,
            additional_permissions: Vec::new(),
        }
    }

    /// Set the overwrite mode.
    #[must_use]
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Grant an additional permission on the credential.
    #[must_use]
    pub fn with_permission(mut self, permission: CredentialPermission) -> Self {
        self.additional_permissions.push(permission);
        self
    }

    /// The credential name.
    #[must_use]
    pub fn name(&self) -> &CredentialName {
        &self.name
    }

    /// The overwrite mode.
    #[must_use]
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// The value to store.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Links a generation-parameter type to the value type the service
/// produces from it.
pub trait GenerationParameters: Serialize + Send + Sync {
    /// The credential value shape generated from these parameters.
    type Output: CredentialValue;
}

/// A request to have the service generate a credential value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParametersRequest<P: GenerationParameters> {
    name: CredentialName,
    #[serde(rename = "type")]
    credential_type: CredentialType,
    mode: WriteMode,
    parameters: P,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    additional_permissions: Vec<CredentialPermission>,
}

impl<P: GenerationParameters> ParametersRequest<P> {
    /// Create a generate request for `name` with the given parameters.
    pub fn new(name: impl Into<CredentialName>, parameters: P) -> Self {
        Self {
            name: name.into(),
            credential_type: P::Output::TYPE,
            mode: WriteMode::default(),
            parameters,
            additional_permissions: Vec::new(),
        }
    }

    /// Set the overwrite mode.
    #[must_use]
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Grant an additional permission on the credential.
    #[must_use]
    pub fn with_permission(mut self, permission: CredentialPermission) -> Self {
        self.additional_permissions.push(permission);
        self
    }

    /// The credential name.
    #[must_use]
    pub fn name(&self) -> &CredentialName {
        &self.name
    }

    /// The generation parameters.
    #[must_use]
    pub fn parameters(&self) -> &P {
        &self.parameters
    }
}

/// Parameters for generating a password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PasswordParameters {
    /// Password length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Exclude upper-case characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_upper: Option<bool>,
    /// Exclude lower-case characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_lower: Option<bool>,
    /// Exclude digits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_number: Option<bool>,
    /// Include special characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_special: Option<bool>,
}

impl PasswordParameters {
    /// Set the generated password length.
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

impl GenerationParameters for PasswordParameters {
    type Output = PasswordCredential;
}

/// Parameters for generating a user credential; the password is generated
/// from the wrapped password parameters and the username by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserParameters(pub PasswordParameters);

impl GenerationParameters for UserParameters {
    type Output = UserCredential;
}

/// Parameters for generating an SSH key pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SshParameters {
    /// Key length in bits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_length: Option<u32>,
    /// Comment appended to the public key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_comment: Option<String>,
}

impl GenerationParameters for SshParameters {
    type Output = SshCredential;
}

/// Parameters for generating an RSA key pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RsaParameters {
    /// Key length in bits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_length: Option<u32>,
}

impl GenerationParameters for RsaParameters {
    type Output = RsaCredential;
}

/// Parameters for generating a certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateParameters {
    /// Subject common name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    /// Subject alternative names
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    /// Subject organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Validity duration in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Name of the CA credential to sign with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    /// Whether the generated certificate is itself a CA
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ca: Option<bool>,
    /// Whether the certificate is self-signed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_sign: Option<bool>,
    /// Key length in bits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_length: Option<u32>,
}

impl GenerationParameters for CertificateParameters {
    type Output = CertificateCredential;
}

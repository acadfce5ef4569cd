//! Credential types and response structures.
//!
//! Each CredHub credential kind has a concrete value type tied to its wire
//! tag through [`CredentialValue`], so the deserialization shape for a
//! response is selected at compile time by the type the caller asks for.
//! Secret-bearing fields are redacted in `Debug` output and zeroized on drop.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The kind of a credential, determining its value shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialType {
    /// A single opaque string
    Value,
    /// A password string
    Password,
    /// A username/password pair
    User,
    /// An arbitrary JSON object
    Json,
    /// A certificate with CA and private key
    Certificate,
    /// An SSH key pair
    Ssh,
    /// An RSA key pair
    Rsa,
}

impl CredentialType {
    /// The wire tag for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Password => "password",
            Self::User => "user",
            Self::Json => "json",
            Self::Certificate => "certificate",
            Self::Ssh => "ssh",
            Self::Rsa => "rsa",
        }
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logical name of a credential, a slash-prefixed path like
/// `/my-org/my-app/db-password`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialName(String);

impl CredentialName {
    /// Create a name from its full string form.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Build a name by joining segments with `/`, with a leading `/`.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name = String::new();
        for segment in segments {
            name.push('/');
            name.push_str(segment.as_ref().trim_matches('/'));
        }
        Self(name)
    }

    /// The full name string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CredentialName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CredentialName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Links a concrete value type to its [`CredentialType`] wire tag.
///
/// Implemented by the seven credential value types; the client uses the
/// associated constant to stamp requests and select response shapes.
pub trait CredentialValue: Serialize + DeserializeOwned + Send + Sync {
    /// The wire tag for this value shape.
    const TYPE: CredentialType;
}

/// A `value`-typed credential: a single opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueCredential(pub String);

impl From<&str> for ValueCredential {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl CredentialValue for ValueCredential {
    const TYPE: CredentialType = CredentialType::Value;
}

/// A `password`-typed credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct PasswordCredential(String);

impl PasswordCredential {
    /// Wrap a password value.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Access the password value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordCredential").field(&"[REDACTED]").finish()
    }
}

impl CredentialValue for PasswordCredential {
    const TYPE: CredentialType = CredentialType::Password;
}

/// A `json`-typed credential: an arbitrary JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonCredential(pub serde_json::Map<String, serde_json::Value>);

impl CredentialValue for JsonCredential {
    const TYPE: CredentialType = CredentialType::Json;
}

/// A `user`-typed credential: a username/password pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct UserCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    password: String,
}

impl UserCredential {
    /// Create a user credential.
    #[must_use]
    pub fn new(username: Option<String>, password: impl Into<String>) -> Self {
        Self {
            username,
            password: password.into(),
        }
    }

    /// The username, if one was supplied or generated.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Access the password value.
    #[must_use]
    pub fn expose_password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredential")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CredentialValue for UserCredential {
    const TYPE: CredentialType = CredentialType::User;
}

/// A `certificate`-typed credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CertificateCredential {
    /// PEM-encoded CA certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    /// PEM-encoded certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    /// PEM-encoded private key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl fmt::Debug for CertificateCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateCredential")
            .field("ca", &self.ca)
            .field("certificate", &self.certificate)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CredentialValue for CertificateCredential {
    const TYPE: CredentialType = CredentialType::Certificate;
}

/// An `ssh`-typed credential: an SSH key pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SshCredential {
    /// SSH public key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// PEM-encoded private key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// Fingerprint of the public key; present only in responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_fingerprint: Option<String>,
}

impl fmt::Debug for SshCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshCredential")
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .field("public_key_fingerprint", &self.public_key_fingerprint)
            .finish()
    }
}

impl CredentialValue for SshCredential {
    const TYPE: CredentialType = CredentialType::Ssh;
}

/// An `rsa`-typed credential: an RSA key pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct RsaCredential {
    /// PEM-encoded public key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// PEM-encoded private key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl fmt::Debug for RsaCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaCredential")
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CredentialValue for RsaCredential {
    const TYPE: CredentialType = CredentialType::Rsa;
}

/// A single stored version of a credential, as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialDetails<T> {
    /// Service-assigned identifier of this version
    pub id: String,
    /// Logical name of the credential
    pub name: CredentialName,
    /// Wire type tag
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    /// The credential value
    pub value: T,
    /// When this version was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_created_at: Option<DateTime<Utc>>,
}

impl<T: CredentialValue> CredentialDetails<T> {
    /// Build a details value with the type tag implied by `T`.
    pub fn new(id: impl Into<String>, name: impl Into<CredentialName>, value: T) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credential_type: T::TYPE,
            value,
            version_created_at: None,
        }
    }
}

/// Envelope returned by name-based lookups; a name may have multiple
/// stored versions, service-ordered most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialDetailsData<T> {
    /// The stored versions, in service order
    pub data: Vec<CredentialDetails<T>>,
}

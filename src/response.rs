//! Response decoding and error translation.
//!
//! Every operation funnels its `(status, body)` pair through this module,
//! so status-code branching lives in exactly one place. The functions here
//! are pure: given the same status and bytes they always produce the same
//! result, which is what keeps them unit-testable without a server.

use crate::error::{CredHubError, CredHubResult};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Error payload returned by the service; the exact schema is owned by the
/// remote side, we only extract a human-readable message.
#[derive(Deserialize)]
struct ErrorPayload {
    error: Option<String>,
    message: Option<String>,
}

/// Decode a response body into `T`, or translate a non-2xx status into
/// [`CredHubError::Server`]. A success status with a malformed body is a
/// [`CredHubError::Serialization`], not a server error.
pub(crate) fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> CredHubResult<T> {
    if status.is_success() {
        serde_json::from_slice(body).map_err(CredHubError::from)
    } else {
        Err(CredHubError::server(status, error_message(body)))
    }
}

/// Translate a non-2xx status into an error, ignoring any success body.
/// Used by operations that expect no response payload.
pub(crate) fn ensure_success(status: StatusCode, body: &[u8]) -> CredHubResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(CredHubError::server(status, error_message(body)))
    }
}

fn error_message(body: &[u8]) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_slice(body).ok()?;
    payload.error.or(payload.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{
        CredentialDetails, CredentialDetailsData, CredentialType, PasswordCredential,
        ValueCredential,
    };

    #[test]
    fn test_decode_detail_on_success() {
        let body = br#"{"id":"1111-1111-1111-1111","name":"/test","type":"value","value":"secret"}"#;
        let details: CredentialDetails<ValueCredential> =
            decode(StatusCode::OK, body).unwrap();

        assert_eq!(details.id, "1111-1111-1111-1111");
        assert_eq!(details.name.as_str(), "/test");
        assert_eq!(details.credential_type, CredentialType::Value);
        assert_eq!(details.value, ValueCredential::from("secret"));
    }

    #[test]
    fn test_decode_envelope_preserves_service_order() {
        let body = br#"{"data":[{"id":"A","name":"/n","type":"password","value":"p1"},{"id":"B","name":"/n","type":"password","value":"p2"}]}"#;
        let data: CredentialDetailsData<PasswordCredential> =
            decode(StatusCode::OK, body).unwrap();

        let ids: Vec<&str> = data.data.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
        assert_eq!(data.data[0].value.expose(), "p1");
        assert_eq!(data.data[1].value.expose(), "p2");
    }

    #[test]
    fn test_non_success_status_becomes_server_error() {
        let result: CredHubResult<CredentialDetails<ValueCredential>> =
            decode(StatusCode::UNAUTHORIZED, b"");
        let err = result.unwrap_err();
        assert!(matches!(err, CredHubError::Server { .. }));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_service_error_message_is_extracted() {
        let body = br#"{"error":"The request could not be completed because the credential does not exist"}"#;
        let result: CredHubResult<CredentialDetails<ValueCredential>> =
            decode(StatusCode::NOT_FOUND, body);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("credential does not exist"));
    }

    #[test]
    fn test_message_field_used_when_error_absent() {
        let body = br#"{"message":"access denied"}"#;
        let result = ensure_success(StatusCode::FORBIDDEN, body);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_status() {
        let result: CredHubResult<CredentialDetails<ValueCredential>> =
            decode(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("no error message provided"));
    }

    #[test]
    fn test_malformed_success_body_is_deserialization_error() {
        let result: CredHubResult<CredentialDetails<ValueCredential>> =
            decode(StatusCode::OK, b"{\"unexpected\":true}");
        assert!(matches!(result, Err(CredHubError::Serialization(_))));

        let result: CredHubResult<CredentialDetails<ValueCredential>> =
            decode(StatusCode::OK, b"");
        assert!(matches!(result, Err(CredHubError::Serialization(_))));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let body = br#"{"error":"boom"}"#;
        let first: CredHubResult<CredentialDetails<ValueCredential>> =
            decode(StatusCode::BAD_GATEWAY, body);
        let second: CredHubResult<CredentialDetails<ValueCredential>> =
            decode(StatusCode::BAD_GATEWAY, body);
        assert_eq!(first.unwrap_err().to_string(), second.unwrap_err().to_string());
    }

    #[test]
    fn test_delete_success_ignores_body() {
        assert!(ensure_success(StatusCode::NO_CONTENT, b"").is_ok());
        assert!(ensure_success(StatusCode::OK, b"garbage").is_ok());
    }
}

//! Property-based tests for the CredHub client.
//!
//! Properties validated:
//! - secret-bearing types never expose their value in Debug output
//! - request serialization always carries the type tag matching the payload
//! - credential names built from segments are well-formed
//! - server errors always surface the status code in their message

use credhub_client::{
    CredHubError, CredentialName, CredentialRequest, PasswordCredential, UserCredential,
    ValueCredential,
};
use proptest::prelude::*;
use reqwest::StatusCode;

// Strategy for generating secret values
fn secret_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9!@#$%^&*]{8,64}"
}

// Strategy for generating usernames
fn username_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{3,15}"
}

// Strategy for generating name segments
fn segments_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9-]{0,12}", 1..5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any password value, the Debug implementation shows [REDACTED]
    /// and never the value itself, while expose() still returns it.
    #[test]
    fn prop_password_not_exposed_in_debug(secret in secret_value_strategy()) {
        let password = PasswordCredential::new(secret.clone());

        let debug_output = format!("{password:?}");
        prop_assert!(
            !debug_output.contains(&secret),
            "Debug output should not contain the password"
        );
        prop_assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should show [REDACTED]"
        );

        prop_assert_eq!(password.expose(), &secret);
    }

    /// User credentials redact the password but keep the username visible.
    #[test]
    fn prop_user_credential_password_redacted(
        username in username_strategy(),
        password in secret_value_strategy(),
    ) {
        let user = UserCredential::new(Some(username.clone()), password.clone());

        let debug_output = format!("{user:?}");
        prop_assert!(
            !debug_output.contains(&password),
            "Debug output should not contain the password"
        );
        prop_assert!(
            debug_output.contains(&username),
            "Debug output should contain the username"
        );
    }

    /// A write request always serializes the wire tag matching its payload
    /// type, regardless of name or value.
    #[test]
    fn prop_request_type_tag_matches_payload(
        segments in segments_strategy(),
        value in secret_value_strategy(),
    ) {
        let name = CredentialName::from_segments(&segments);
        let request = CredentialRequest::new(name.clone(), ValueCredential(value));
        let json = serde_json::to_value(&request).unwrap();

        prop_assert_eq!(json["type"].as_str(), Some("value"));
        prop_assert_eq!(json["name"].as_str(), Some(name.as_str()));
        prop_assert!(
            json.get("additional_permissions").is_none(),
            "empty permissions should be omitted from the wire form"
        );
    }

    /// Names built from segments start with a slash and contain no empty
    /// segments.
    #[test]
    fn prop_segment_names_are_well_formed(segments in segments_strategy()) {
        let name = CredentialName::from_segments(&segments);

        prop_assert!(name.as_str().starts_with('/'));
        prop_assert!(!name.as_str().contains("//"));
        prop_assert_eq!(name.as_str().matches('/').count(), segments.len());
    }

    /// For any client-error or server-error status, the error message
    /// contains the numeric status code.
    #[test]
    fn prop_server_error_message_contains_status(code in 400u16..600) {
        let status = StatusCode::from_u16(code).unwrap();
        let err = CredHubError::server(status, None);

        prop_assert!(
            err.to_string().contains(&code.to_string()),
            "message {:?} should contain {}", err.to_string(), code
        );
    }
}

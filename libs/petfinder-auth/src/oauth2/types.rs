use serde::Deserialize;

/// How client credentials are sent to the token endpoint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuthMethod {
    /// `client_id` and `client_secret` as form fields (what Petfinder expects).
    #[default]
    Form,
    /// `Authorization: Basic base64(client_id:client_secret)` (RFC 6749 §2.3.1).
    Basic,
}

/// Token endpoint response.
///
/// `Deserialize` only, so an access token cannot be serialized back into logs.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_auth_method_is_form() {
        assert_eq!(ClientAuthMethod::default(), ClientAuthMethod::Form);
    }

    #[test]
    fn deserialize_petfinder_response() {
        let json = r#"{"token_type":"Bearer","expires_in":3600,"access_token":"tok"}"#;
        let r: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.access_token, "tok");
        assert_eq!(r.expires_in, Some(3600));
        assert_eq!(r.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn deserialize_minimal_response() {
        let r: TokenResponse = serde_json::from_str(r#"{"access_token":"tok"}"#).unwrap();
        assert!(r.expires_in.is_none());
        assert!(r.token_type.is_none());
    }
}

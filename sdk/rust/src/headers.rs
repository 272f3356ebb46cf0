//! Sign header builder for WeMeeting SDK.
//!
//! Collects the request metadata that gets signed: key id, timestamp,
//! nonce, app id and request URI.

use chrono::Utc;
use rand::Rng;

/// Header carrying the key id.
pub const HEADER_KEY: &str = "X-TC-Key";
/// Header carrying the unix timestamp in seconds.
pub const HEADER_TIMESTAMP: &str = "X-TC-Timestamp";
/// Header carrying the random nonce.
pub const HEADER_NONCE: &str = "X-TC-Nonce";
/// Header carrying the base64 signature.
pub const HEADER_SIGNATURE: &str = "X-TC-Signature";
/// Header flagging the session user as a registered user.
pub const HEADER_REGISTERED: &str = "X-TC-Registered";
/// Header carrying the enterprise app id.
pub const HEADER_APP_ID: &str = "AppId";

/// Upper bound (inclusive) for generated nonces.
pub const MAX_NONCE: u32 = 999_999_999;

/// The metadata of a single request that goes into its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignHeaders {
    /// Key id (`X-TC-Key`)
    pub key: String,
    /// Unix timestamp in seconds (`X-TC-Timestamp`)
    pub timestamp: i64,
    /// Random nonce (`X-TC-Nonce`)
    pub nonce: u32,
    /// Enterprise app id (`AppId`)
    pub app_id: String,
    /// Request URI: path plus query string, exactly as sent
    pub uri: String,
}

impl SignHeaders {
    /// Create sign headers from explicit values.
    #[must_use]
    pub fn new(key: String, timestamp: i64, nonce: u32, app_id: String, uri: String) -> Self {
        Self {
            key,
            timestamp,
            nonce,
            app_id,
            uri,
        }
    }

    /// The headers that are sent on the wire, before the signature is added.
    #[must_use]
    pub fn to_http_headers(&self) -> Vec<(String, String)> {
        vec![
            (HEADER_KEY.to_string(), self.key.clone()),
            (HEADER_TIMESTAMP.to_string(), self.timestamp.to_string()),
            (HEADER_NONCE.to_string(), self.nonce.to_string()),
            (HEADER_APP_ID.to_string(), self.app_id.clone()),
        ]
    }
}

/// Builder for [`SignHeaders`].
///
/// Stamps each request with the current time and a fresh nonce.
#[derive(Debug, Clone)]
pub struct SignHeadersBuilder {
    key: String,
    app_id: String,
}

impl SignHeadersBuilder {
    /// Create a builder for the given key id and app id.
    #[must_use]
    pub fn new(key: String, app_id: String) -> Self {
        Self { key, app_id }
    }

    /// Build sign headers for `uri` with the current timestamp and a random nonce.
    #[must_use]
    pub fn build(&self, uri: &str) -> SignHeaders {
        let nonce = rand::thread_rng().gen_range(1..=MAX_NONCE);
        SignHeaders::new(
            self.key.clone(),
            Utc::now().timestamp(),
            nonce,
            self.app_id.clone(),
            uri.to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_stamps_key_app_and_uri() {
        let builder = SignHeadersBuilder::new("key-id".to_string(), "app-1".to_string());

        let headers = builder.build("/v1/users/u1");

        assert_eq!(headers.key, "key-id");
        assert_eq!(headers.app_id, "app-1");
        assert_eq!(headers.uri, "/v1/users/u1");
        assert!((1..=MAX_NONCE).contains(&headers.nonce));
        assert!(headers.timestamp > 1_600_000_000);
    }

    #[test]
    fn test_builder_generates_varying_nonces() {
        let builder = SignHeadersBuilder::new("key-id".to_string(), "app-1".to_string());

        let nonces: std::collections::HashSet<u32> =
            (0..16).map(|_| builder.build("/v1/users").nonce).collect();

        assert!(nonces.len() > 1, "Nonces should vary between requests");
    }

    #[test]
    fn test_http_headers() {
        let headers = SignHeaders::new(
            "key-id".to_string(),
            1_700_000_000,
            42,
            "app-1".to_string(),
            "/v1/meetings".to_string(),
        );

        let http = headers.to_http_headers();

        assert_eq!(
            http,
            vec![
                ("X-TC-Key".to_string(), "key-id".to_string()),
                ("X-TC-Timestamp".to_string(), "1700000000".to_string()),
                ("X-TC-Nonce".to_string(), "42".to_string()),
                ("AppId".to_string(), "app-1".to_string()),
            ]
        );
    }
}

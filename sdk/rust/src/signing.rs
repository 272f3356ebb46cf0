//! Signature generation for WeMeeting SDK.
//!
//! Implements the vendor signing flow:
//! sign headers -> header string -> string to sign -> HMAC-SHA256 -> hex -> base64.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::Error;
use crate::headers::{SignHeaders, HEADER_KEY, HEADER_NONCE, HEADER_TIMESTAMP};
use crate::transport::HttpMethod;

type HmacSha256 = Hmac<Sha256>;

/// Build the canonical header string.
///
/// The `X-TC-*` sign headers sorted by name, as `name=value` pairs joined
/// with `&`:
///
/// ```text
/// X-TC-Key={key}&X-TC-Nonce={nonce}&X-TC-Timestamp={timestamp}
/// ```
#[must_use]
pub fn canonical_header_string(headers: &SignHeaders) -> String {
    let mut pairs = [
        (HEADER_KEY, headers.key.clone()),
        (HEADER_NONCE, headers.nonce.to_string()),
        (HEADER_TIMESTAMP, headers.timestamp.to_string()),
    ];
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the string to sign: method, header string, URI and body on separate lines.
#[must_use]
pub fn string_to_sign(method: HttpMethod, headers: &SignHeaders, body: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        method.as_str(),
        canonical_header_string(headers),
        headers.uri,
        body
    )
}

/// Compute the signature of `string_to_sign` with `secret_key`.
///
/// Returns `base64(lowercase_hex(HMAC-SHA256(secret_key, string_to_sign)))`.
///
/// # Errors
///
/// Returns an error if the HMAC key is rejected.
pub fn compute_signature(secret_key: &str, string_to_sign: &str) -> Result<String, Error> {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| Error::Configuration(format!("Invalid signing key: {e}")))?;
    mac.update(string_to_sign.as_bytes());
    let digest = hex::encode(mac.finalize().into_bytes());

    Ok(BASE64.encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_headers() -> SignHeaders {
        SignHeaders::new(
            "AKIDtest".to_string(),
            1_600_000_000,
            12345,
            "200000001".to_string(),
            "/v1/meetings?userid=alice&instanceid=1".to_string(),
        )
    }

    #[test]
    fn test_canonical_header_string() {
        assert_eq!(
            canonical_header_string(&fixed_headers()),
            "X-TC-Key=AKIDtest&X-TC-Nonce=12345&X-TC-Timestamp=1600000000"
        );
    }

    #[test]
    fn test_string_to_sign_without_body() {
        let s = string_to_sign(HttpMethod::Get, &fixed_headers(), "");

        assert_eq!(
            s,
            "GET\nX-TC-Key=AKIDtest&X-TC-Nonce=12345&X-TC-Timestamp=1600000000\n/v1/meetings?userid=alice&instanceid=1\n"
        );
    }

    #[test]
    fn test_string_to_sign_with_body() {
        let s = string_to_sign(HttpMethod::Post, &fixed_headers(), r#"{"subject":"x"}"#);

        assert!(s.starts_with("POST\n"));
        assert!(s.ends_with("\n{\"subject\":\"x\"}"));
    }

    #[test]
    fn test_compute_signature_known_vector() {
        // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog")
        let expected_hex = "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8";

        let signature = compute_signature("key", "The quick brown fox jumps over the lazy dog")
            .expect("signing should succeed");

        assert_eq!(signature, BASE64.encode(expected_hex));
    }

    #[test]
    fn test_signature_is_base64_of_hex_digest() {
        let signature = compute_signature("secret", "payload").expect("signing should succeed");

        let decoded = BASE64.decode(&signature).expect("valid base64");
        assert_eq!(decoded.len(), 64);
        assert!(decoded
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b)));
    }

    #[test]
    fn test_signature_changes_with_key() {
        let s1 = compute_signature("secret-a", "payload").expect("signing should succeed");
        let s2 = compute_signature("secret-b", "payload").expect("signing should succeed");

        assert_ne!(s1, s2);
    }
}

//! API credentials for WeMeeting SDK.
//!
//! # Example
//!
//! ```rust
//! use wemeeting::{Credential, HttpMethod, SignHeaders};
//!
//! let credential = Credential::new("secret-id", "secret-key");
//! let headers = SignHeaders::new(
//!     credential.secret_id().to_string(),
//!     1_600_000_000,
//!     42,
//!     "200000001".to_string(),
//!     "/v1/users/alice".to_string(),
//! );
//! let signature = credential.sign(&headers, "", HttpMethod::Get).unwrap();
//! assert!(!signature.is_empty());
//! ```

use std::fmt;

use crate::error::Error;
use crate::headers::SignHeaders;
use crate::signing::{compute_signature, string_to_sign};
use crate::transport::HttpMethod;

/// Key id and key secret issued by the vendor console.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    secret_id: String,
    secret_key: String,
}

impl Credential {
    /// Create a credential from a key id and key secret.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// The key id, sent as `X-TC-Key`.
    #[must_use]
    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    /// Sign a request.
    ///
    /// # Arguments
    ///
    /// * `headers` - Key id, timestamp, nonce, app id and URI of the request
    /// * `body` - Serialized JSON body, empty when the request has none
    /// * `method` - HTTP method
    ///
    /// # Returns
    ///
    /// Base64 signature for the `X-TC-Signature` header
    ///
    /// # Errors
    ///
    /// Returns an error if the HMAC key is rejected.
    pub fn sign(&self, headers: &SignHeaders, body: &str, method: HttpMethod) -> Result<String, Error> {
        compute_signature(&self.secret_key, &string_to_sign(method, headers, body))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

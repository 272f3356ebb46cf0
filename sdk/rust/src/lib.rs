//! WeMeeting SDK for Rust
//!
//! Client for the Tencent Meeting REST API: meeting lifecycle, live-stream
//! configuration, participant listing and enterprise user management.
//! Requests are signed with the account's key id and key secret and
//! responses are returned as decoded JSON.
//!
//! # Quick Start
//!
//! ```rust
//! use wemeeting::{signing, HttpMethod, SignHeaders};
//!
//! let headers = SignHeaders::new(
//!     "secret-id".to_string(),
//!     1_600_000_000,
//!     42,
//!     "200000001".to_string(),
//!     "/v1/users/alice".to_string(),
//! );
//! let to_sign = signing::string_to_sign(HttpMethod::Get, &headers, "");
//! assert!(to_sign.starts_with("GET\nX-TC-Key=secret-id&X-TC-Nonce=42"));
//!
//! let signature = signing::compute_signature("secret-key", &to_sign).unwrap();
//! assert!(!signature.is_empty());
//! ```

pub mod client;
pub mod clients;
pub mod credential;
pub mod error;
pub mod headers;
pub mod signing;
pub mod testing;
pub mod transport;
pub mod types;
mod uri;

// Re-exports
pub use client::{WeMeetingClient, DEFAULT_BASE_URL};
pub use clients::{LiveClient, MeetingsClient, UsersClient};
pub use credential::Credential;
pub use error::{Error, ErrorInfo};
pub use headers::{SignHeaders, SignHeadersBuilder};
pub use signing::{canonical_header_string, compute_signature, string_to_sign};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, Transport, TransportConfig};
pub use types::{
    CancelReason, InstanceId, LiveConfig, MeetingConfig, MeetingLocator, MeetingSettings,
    NewUser, ParticipantsQuery, RecurringRule, UserUpdate,
};

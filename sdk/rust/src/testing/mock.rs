//! Mock transport for testing.
//!
//! Provides a `MockTransport` that records every request the client builds
//! and answers with queued responses, without making network calls.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::Error;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Record of a request sent through the mock.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// The request as the client built it
    pub request: HttpRequest,
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    /// Create a new mock call record.
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            timestamp: Utc::now(),
        }
    }

    /// Path and query of the request URL, without scheme and host.
    #[must_use]
    pub fn uri(&self) -> &str {
        let url = self.request.url.as_str();
        let after_scheme = url.find("://").map_or(0, |i| i + 3);
        url[after_scheme..]
            .find('/')
            .map_or("/", |i| &url[after_scheme + i..])
    }

    /// The request body parsed as JSON, `None` when empty or malformed.
    #[must_use]
    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_str(&self.request.body).ok()
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status to report
    pub status: u16,
    /// Body text to return
    pub body: String,
    /// Transport failure to simulate instead of a response
    pub error_message: Option<String>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            body: String::new(),
            error_message: None,
        }
    }
}

impl MockResponse {
    /// A 200 response carrying `data` as JSON.
    pub fn with_json(data: &Value) -> Self {
        Self {
            body: data.to_string(),
            ..Self::default()
        }
    }

    /// A response with an explicit status and raw body.
    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            error_message: None,
        }
    }

    /// A transport failure.
    pub fn with_error(message: &str) -> Self {
        Self {
            error_message: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn get_result(&self) -> Result<HttpResponse, Error> {
        if let Some(message) = &self.error_message {
            return Err(Error::Http(message.clone()));
        }
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

#[derive(Default)]
struct MockTransportState {
    calls: Vec<MockCall>,
    queued: VecDeque<MockResponse>,
    fallback: MockResponse,
}

/// Recording transport for tests.
///
/// Queued responses are returned in order; once the queue is empty the
/// fallback response (200, empty body unless configured) is returned.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use serde_json::json;
/// use wemeeting::testing::{MockResponse, MockTransport};
/// use wemeeting::{Credential, HttpMethod, InstanceId, WeMeetingClient};
///
/// let mock = Arc::new(MockTransport::new());
/// mock.push_response(MockResponse::with_json(&json!({ "userid": "alice" })));
///
/// let mut client =
///     WeMeetingClient::with_transport(Credential::new("id", "key"), "200000001", "admin", mock.clone());
/// client.set_instance_id(InstanceId::Pc);
///
/// let user = client.users().get("alice").unwrap();
/// assert_eq!(user.unwrap()["userid"], "alice");
/// assert!(mock.was_called(HttpMethod::Get, "/v1/users/alice"));
/// ```
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockTransportState>,
}

impl MockTransport {
    /// Create a new mock transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered request.
    pub fn push_response(&self, response: MockResponse) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .queued
            .push_back(response);
    }

    /// Set the response returned once the queue is exhausted.
    pub fn set_fallback(&self, response: MockResponse) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).fallback = response;
    }

    /// Check if a request with `method` was sent to `uri` (path and query).
    #[must_use]
    pub fn was_called(&self, method: HttpMethod, uri: &str) -> bool {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .iter()
            .any(|call| call.request.method == method && call.uri() == uri)
    }

    /// Number of requests sent.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).calls.len()
    }

    /// Get recorded calls, optionally filtered by method.
    #[must_use]
    pub fn get_calls(&self, method: Option<HttpMethod>) -> Vec<MockCall> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match method {
            Some(m) => state
                .calls
                .iter()
                .filter(|call| call.request.method == m)
                .cloned()
                .collect(),
            None => state.calls.clone(),
        }
    }

    /// The most recent call.
    #[must_use]
    pub fn last_call(&self) -> Option<MockCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .last()
            .cloned()
    }

    /// Reset recorded calls and queued responses.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.clear();
        state.queued.clear();
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(MockCall::new(request.clone()));

        match state.queued.pop_front() {
            Some(response) => response.get_result(),
            None => state.fallback.get_result(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: HttpMethod, url: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: url.to_string(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    #[test]
    fn test_queued_responses_then_fallback() {
        let mock = MockTransport::new();
        mock.push_response(MockResponse::with_json(&json!({ "n": 1 })));
        mock.set_fallback(MockResponse::with_status(404, "{}"));

        let first = mock
            .send(&request(HttpMethod::Get, "https://h/v1/a"))
            .expect("queued response");
        let second = mock
            .send(&request(HttpMethod::Get, "https://h/v1/b"))
            .expect("fallback response");

        assert_eq!(first.body, r#"{"n":1}"#);
        assert_eq!(second.status, 404);
    }

    #[test]
    fn test_simulated_transport_error() {
        let mock = MockTransport::new();
        mock.push_response(MockResponse::with_error("connection reset"));

        let result = mock.send(&request(HttpMethod::Post, "https://h/v1/a"));

        assert!(matches!(result, Err(Error::Http(m)) if m == "connection reset"));
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_call_uri_and_filters() {
        let mock = MockTransport::new();
        mock.send(&request(HttpMethod::Get, "https://api.meeting.qq.com/v1/users/list?page=1"))
            .expect("send");
        mock.send(&request(HttpMethod::Delete, "https://api.meeting.qq.com/v1/users/bob"))
            .expect("send");

        assert!(mock.was_called(HttpMethod::Get, "/v1/users/list?page=1"));
        assert!(!mock.was_called(HttpMethod::Get, "/v1/users/bob"));
        assert_eq!(mock.get_calls(Some(HttpMethod::Delete)).len(), 1);
        assert_eq!(mock.get_calls(None).len(), 2);
    }

    #[test]
    fn test_mock_reset() {
        let mock = MockTransport::new();
        mock.push_response(MockResponse::with_json(&json!({})));
        mock.send(&request(HttpMethod::Get, "https://h/v1/a")).expect("send");

        mock.reset();

        assert_eq!(mock.call_count(), 0);
        assert!(mock.last_call().is_none());
    }
}

//! WeMeeting SDK main client.
//!
//! Holds the session state (credential, app id, user, device instance,
//! common headers), signs each request and dispatches it through the
//! configured [`Transport`].

use std::env;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::clients::{LiveClient, MeetingsClient, UsersClient};
use crate::credential::Credential;
use crate::error::Error;
use crate::headers::{SignHeadersBuilder, HEADER_REGISTERED, HEADER_SIGNATURE};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, Transport, TransportConfig};
use crate::types::InstanceId;

/// Default base URL for the WeMeeting API.
pub const DEFAULT_BASE_URL: &str = "https://api.meeting.qq.com";

/// Path prefix of the meeting endpoints.
pub const MEETINGS_PATH: &str = "/v1/meetings";

/// Path prefix of the user endpoints.
pub const USERS_PATH: &str = "/v1/users";

/// Common header carrying the SDK id assigned by the vendor.
pub const HEADER_SDK_ID: &str = "SdkId";

/// Main client for interacting with the WeMeeting API.
///
/// # Example
///
/// ```rust,ignore
/// use wemeeting::{Credential, InstanceId, MeetingConfig, MeetingLocator, WeMeetingClient};
///
/// let mut client = WeMeetingClient::new(Credential::new("id", "key"), "200000001", "alice")?;
/// client.set_instance_id(InstanceId::Pc);
///
/// let created = client
///     .meetings()
///     .create(MeetingConfig::scheduled("weekly sync", "1700000000", "1700003600"))?;
/// let meeting = client.meetings().get(&MeetingLocator::code("123456789"))?;
/// ```
pub struct WeMeetingClient {
    credential: Credential,
    app_id: String,
    user_id: String,
    instance_id: Option<InstanceId>,
    common_headers: Vec<(String, String)>,
    user_registered: bool,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl WeMeetingClient {
    /// Create a new client with the default HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `credential` - Key id and key secret
    /// * `app_id` - Enterprise app id
    /// * `user_id` - User the calls act on behalf of (may be empty for user management)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn new(
        credential: Credential,
        app_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Self, Error> {
        let transport = Arc::new(HttpTransport::new(TransportConfig::default())?);
        Ok(Self::with_transport(credential, app_id, user_id, transport))
    }

    /// Create a new client that sends requests through `transport`.
    pub fn with_transport(
        credential: Credential,
        app_id: impl Into<String>,
        user_id: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            credential,
            app_id: app_id.into(),
            user_id: user_id.into(),
            instance_id: None,
            common_headers: Vec::new(),
            user_registered: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            transport,
        }
    }

    /// Create a client from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `WEMEETING_SECRET_ID` - Key id (required)
    /// * `WEMEETING_SECRET_KEY` - Key secret (required)
    /// * `WEMEETING_APP_ID` - Enterprise app id (required)
    /// * `WEMEETING_USER_ID` - Session user id (optional)
    /// * `WEMEETING_INSTANCE_ID` - Device instance, 1 to 8 (optional)
    /// * `WEMEETING_SDK_ID` - Sent as the `SdkId` header (optional)
    /// * `WEMEETING_BASE_URL` - API host (optional, default: <https://api.meeting.qq.com>)
    /// * `WEMEETING_TIMEOUT_SECS` - Request timeout, 0 to 30 (optional, default: 3)
    /// * `WEMEETING_PROXY` - Proxy URL (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or a value is invalid.
    pub fn from_env() -> Result<Self, Error> {
        let required = |name: &str| {
            env::var(name)
                .map_err(|_| Error::Configuration(format!("{name} environment variable not set")))
        };

        let secret_id = required("WEMEETING_SECRET_ID")?;
        let secret_key = required("WEMEETING_SECRET_KEY")?;
        let app_id = required("WEMEETING_APP_ID")?;
        let user_id = env::var("WEMEETING_USER_ID").unwrap_or_default();

        let mut config = TransportConfig::default();
        if let Ok(timeout) = env::var("WEMEETING_TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|_| {
                Error::Configuration(format!("Invalid WEMEETING_TIMEOUT_SECS: {timeout}"))
            })?;
            config = config
                .with_timeout_secs(secs)
                .map_err(|e| Error::Configuration(e.to_string()))?;
        }
        if let Ok(proxy) = env::var("WEMEETING_PROXY") {
            config = config.with_proxy(&proxy);
        }

        let transport = Arc::new(HttpTransport::new(config)?);
        let mut client = Self::with_transport(
            Credential::new(secret_id, secret_key),
            app_id,
            user_id,
            transport,
        );

        if let Ok(instance) = env::var("WEMEETING_INSTANCE_ID") {
            let instance_id = instance
                .parse::<u8>()
                .map_err(|_| Error::Configuration(format!("Invalid WEMEETING_INSTANCE_ID: {instance}")))
                .and_then(|v| {
                    InstanceId::try_from(v).map_err(|e| Error::Configuration(e.to_string()))
                })?;
            client.set_instance_id(instance_id);
        }
        if let Ok(sdk_id) = env::var("WEMEETING_SDK_ID") {
            client.set_common_headers([(HEADER_SDK_ID, sdk_id)]);
        }
        if let Ok(base_url) = env::var("WEMEETING_BASE_URL") {
            client.set_base_url(&base_url);
        }

        Ok(client)
    }

    /// Set the device instance of the calling user. Required before any request.
    pub fn set_instance_id(&mut self, instance_id: InstanceId) -> &mut Self {
        self.instance_id = Some(instance_id);
        self
    }

    /// Set the user the calls act on behalf of.
    pub fn set_user(&mut self, user_id: impl Into<String>) -> &mut Self {
        self.user_id = user_id.into();
        self
    }

    /// Replace the extra common headers sent with every request (e.g. `SdkId`).
    ///
    /// Signature headers always take precedence over a common header of the same name.
    pub fn set_common_headers<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.common_headers = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Replace the transport.
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) -> &mut Self {
        self.transport = transport;
        self
    }

    /// Mark the session user as registered (default) or unregistered.
    ///
    /// Meetings created by unregistered users do not show up in the user's
    /// meeting list, but can be joined by link or meeting code.
    pub fn set_user_registered(&mut self, registered: bool) -> &mut Self {
        self.user_registered = registered;
        self
    }

    /// Override the API host.
    pub fn set_base_url(&mut self, base_url: &str) -> &mut Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Get the app id.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Get the session user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Get the device instance, if set.
    #[must_use]
    pub fn instance_id(&self) -> Option<InstanceId> {
        self.instance_id
    }

    /// Whether requests carry `X-TC-Registered: 1`.
    #[must_use]
    pub fn is_user_registered(&self) -> bool {
        self.user_registered
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the meetings client.
    #[must_use]
    pub fn meetings(&self) -> MeetingsClient<'_> {
        MeetingsClient::new(self)
    }

    /// Get the live-stream client.
    #[must_use]
    pub fn live(&self) -> LiveClient<'_> {
        LiveClient::new(self)
    }

    /// Get the users client.
    #[must_use]
    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(self)
    }

    /// The device instance, or a validation error when none is set.
    pub(crate) fn require_instance_id(&self) -> Result<InstanceId, Error> {
        self.instance_id
            .ok_or_else(|| Error::validation("device instance id is not set"))
    }

    /// `userid` and `instanceid` query parameters of the session.
    pub(crate) fn session_query(&self) -> Result<Vec<(&'static str, String)>, Error> {
        let instance_id = self.require_instance_id()?;
        Ok(vec![
            ("userid", self.user_id.clone()),
            ("instanceid", instance_id.to_string()),
        ])
    }

    /// Build a signed request without sending it.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `uri` - Path and query, already encoded
    /// * `body` - JSON body; `None` or an empty object sends no body
    ///
    /// # Errors
    ///
    /// Returns a validation error if no device instance is set.
    pub fn build_request(
        &self,
        method: HttpMethod,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<HttpRequest, Error> {
        self.require_instance_id()?;

        let body = match body {
            Some(value) if !is_empty_json(value) => serde_json::to_string(value)?,
            _ => String::new(),
        };

        let sign_headers =
            SignHeadersBuilder::new(self.credential.secret_id().to_string(), self.app_id.clone())
                .build(uri);
        let signature = self.credential.sign(&sign_headers, &body, method)?;

        let mut sdk_headers = sign_headers.to_http_headers();
        sdk_headers.push((HEADER_SIGNATURE.to_string(), signature));
        if self.user_registered {
            sdk_headers.push((HEADER_REGISTERED.to_string(), "1".to_string()));
        }

        let mut headers: Vec<(String, String)> = self
            .common_headers
            .iter()
            .filter(|(name, _)| !sdk_headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)))
            .cloned()
            .collect();
        headers.extend(sdk_headers);

        Ok(HttpRequest {
            method,
            url: format!("{}{}", self.base_url, uri),
            headers,
            body,
        })
    }

    /// Sign and send a request, decoding the JSON response.
    ///
    /// Vendor errors are not turned into `Err`: any JSON body is returned as
    /// is, whatever the status. See [`crate::ErrorInfo`].
    ///
    /// # Returns
    ///
    /// `None` when the response body is empty or not JSON
    ///
    /// # Errors
    ///
    /// Returns a validation error if no device instance is set, or the
    /// transport error if the request cannot be delivered.
    pub fn execute(
        &self,
        method: HttpMethod,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Error> {
        let request = self.build_request(method, uri, body)?;

        debug!(method = %method, uri = %uri, "sending request");
        let response = self.transport.send(&request)?;
        debug!(status = response.status, uri = %uri, "received response");

        Ok(decode_response(&response))
    }
}

impl fmt::Debug for WeMeetingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeMeetingClient")
            .field("credential", &self.credential)
            .field("app_id", &self.app_id)
            .field("user_id", &self.user_id)
            .field("instance_id", &self.instance_id)
            .field("common_headers", &self.common_headers)
            .field("user_registered", &self.user_registered)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn decode_response(response: &HttpResponse) -> Option<Value> {
    if response.body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            warn!(status = response.status, error = %e, "response body is not valid JSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockResponse, MockTransport};
    use serde_json::json;

    fn client(mock: &Arc<MockTransport>) -> WeMeetingClient {
        let mut client = WeMeetingClient::with_transport(
            Credential::new("secret-id", "secret-key"),
            "200000001",
            "alice",
            mock.clone(),
        );
        client.set_instance_id(InstanceId::Pc);
        client
    }

    #[test]
    fn test_client_creation() {
        let client = WeMeetingClient::new(Credential::new("id", "key"), "app", "alice")
            .expect("Client creation should succeed");

        assert_eq!(client.app_id(), "app");
        assert_eq!(client.user_id(), "alice");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert!(client.instance_id().is_none());
        assert!(client.is_user_registered());
    }

    #[test]
    fn test_requires_instance_id_before_sending() {
        let mock = Arc::new(MockTransport::new());
        let client = WeMeetingClient::with_transport(
            Credential::new("id", "key"),
            "app",
            "alice",
            mock.clone(),
        );

        let result = client.execute(HttpMethod::Get, "/v1/users/alice", None);

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_request_headers_and_signature() {
        let mock = Arc::new(MockTransport::new());
        let client = client(&mock);
        let body = json!({ "userid": "alice" });

        let request = client
            .build_request(HttpMethod::Post, "/v1/users", Some(&body))
            .expect("request should build");

        assert_eq!(request.url, "https://api.meeting.qq.com/v1/users");
        assert_eq!(request.body, r#"{"userid":"alice"}"#);
        assert_eq!(request.header("X-TC-Key"), Some("secret-id"));
        assert_eq!(request.header("AppId"), Some("200000001"));
        assert_eq!(request.header("X-TC-Registered"), Some("1"));

        let timestamp: i64 = request.header("X-TC-Timestamp").expect("timestamp").parse().expect("numeric");
        let nonce: u32 = request.header("X-TC-Nonce").expect("nonce").parse().expect("numeric");
        let expected = Credential::new("secret-id", "secret-key")
            .sign(
                &crate::headers::SignHeaders::new(
                    "secret-id".to_string(),
                    timestamp,
                    nonce,
                    "200000001".to_string(),
                    "/v1/users".to_string(),
                ),
                &request.body,
                HttpMethod::Post,
            )
            .expect("signing should succeed");
        assert_eq!(request.header("X-TC-Signature"), Some(expected.as_str()));
    }

    #[test]
    fn test_empty_body_is_not_sent() {
        let mock = Arc::new(MockTransport::new());
        let client = client(&mock);

        let request = client
            .build_request(HttpMethod::Post, "/v1/meetings", Some(&json!({})))
            .expect("request should build");

        assert!(request.body.is_empty());
    }

    #[test]
    fn test_unregistered_user_omits_header() {
        let mock = Arc::new(MockTransport::new());
        let mut client = client(&mock);
        client.set_user_registered(false);

        let request = client
            .build_request(HttpMethod::Get, "/v1/users/alice", None)
            .expect("request should build");

        assert_eq!(request.header("X-TC-Registered"), None);
    }

    #[test]
    fn test_common_headers_do_not_override_sdk_headers() {
        let mock = Arc::new(MockTransport::new());
        let mut client = client(&mock);
        client.set_common_headers([("SdkId", "sdk-1"), ("X-TC-Key", "spoofed")]);

        let request = client
            .build_request(HttpMethod::Get, "/v1/users/alice", None)
            .expect("request should build");

        assert_eq!(request.header("SdkId"), Some("sdk-1"));
        assert_eq!(request.header("X-TC-Key"), Some("secret-id"));
        assert_eq!(
            request.headers.iter().filter(|(n, _)| n == "X-TC-Key").count(),
            1
        );
    }

    #[test]
    fn test_execute_decodes_json_regardless_of_status() {
        let mock = Arc::new(MockTransport::new());
        mock.push_response(MockResponse::with_status(
            400,
            r#"{"error_info":{"error_code":200003,"message":"invalid instanceid"}}"#,
        ));
        let client = client(&mock);

        let response = client
            .execute(HttpMethod::Get, "/v1/users/alice", None)
            .expect("vendor errors are returned as JSON");

        let info = crate::ErrorInfo::from_response(&response.expect("body")).expect("error info");
        assert_eq!(info.error_code, 200003);
    }

    #[test]
    fn test_execute_empty_and_malformed_bodies() {
        let mock = Arc::new(MockTransport::new());
        mock.push_response(MockResponse::with_status(200, ""));
        mock.push_response(MockResponse::with_status(502, "<html>bad gateway</html>"));
        let client = client(&mock);

        assert_eq!(client.execute(HttpMethod::Delete, "/v1/users/bob", None).expect("ok"), None);
        assert_eq!(client.execute(HttpMethod::Get, "/v1/users/bob", None).expect("ok"), None);
    }

    #[test]
    fn test_execute_surfaces_transport_error() {
        let mock = Arc::new(MockTransport::new());
        mock.push_response(MockResponse::with_error("operation timed out"));
        let client = client(&mock);

        let result = client.execute(HttpMethod::Get, "/v1/users/alice", None);

        assert!(matches!(result, Err(Error::Http(m)) if m.contains("timed out")));
    }

    mod from_env {
        use std::env;
        use std::sync::Mutex;

        use super::*;

        const VARS: [&str; 9] = [
            "WEMEETING_SECRET_ID",
            "WEMEETING_SECRET_KEY",
            "WEMEETING_APP_ID",
            "WEMEETING_USER_ID",
            "WEMEETING_INSTANCE_ID",
            "WEMEETING_SDK_ID",
            "WEMEETING_BASE_URL",
            "WEMEETING_TIMEOUT_SECS",
            "WEMEETING_PROXY",
        ];

        static ENV_LOCK: Mutex<()> = Mutex::new(());

        /// Run `f` with exactly `vars` set among the client variables.
        fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
            let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            for name in VARS {
                env::remove_var(name);
            }
            for (name, value) in vars {
                env::set_var(name, value);
            }
            let result = f();
            for name in VARS {
                env::remove_var(name);
            }
            result
        }

        const REQUIRED: [(&str, &str); 3] = [
            ("WEMEETING_SECRET_ID", "secret-id"),
            ("WEMEETING_SECRET_KEY", "secret-key"),
            ("WEMEETING_APP_ID", "200000001"),
        ];

        fn required_with(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
            REQUIRED.iter().chain(extra).copied().collect()
        }

        #[test]
        fn test_missing_required_variable() {
            let result = with_env(&REQUIRED[..2], WeMeetingClient::from_env);

            assert!(matches!(result, Err(Error::Configuration(m)) if m.contains("WEMEETING_APP_ID")));
        }

        #[test]
        fn test_invalid_instance_id() {
            let vars = required_with(&[("WEMEETING_INSTANCE_ID", "9")]);

            let result = with_env(&vars, WeMeetingClient::from_env);

            assert!(matches!(result, Err(Error::Configuration(_))));
        }

        #[test]
        fn test_invalid_timeout() {
            for timeout in ["31", "abc"] {
                let vars = required_with(&[("WEMEETING_TIMEOUT_SECS", timeout)]);

                let result = with_env(&vars, WeMeetingClient::from_env);

                assert!(
                    matches!(result, Err(Error::Configuration(ref m)) if m.contains("timeout") || m.contains("TIMEOUT")),
                    "timeout {timeout} should be rejected"
                );
            }
        }

        #[test]
        fn test_optional_settings_are_applied() {
            let vars = required_with(&[
                ("WEMEETING_USER_ID", "alice"),
                ("WEMEETING_INSTANCE_ID", "3"),
                ("WEMEETING_SDK_ID", "sdk-1"),
                ("WEMEETING_BASE_URL", "http://127.0.0.1:8080/"),
                ("WEMEETING_TIMEOUT_SECS", "0"),
            ]);

            let client = with_env(&vars, WeMeetingClient::from_env).expect("client from env");

            assert_eq!(client.app_id(), "200000001");
            assert_eq!(client.user_id(), "alice");
            assert_eq!(client.instance_id(), Some(InstanceId::Android));
            assert_eq!(client.base_url(), "http://127.0.0.1:8080");
            let request = client
                .build_request(HttpMethod::Get, "/v1/users/alice", None)
                .expect("request should build");
            assert_eq!(request.header("SdkId"), Some("sdk-1"));
            assert_eq!(request.header("X-TC-Key"), Some("secret-id"));
        }

        #[test]
        fn test_defaults_without_optional_settings() {
            let client = with_env(&REQUIRED, WeMeetingClient::from_env).expect("client from env");

            assert_eq!(client.user_id(), "");
            assert!(client.instance_id().is_none());
            assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        }
    }

    #[test]
    fn test_custom_base_url() {
        let mock = Arc::new(MockTransport::new());
        let mut client = client(&mock);
        client.set_base_url("http://127.0.0.1:8080/");

        client.execute(HttpMethod::Get, "/v1/users/alice", None).expect("ok");

        let call = mock.last_call().expect("call recorded");
        assert_eq!(call.request.url, "http://127.0.0.1:8080/v1/users/alice");
    }
}

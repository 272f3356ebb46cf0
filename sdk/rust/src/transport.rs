//! HTTP Transport for WeMeeting SDK.
//!
//! A synchronous request/response seam. [`HttpTransport`] sends requests
//! with `reqwest`'s blocking client; tests substitute
//! [`crate::testing::MockTransport`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Proxy;

use crate::error::Error;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Largest timeout accepted by [`TransportConfig::with_timeout_secs`].
pub const MAX_TIMEOUT_SECS: u64 = 30;

/// HTTP methods accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name as used on the wire and in the signature.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether a request body is sent for this method.
    #[must_use]
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(Error::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL
    pub url: String,
    /// Headers in send order
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body, empty when there is none
    pub body: String,
}

impl HttpRequest {
    /// Look up a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body text
    pub body: String,
}

/// Synchronous request/response function.
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be delivered.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Transport configuration: timeout and optional proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Request timeout; `None` disables the timeout
    pub timeout: Option<Duration>,
    /// Proxy URL (e.g. `http://10.0.0.1:3128`)
    pub proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            proxy: None,
        }
    }
}

impl TransportConfig {
    /// Set the timeout in whole seconds.
    ///
    /// Accepts `0..=30`; `0` disables the timeout.
    ///
    /// # Errors
    ///
    /// Returns a validation error for values above 30.
    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self, Error> {
        if secs > MAX_TIMEOUT_SECS {
            return Err(Error::validation(format!(
                "timeout must be between 0 and {MAX_TIMEOUT_SECS} seconds, got {secs}"
            )));
        }
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        Ok(self)
    }

    /// Route requests through `proxy_url`.
    #[must_use]
    pub fn with_proxy(mut self, proxy_url: &str) -> Self {
        self.proxy = Some(proxy_url.to_string());
        self
    }
}

/// HTTP transport backed by `reqwest`'s blocking client.
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy URL is invalid or the HTTP client cannot be created.
    pub fn new(config: TransportConfig) -> Result<Self, Error> {
        let mut builder = Client::builder().timeout(config.timeout);

        builder = match &config.proxy {
            Some(url) => builder.proxy(
                Proxy::all(url).map_err(|e| Error::Configuration(format!("Invalid proxy URL {url}: {e}")))?,
            ),
            None => builder.no_proxy(),
        };

        let client = builder.build().map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the transport configuration.
    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = builder.header("Content-Type", "application/json");

        if request.method.carries_body() && !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().map_err(|e| Error::Http(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| Error::Http(format!("Failed to read response body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

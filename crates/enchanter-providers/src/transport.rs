use std::{fmt, future::Future, pin::Pin, time::Duration};

use enchanter_core::error::{EnchantError, Result};
use reqwest::{
    Client as HttpClient,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;

use crate::error::ProviderError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A JSON `POST` an adapter wants sent.
#[derive(Clone)]
pub struct HttpRequest {
    pub url: String,
    /// Header names, any case. Values may hold credentials.
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.headers.iter().map(|(name, _)| *name).collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &names)
            .finish_non_exhaustive()
    }
}

/// Status and raw body of a provider answer.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `"429 Too Many Requests"`, or just the code if it has no canonical
    /// reason phrase.
    pub fn status_line(&self) -> String {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .map(|reason| format!("{} {reason}", self.status))
            .unwrap_or_else(|| self.status.to_string())
    }
}

/// Sends one request and hands back whatever the server answered.
///
/// Any status counts as an answer; only failures to get one (connect, TLS,
/// timeout) are errors. Implementations must not retry.
pub trait Transport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpReply>> + Send + 'a>>;
}

/// [`Transport`] backed by a shared, connection-pooled `reqwest::Client`.
/// Cloning is cheap.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    /// Default client: 60 s request timeout, Rustls TLS.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderError::from)?;
        Ok(Self::with_http(http))
    }

    /// Use a caller-configured client (proxy settings, custom TLS, …).
    pub fn with_http(http: HttpClient) -> Self {
        Self { http }
    }
}

/// Header names are matched case-insensitively; a name or value HTTP
/// cannot carry is an error rather than a panic.
fn header_map(request: &HttpRequest) -> std::result::Result<HeaderMap, ProviderError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in &request.headers {
        let name = *name;
        let header =
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| ProviderError::InvalidHeader(name))?;
        let mut value = HeaderValue::from_str(value).map_err(|_| ProviderError::InvalidHeader(name))?;
        value.set_sensitive(true);
        headers.insert(header, value);
    }

    Ok(headers)
}

impl Transport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpReply>> + Send + 'a>> {
        Box::pin(async move {
            let headers = header_map(&request)?;

            let resp = self
                .http
                .post(&request.url)
                .headers(headers)
                .json(&request.body)
                .send()
                .await
                .map_err(ProviderError::from)?;

            let status = resp.status().as_u16();
            let body = resp.text().await.map_err(ProviderError::from)?;

            Ok::<_, EnchantError>(HttpReply { status, body })
        })
    }
}

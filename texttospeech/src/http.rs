//! HTTP client implementation for the Text to Speech API.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::{stream::BoxStream, StreamExt};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT},
    multipart, Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use url::Url;

use super::{
    auth::Authenticator,
    error::{Error, Result},
};

const SDK_USER_AGENT: &str = concat!("giztoy-texttospeech-rust/", env!("CARGO_PKG_VERSION"));
const SDK_ANALYTICS_HEADER: &str = "x-ibmcloud-sdk-analytics";
const TRANSACTION_ID_HEADER: &str = "x-global-transaction-id";
const WARNINGS_HEADER: &str = "warnings";

/// Stream of raw response body chunks.
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Retry settings for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt. Zero disables retries.
    pub max_retries: u32,
    /// Upper bound for the exponential backoff between attempts.
    pub max_interval: Duration,
}

impl RetryPolicy {
    /// Returns a policy that never retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            max_interval: Duration::from_secs(30),
        }
    }

    /// Backoff before retry `attempt` (1-based): 1s, 2s, 4s, ... capped.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        Duration::from_secs(1u64 << exp).min(self.max_interval)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Transport settings for [`HttpClient`].
pub(crate) struct HttpConfig {
    pub service_url: String,
    pub authenticator: Arc<dyn Authenticator>,
    pub default_headers: HeaderMap,
    pub retry: RetryPolicy,
    pub timeout: Duration,
    pub disable_ssl_verification: bool,
}

/// HTTP client for the Text to Speech API.
pub struct HttpClient {
    client: ReqwestClient,
    service_url: Url,
    authenticator: Arc<dyn Authenticator>,
    default_headers: HeaderMap,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub(crate) fn new(config: HttpConfig) -> Result<Self> {
        let service_url = Url::parse(config.service_url.trim_end_matches('/'))?;
        if service_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "service url cannot be used as a base: {}",
                config.service_url
            )));
        }

        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.disable_ssl_verification)
            .build()?;

        Ok(Self {
            client,
            service_url,
            authenticator: config.authenticator,
            default_headers: config.default_headers,
            retry: config.retry,
        })
    }

    /// Returns the service URL.
    pub fn service_url(&self) -> &str {
        self.service_url.as_str().trim_end_matches('/')
    }

    /// Returns the authenticator used for every request.
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Returns the retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Sends a request and decodes the JSON response body.
    ///
    /// `headers` are added to this call only; they override the client's
    /// default headers but not the SDK, `Accept` and auth headers.
    pub(crate) async fn request<R>(&self, request: &ApiRequest, headers: &[(String, String)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self.execute(request, headers).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(Error::from)
    }

    /// Sends a request whose response carries no body of interest.
    pub(crate) async fn request_empty(&self, request: &ApiRequest, headers: &[(String, String)]) -> Result<()> {
        let response = self.execute(request, headers).await?;
        // Drain so the connection can be reused.
        let _ = response.bytes().await?;
        Ok(())
    }

    /// Sends a request and returns the raw response body.
    pub(crate) async fn request_bytes(
        &self,
        request: &ApiRequest,
        headers: &[(String, String)],
    ) -> Result<BinaryResponse> {
        let response = self.execute(request, headers).await?;
        let content_type = header_string(response.headers(), CONTENT_TYPE.as_str());
        let warnings = header_string(response.headers(), WARNINGS_HEADER);
        let data = response.bytes().await?;

        Ok(BinaryResponse {
            data,
            content_type,
            warnings,
        })
    }

    /// Sends a request and streams the response body.
    ///
    /// Retries only apply until the response headers arrive.
    pub(crate) async fn request_stream(
        &self,
        request: &ApiRequest,
        headers: &[(String, String)],
    ) -> Result<StreamResponse> {
        let response = self.execute(request, headers).await?;
        let content_type = header_string(response.headers(), CONTENT_TYPE.as_str());
        let warnings = header_string(response.headers(), WARNINGS_HEADER);

        Ok(StreamResponse {
            stream: response.bytes_stream().map(|r| r.map_err(Error::from)).boxed(),
            content_type,
            warnings,
        })
    }

    /// Sends the request, retrying transient failures, and returns a
    /// successful response.
    async fn execute(&self, request: &ApiRequest, headers: &[(String, String)]) -> Result<Response> {
        let mut attempt = 0;

        loop {
            match self.execute_once(request, headers).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let backoff = self.retry.backoff(attempt);
                    warn!(
                        operation = request.operation,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "retrying request"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Performs a single HTTP request.
    async fn execute_once(&self, request: &ApiRequest, extra: &[(String, String)]) -> Result<Response> {
        let url = self.build_url(request)?;
        debug!(operation = request.operation, method = %request.method, url = %url, "sending request");

        let mut headers = self.default_headers.clone();
        for (name, value) in extra {
            let (name, value) = parse_header(name, value).map_err(Error::Validation)?;
            headers.insert(name, value);
        }
        headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));
        headers.insert(
            HeaderName::from_static(SDK_ANALYTICS_HEADER),
            header_value(&format!(
                "service_name=text_to_speech;service_version=V1;operation_id={}",
                request.operation
            ))?,
        );
        if let Some(accept) = &request.accept {
            headers.insert(ACCEPT, header_value(accept)?);
        }
        self.authenticator.authenticate(&mut headers).await?;

        let builder = self
            .client
            .request(request.method.clone(), url)
            .headers(headers);
        let builder = request.body.apply(builder)?;

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(self.error_from_response(response, status).await)
    }

    /// Resolves the request path and query against the service URL.
    fn build_url(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.service_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::Config("service url cannot be used as a base".to_string()))?;
            segments.pop_if_empty();
            segments.extend(request.path.iter());
        }

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Converts an error response into an [`Error::Api`].
    async fn error_from_response(&self, response: Response, status: StatusCode) -> Error {
        let headers = response.headers().clone();
        match response.bytes().await {
            Ok(body) => parse_error(status, &headers, &body),
            Err(e) => Error::Http(e),
        }
    }
}

/// Streamed body of a binary response.
pub(crate) struct StreamResponse {
    pub stream: ByteStream,
    pub content_type: Option<String>,
    pub warnings: Option<String>,
}

/// Raw body of a binary response.
#[derive(Debug, Clone)]
pub(crate) struct BinaryResponse {
    pub data: Bytes,
    pub content_type: Option<String>,
    pub warnings: Option<String>,
}

// ==================== Request Description ====================

/// A fully described API call that can be sent more than once.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    method: Method,
    operation: &'static str,
    path: Vec<String>,
    query: Vec<(&'static str, String)>,
    accept: Option<String>,
    body: RequestBody,
}

impl ApiRequest {
    /// Creates a request for `template`, substituting `{name}` placeholders.
    pub fn new(
        method: Method,
        operation: &'static str,
        template: &str,
        params: &[(&str, &str)],
    ) -> Result<Self> {
        Ok(Self {
            method,
            operation,
            path: resolve_path(template, params)?,
            query: Vec::new(),
            accept: Some("application/json".to_string()),
            body: RequestBody::Empty,
        })
    }

    pub fn get(operation: &'static str, template: &str, params: &[(&str, &str)]) -> Result<Self> {
        Self::new(Method::GET, operation, template, params)
    }

    pub fn post(operation: &'static str, template: &str, params: &[(&str, &str)]) -> Result<Self> {
        Self::new(Method::POST, operation, template, params)
    }

    pub fn put(operation: &'static str, template: &str, params: &[(&str, &str)]) -> Result<Self> {
        Self::new(Method::PUT, operation, template, params)
    }

    /// DELETE requests carry no `Accept` header.
    pub fn delete(
        operation: &'static str,
        template: &str,
        params: &[(&str, &str)],
    ) -> Result<Self> {
        Ok(Self::new(Method::DELETE, operation, template, params)?.accept_none())
    }

    /// Adds a query parameter.
    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Adds a query parameter when the value is present.
    pub fn query_opt(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Overrides the `Accept` header.
    pub fn accept(mut self, value: impl Into<String>) -> Self {
        self.accept = Some(value.into());
        self
    }

    /// Removes the `Accept` header.
    pub fn accept_none(mut self) -> Self {
        self.accept = None;
        self
    }

    /// Sets a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Sets a raw binary body.
    pub fn binary(mut self, content_type: &'static str, data: Bytes) -> Self {
        self.body = RequestBody::Binary { content_type, data };
        self
    }

    /// Sets a multipart form body.
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }
}

#[derive(Debug, Clone)]
enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Binary {
        content_type: &'static str,
        data: Bytes,
    },
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Attaches the body. Multipart forms are rebuilt on every call since
    /// reqwest consumes them.
    fn apply(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let builder = match self {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Binary { content_type, data } => {
                builder.header(CONTENT_TYPE, *content_type).body(data.clone())
            }
            RequestBody::Multipart(parts) => {
                let mut form = multipart::Form::new();
                for part in parts {
                    let mut p = multipart::Part::bytes(part.data.to_vec()).mime_str(part.content_type)?;
                    if let Some(filename) = &part.filename {
                        p = p.file_name(filename.clone());
                    }
                    form = form.part(part.name, p);
                }
                builder.multipart(form)
            }
        };
        Ok(builder)
    }
}

/// One part of a multipart form body.
#[derive(Debug, Clone)]
pub(crate) struct FormPart {
    pub name: &'static str,
    pub filename: Option<String>,
    pub content_type: &'static str,
    pub data: Bytes,
}

// ==================== Helpers ====================

/// Splits a path template into URL segments, substituting `{name}`
/// placeholders. Substituted values stay single segments; the URL builder
/// percent-encodes any `/` they contain.
pub(crate) fn resolve_path(template: &str, params: &[(&str, &str)]) -> Result<Vec<String>> {
    template
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let Some(name) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
                return Ok(segment.to_string());
            };

            let value = params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| Error::Other(format!("missing path parameter: {}", name)))?;

            if value.is_empty() {
                return Err(Error::required(name));
            }
            // The URL parser would resolve these instead of sending them.
            if value == "." || value == ".." {
                return Err(Error::Validation(format!("{} must not be '.' or '..'", name)));
            }
            Ok(value.to_string())
        })
        .collect()
}

/// Builds an API error from an error response.
///
/// The message is taken from `errors[0].message`, `error`, `message` or
/// `errorMessage`, falling back to the raw body or the status text.
pub(crate) fn parse_error(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> Error {
    let mut message = String::new();
    let mut code_description = String::new();

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        message = ["/errors/0/message", "/error", "/message", "/errorMessage"]
            .iter()
            .find_map(|pointer| value.pointer(pointer).and_then(|v| v.as_str()))
            .unwrap_or_default()
            .to_string();
        code_description = value
            .get("code_description")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
    }

    if message.is_empty() {
        message = if body.is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            String::from_utf8_lossy(body).trim().to_string()
        };
    }

    Error::Api {
        status: status.as_u16(),
        message,
        code_description,
        transaction_id: header_string(headers, TRANSACTION_ID_HEADER).unwrap_or_default(),
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Parses a caller-supplied header pair.
pub(crate) fn parse_header(name: &str, value: &str) -> std::result::Result<(HeaderName, HeaderValue), String> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| format!("invalid header name {}: {}", name, e))?;
    let header_value =
        HeaderValue::from_str(value).map_err(|e| format!("invalid value for header {}: {}", name, e))?;
    Ok((header_name, header_value))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Other(format!("invalid header value: {}", e)))
}

//! Request authenticators.
//!
//! An [`Authenticator`] decorates every outgoing request with credentials.
//! The client holds it behind `Arc<dyn Authenticator>` so the same
//! credentials can be shared by several clients.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use super::error::{Error, Result};

/// Default IAM token service URL.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Assumed token lifetime when the response carries no `expires_in`.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// Upper bound applied to `expires_in`.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Authentication type names used in external configuration.
pub mod auth_type {
    pub const IAM: &str = "iam";
    pub const BASIC: &str = "basic";
    pub const BEARER_TOKEN: &str = "bearerToken";
    pub const NO_AUTH: &str = "noAuth";
}

/// Adds credentials to outgoing requests.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the authentication type name.
    fn auth_type(&self) -> &'static str;

    /// Checks the configured credentials without contacting any service.
    fn validate(&self) -> Result<()>;

    /// Adds the credentials to the request headers.
    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()>;
}

/// Sends requests without credentials.
#[derive(Debug, Clone, Default)]
pub struct NoAuthAuthenticator;

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    fn auth_type(&self) -> &'static str {
        auth_type::NO_AUTH
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    async fn authenticate(&self, _headers: &mut HeaderMap) -> Result<()> {
        Ok(())
    }
}

/// HTTP basic authentication.
#[derive(Debug, Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: String,
}

impl BasicAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let auth = Self {
            username: username.into(),
            password: password.into(),
        };
        auth.validate()?;
        Ok(auth)
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn auth_type(&self) -> &'static str {
        auth_type::BASIC
    }

    fn validate(&self) -> Result<()> {
        check_credential("username", &self.username)?;
        check_credential("password", &self.password)
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        insert_authorization(headers, &format!("Basic {}", encoded))
    }
}

/// Sends a caller-managed bearer token.
#[derive(Debug, Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let auth = Self {
            token: token.into(),
        };
        auth.validate()?;
        Ok(auth)
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    fn auth_type(&self) -> &'static str {
        auth_type::BEARER_TOKEN
    }

    fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::Auth("bearer token must be non-empty".to_string()));
        }
        Ok(())
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        insert_authorization(headers, &format!("Bearer {}", self.token))
    }
}

/// Exchanges an API key for short-lived IAM access tokens.
///
/// The token is cached and refreshed once 80% of its lifetime has elapsed.
/// Concurrent requests wait on the same refresh.
pub struct IamAuthenticator {
    apikey: String,
    url: String,
    http: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

impl IamAuthenticator {
    /// Creates an authenticator against the default IAM endpoint.
    pub fn new(apikey: impl Into<String>) -> Result<Self> {
        Self::with_options(apikey, None, false)
    }

    /// Creates an authenticator with a custom token endpoint.
    pub fn with_options(
        apikey: impl Into<String>,
        url: Option<String>,
        disable_ssl_verification: bool,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(disable_ssl_verification)
            .build()?;

        let url = url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_IAM_URL.to_string());

        let auth = Self {
            apikey: apikey.into(),
            url: url.trim_end_matches('/').to_string(),
            http,
            token: Mutex::new(None),
        };
        auth.validate()?;
        Ok(auth)
    }

    /// Returns the token endpoint base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns a valid access token, fetching a new one when needed.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let url = format!("{}/identity/token", self.url);
        debug!(url = %url, "requesting iam access token");

        let form = [
            ("grant_type", IAM_GRANT_TYPE),
            ("apikey", self.apikey.as_str()),
            ("response_type", "cloud_iam"),
        ];

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(Error::Auth(format!(
                "iam token request failed (status={}): {}",
                status.as_u16(),
                String::from_utf8_lossy(&body)
            )));
        }

        let token: TokenResponse = serde_json::from_slice(&body)?;
        if token.access_token.is_empty() {
            return Err(Error::Auth("iam token response has no access_token".to_string()));
        }

        Ok(CachedToken {
            access_token: token.access_token,
            refresh_at: refresh_deadline(Instant::now(), token.expires_in),
        })
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    fn auth_type(&self) -> &'static str {
        auth_type::IAM
    }

    fn validate(&self) -> Result<()> {
        check_credential("apikey", &self.apikey)
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let token = self.access_token().await?;
        insert_authorization(headers, &format!("Bearer {}", token))
    }
}

/// Returns when a token fetched at `now` should be replaced: after 80% of
/// its lifetime, with `expires_in` clamped to a sane range.
fn refresh_deadline(now: Instant, expires_in: u64) -> Instant {
    let lifetime = match expires_in {
        0 => DEFAULT_TOKEN_LIFETIME,
        secs => Duration::from_secs(secs).min(MAX_TOKEN_LIFETIME),
    };
    now.checked_add(lifetime * 4 / 5).unwrap_or(now)
}

/// Rejects empty credentials and values still wrapped in braces or quotes,
/// which usually means a template placeholder was never filled in.
fn check_credential(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Auth(format!("{} must be non-empty", name)));
    }

    let wrapped = |c: char| value.starts_with(c) || value.ends_with(c);
    if wrapped('{') || wrapped('}') || wrapped('"') {
        return Err(Error::Auth(format!(
            "{} must not start or end with a brace or quote",
            name
        )));
    }

    Ok(())
}

fn insert_authorization(headers: &mut HeaderMap, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value).map_err(|e| Error::Auth(e.to_string()))?;
    headers.insert(AUTHORIZATION, value);
    Ok(())
}

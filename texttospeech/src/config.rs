//! External service configuration.
//!
//! Settings are read from environment variables prefixed with the upper-cased
//! service name, e.g. `TEXT_TO_SPEECH_URL` and `TEXT_TO_SPEECH_APIKEY`.

use std::sync::Arc;

use super::{
    auth::{
        auth_type, Authenticator, BasicAuthenticator, BearerTokenAuthenticator,
        IamAuthenticator, NoAuthAuthenticator,
    },
    error::{Error, Result},
};

/// Default key used to find external configuration.
pub const DEFAULT_SERVICE_NAME: &str = "text_to_speech";

/// Service endpoint and credential settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service URL override.
    pub url: Option<String>,
    /// One of `iam`, `basic`, `bearerToken`, `noAuth`.
    pub auth_type: Option<String>,
    pub apikey: Option<String>,
    pub bearer_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// IAM token endpoint override.
    pub auth_url: Option<String>,
    /// Skip TLS certificate verification (service and IAM endpoints).
    pub disable_ssl: bool,
}

impl ServiceConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env(service_name: &str) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Reads the configuration through a custom variable lookup.
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = service_name.to_uppercase().replace('-', "_");
        let get = |suffix: &str| {
            lookup(&format!("{}_{}", prefix, suffix)).filter(|v| !v.is_empty())
        };

        Self {
            url: get("URL"),
            auth_type: get("AUTH_TYPE"),
            apikey: get("APIKEY"),
            bearer_token: get("BEARER_TOKEN"),
            username: get("USERNAME"),
            password: get("PASSWORD"),
            auth_url: get("AUTH_URL"),
            disable_ssl: get("DISABLE_SSL")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Returns the effective authentication type.
    ///
    /// Without an explicit type, IAM is inferred from an API key, then bearer
    /// token, then basic credentials.
    pub fn resolved_auth_type(&self) -> Option<&'static str> {
        if let Some(t) = &self.auth_type {
            return match t.to_lowercase().as_str() {
                "iam" => Some(auth_type::IAM),
                "basic" => Some(auth_type::BASIC),
                "bearertoken" => Some(auth_type::BEARER_TOKEN),
                "noauth" => Some(auth_type::NO_AUTH),
                _ => None,
            };
        }

        if self.apikey.is_some() {
            Some(auth_type::IAM)
        } else if self.bearer_token.is_some() {
            Some(auth_type::BEARER_TOKEN)
        } else if self.username.is_some() {
            Some(auth_type::BASIC)
        } else {
            None
        }
    }

    /// Builds the authenticator described by this configuration.
    pub fn authenticator(&self) -> Result<Arc<dyn Authenticator>> {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();

        match self.resolved_auth_type() {
            Some(auth_type::IAM) => Ok(Arc::new(IamAuthenticator::with_options(
                field(&self.apikey),
                self.auth_url.clone(),
                self.disable_ssl,
            )?)),
            Some(auth_type::BASIC) => Ok(Arc::new(BasicAuthenticator::new(
                field(&self.username),
                field(&self.password),
            )?)),
            Some(auth_type::BEARER_TOKEN) => Ok(Arc::new(BearerTokenAuthenticator::new(field(
                &self.bearer_token,
            ))?)),
            Some(_) => Ok(Arc::new(NoAuthAuthenticator)),
            None => match &self.auth_type {
                Some(t) => Err(Error::Config(format!("unsupported auth type: {}", t))),
                None => Err(Error::Config("no authentication configured".to_string())),
            },
        }
    }
}

//! Text to Speech API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;

use super::{
    auth::Authenticator,
    config::{ServiceConfig, DEFAULT_SERVICE_NAME},
    customization::CustomizationService,
    error::{Error, Result},
    http::{parse_header, HttpClient, HttpConfig, RetryPolicy},
    prompt::PromptService,
    speaker::SpeakerService,
    synthesis::SynthesisService,
    user_data::UserDataService,
    voice::VoiceService,
};

/// Default service URL.
pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.text-to-speech.watson.cloud.ibm.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Text to Speech API client.
///
/// The client is cheap to clone; clones share the connection pool and the
/// authenticator.
///
/// # Example
///
/// ```rust,ignore
/// use giztoy_texttospeech::{Client, IamAuthenticator, SynthesizeRequest};
///
/// let client = Client::new(IamAuthenticator::new("your-api-key")?)?;
///
/// let response = client
///     .synthesis()
///     .synthesize(&SynthesizeRequest::new("Hello"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct Client {
    http: Arc<HttpClient>,
}

impl Client {
    /// Creates a client for the default service URL.
    pub fn new(authenticator: impl Authenticator + 'static) -> Result<Self> {
        ClientBuilder::new().authenticator(Arc::new(authenticator)).build()
    }

    /// Creates a new client builder for more configuration options.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client from `TEXT_TO_SPEECH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = ServiceConfig::from_env(DEFAULT_SERVICE_NAME);
        ClientBuilder::from_config(&config)?.build()
    }

    /// Regional URLs are not published for this service.
    pub fn service_url_for_region(region: &str) -> Result<String> {
        Err(Error::Config(format!(
            "service does not support regional URLs (region {})",
            region
        )))
    }

    /// Returns the service URL.
    pub fn service_url(&self) -> &str {
        self.http.service_url()
    }

    /// Returns the voice information service.
    pub fn voice(&self) -> VoiceService {
        VoiceService::new(self.http.clone())
    }

    /// Returns the speech synthesis service.
    pub fn synthesis(&self) -> SynthesisService {
        SynthesisService::new(self.http.clone())
    }

    /// Returns the custom model and custom word service.
    pub fn customization(&self) -> CustomizationService {
        CustomizationService::new(self.http.clone())
    }

    /// Returns the custom prompt service.
    pub fn prompt(&self) -> PromptService {
        PromptService::new(self.http.clone())
    }

    /// Returns the speaker model service.
    pub fn speaker(&self) -> SpeakerService {
        SpeakerService::new(self.http.clone())
    }

    /// Returns the user data service.
    pub fn user_data(&self) -> UserDataService {
        UserDataService::new(self.http.clone())
    }

    /// Returns a reference to the internal HTTP client.
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }
}

/// Builder for creating a Text to Speech API client.
pub struct ClientBuilder {
    service_url: String,
    authenticator: Option<Arc<dyn Authenticator>>,
    default_headers: Vec<(String, String)>,
    retry: RetryPolicy,
    timeout: Duration,
    disable_ssl_verification: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            authenticator: None,
            default_headers: Vec::new(),
            retry: RetryPolicy::disabled(),
            timeout: DEFAULT_TIMEOUT,
            disable_ssl_verification: false,
        }
    }

    /// Creates a builder from external configuration.
    ///
    /// Fails when the configuration names no usable authenticator.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let mut builder = Self::new().authenticator(config.authenticator()?);
        if let Some(url) = &config.url {
            builder = builder.service_url(url.as_str());
        }
        if config.disable_ssl {
            builder = builder.disable_ssl_verification();
        }
        Ok(builder)
    }

    /// Sets the service URL, e.g. the URL of a dedicated instance.
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    /// Sets the authenticator applied to every request.
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Adds a header sent with every request, e.g.
    /// `X-Watson-Learning-Opt-Out: true` or
    /// `X-Watson-Metadata: customer_id=...`.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Retries transient failures up to `max_retries` times with
    /// exponential backoff capped at `max_interval`.
    pub fn enable_retries(mut self, max_retries: u32, max_interval: Duration) -> Self {
        self.retry = RetryPolicy {
            max_retries,
            max_interval,
        };
        self
    }

    /// Disables retries. This is the default.
    pub fn disable_retries(mut self) -> Self {
        self.retry = RetryPolicy::disabled();
        self
    }

    /// Skips TLS certificate verification of the service endpoint.
    pub fn disable_ssl_verification(mut self) -> Self {
        self.disable_ssl_verification = true;
        self
    }

    /// Sets the timeout of a single HTTP attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        let authenticator = self
            .authenticator
            .ok_or_else(|| Error::Config("authenticator must be set".to_string()))?;
        authenticator.validate()?;

        if self.service_url.is_empty() {
            return Err(Error::Config("service url must be non-empty".to_string()));
        }

        let mut default_headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            let (name, value) = parse_header(name, value).map_err(Error::Config)?;
            default_headers.insert(name, value);
        }

        let http = HttpClient::new(HttpConfig {
            service_url: self.service_url,
            authenticator,
            default_headers,
            retry: self.retry,
            timeout: self.timeout,
            disable_ssl_verification: self.disable_ssl_verification,
        })?;

        Ok(Client {
            http: Arc::new(http),
        })
    }
}

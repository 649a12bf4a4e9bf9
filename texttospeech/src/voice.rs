//! Voice information service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    customization::CustomModel,
    error::{Error, Result},
    http::{ApiRequest, HttpClient},
};

/// Voice information service.
pub struct VoiceService {
    http: Arc<HttpClient>,
    headers: Vec<(String, String)>,
}

impl VoiceService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            headers: Vec::new(),
        }
    }

    /// Adds a header to every call made through this handle, e.g.
    /// `X-Watson-Metadata: customer_id=...`.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Lists all voices available for use with the service.
    ///
    /// The ordering of the list can change from call to call.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let voices = client.voice().list().await?;
    ///
    /// for voice in &voices.voices {
    ///     println!("{}: {} ({})", voice.name, voice.description, voice.gender);
    /// }
    /// ```
    pub async fn list(&self) -> Result<Voices> {
        let req = ApiRequest::get("ListVoices", "/v1/voices", &[])?;
        self.http.request(&req, &self.headers).await
    }

    /// Gets information about a voice.
    ///
    /// With a customization ID, the response also describes that custom
    /// model, which must be defined for the language of the voice.
    pub async fn get(&self, request: &GetVoiceRequest) -> Result<Voice> {
        if request.voice.is_empty() {
            return Err(Error::required("voice"));
        }

        let params = [("voice", request.voice.as_str())];
        let req = ApiRequest::get("GetVoice", "/v1/voices/{voice}", &params)?
            .query_opt("customization_id", request.customization_id.as_deref());

        self.http.request(&req, &self.headers).await
    }
}

// ==================== Request/Response Types ====================

/// Request for a single voice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetVoiceRequest {
    /// Voice name, e.g. `en-US_AllisonV3Voice`.
    pub voice: String,

    /// Custom model to describe along with the voice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization_id: Option<String>,
}

impl GetVoiceRequest {
    pub fn new(voice: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            customization_id: None,
        }
    }
}

/// Information about all available voices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Voices {
    #[serde(default)]
    pub voices: Vec<Voice>,
}

/// Information about an available voice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Voice {
    /// URI of the voice.
    #[serde(default)]
    pub url: String,

    /// `male` or `female`.
    #[serde(default)]
    pub gender: String,

    /// Voice name, used as the voice identifier in all requests.
    pub name: String,

    /// Language and region, e.g. `en-US`.
    #[serde(default)]
    pub language: String,

    #[serde(default)]
    pub description: String,

    /// Whether the voice can be customized with a custom model.
    #[serde(default)]
    pub customizable: bool,

    #[serde(default)]
    pub supported_features: SupportedFeatures,

    /// The custom model named in the request, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<CustomModel>,
}

/// Additional service features supported by a voice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupportedFeatures {
    /// Whether custom models can be used with the voice.
    #[serde(default)]
    pub custom_pronunciation: bool,

    /// Deprecated; always false for current voices.
    #[serde(default)]
    pub voice_transformation: bool,
}

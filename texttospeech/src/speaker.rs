//! Speaker model service.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::{
    error::{Error, Result},
    http::{ApiRequest, HttpClient},
    types::PromptStatus,
};

/// Speaker model service.
///
/// A speaker model holds the voice characteristics of one speaker and is
/// used to improve the quality of that speaker's custom prompts.
pub struct SpeakerService {
    http: Arc<HttpClient>,
    headers: Vec<(String, String)>,
}

impl SpeakerService {
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

    /// Lists the speaker models owned by the credentials.
    pub async fn list(&self) -> Result<Speakers> {
        let req = ApiRequest::get("ListSpeakerModels", "/v1/speakers", &[])?;
        self.http.request(&req, &self.headers).await
    }

    /// Creates a speaker model from a WAV recording of the speaker.
    ///
    /// The audio must contain at least one minute of speech and at most
    /// five minutes in total.
    pub async fn create(&self, request: &CreateSpeakerModelRequest) -> Result<SpeakerModel> {
        if request.speaker_name.is_empty() {
            return Err(Error::required("speaker_name"));
        }
        if request.audio.is_empty() {
            return Err(Error::required("audio"));
        }

        let req = ApiRequest::post("CreateSpeakerModel", "/v1/speakers", &[])?
            .query("speaker_name", request.speaker_name.as_str())
            .binary("audio/wav", request.audio.clone());

        self.http.request(&req, &self.headers).await
    }

    /// Gets the custom models and prompts a speaker model is used with.
    pub async fn get(&self, speaker_id: &str) -> Result<SpeakerCustomModels> {
        let req = ApiRequest::get(
            "GetSpeakerModel",
            "/v1/speakers/{speaker_id}",
            &[("speaker_id", speaker_id)],
        )?;

        self.http.request(&req, &self.headers).await
    }

    /// Deletes a speaker model. Prompts already tuned with it are kept.
    pub async fn delete(&self, speaker_id: &str) -> Result<()> {
        let req = ApiRequest::delete(
            "DeleteSpeakerModel",
            "/v1/speakers/{speaker_id}",
            &[("speaker_id", speaker_id)],
        )?;

        self.http.request_empty(&req, &self.headers).await
    }
}

// ==================== Request/Response Types ====================

/// Request for creating a speaker model.
#[derive(Debug, Clone, Default)]
pub struct CreateSpeakerModelRequest {
    /// Name of the speaker, at most 49 characters.
    pub speaker_name: String,

    /// WAV audio of the speaker.
    pub audio: Bytes,
}

/// A speaker model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Speaker {
    pub speaker_id: String,
    pub name: String,
}

/// The speaker models owned by the credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Speakers {
    #[serde(default)]
    pub speakers: Vec<Speaker>,
}

/// ID of a newly created speaker model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakerModel {
    pub speaker_id: String,
}

/// A custom model that holds prompts of a speaker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakerCustomModel {
    pub customization_id: String,

    #[serde(default)]
    pub prompts: Vec<SpeakerPrompt>,
}

/// Custom models that use a speaker model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakerCustomModels {
    #[serde(default)]
    pub customizations: Vec<SpeakerCustomModel>,
}

/// A prompt recorded by a speaker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakerPrompt {
    pub prompt: String,

    pub prompt_id: String,

    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SpeakerPrompt {
    pub fn parsed_status(&self) -> Option<PromptStatus> {
        PromptStatus::parse(&self.status)
    }
}

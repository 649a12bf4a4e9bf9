//! Custom prompt service.
//!
//! Prompts are recorded phrases stored in a custom model. They can be
//! referenced from SSML with `<ibm:prompt id="..."/>` and are only usable
//! with the voices the model was created for.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::{
    error::{Error, Result},
    http::{ApiRequest, FormPart, HttpClient},
    types::PromptStatus,
};

/// Custom prompt service.
pub struct PromptService {
    http: Arc<HttpClient>,
    headers: Vec<(String, String)>,
}

impl PromptService {
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

    /// Lists the prompts of a custom model.
    pub async fn list(&self, customization_id: &str) -> Result<Prompts> {
        let req = ApiRequest::get(
            "ListCustomPrompts",
            "/v1/customizations/{customization_id}/prompts",
            &[("customization_id", customization_id)],
        )?;

        self.http.request(&req, &self.headers).await
    }

    /// Adds a prompt, or replaces the prompt with the same ID.
    ///
    /// The audio must be a WAV file of at most 30 seconds. Processing is
    /// asynchronous; poll [`PromptService::get`] until the status is
    /// `available` or `failed`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = AddCustomPromptRequest {
    ///     customization_id: model_id.clone(),
    ///     prompt_id: "greeting".to_string(),
    ///     metadata: PromptMetadata::new("Thank you for calling."),
    ///     file: std::fs::read("greeting.wav")?.into(),
    ///     filename: None,
    /// };
    ///
    /// let prompt = client.prompt().add(&request).await?;
    /// println!("{}: {}", prompt.prompt_id, prompt.status);
    /// ```
    pub async fn add(&self, request: &AddCustomPromptRequest) -> Result<Prompt> {
        if request.metadata.prompt_text.is_empty() {
            return Err(Error::required("metadata.prompt_text"));
        }
        if request.file.is_empty() {
            return Err(Error::required("file"));
        }

        let metadata = serde_json::to_vec(&request.metadata)?;
        let parts = vec![
            FormPart {
                name: "metadata",
                filename: None,
                content_type: "application/json",
                data: Bytes::from(metadata),
            },
            FormPart {
                name: "file",
                filename: Some(
                    request
                        .filename
                        .clone()
                        .unwrap_or_else(|| "filename".to_string()),
                ),
                content_type: "audio/wav",
                data: request.file.clone(),
            },
        ];

        let params = [
            ("customization_id", request.customization_id.as_str()),
            ("prompt_id", request.prompt_id.as_str()),
        ];
        let req = ApiRequest::post(
            "AddCustomPrompt",
            "/v1/customizations/{customization_id}/prompts/{prompt_id}",
            &params,
        )?
        .multipart(parts);

        self.http.request(&req, &self.headers).await
    }

    /// Gets a prompt of a custom model.
    pub async fn get(&self, customization_id: &str, prompt_id: &str) -> Result<Prompt> {
        let req = ApiRequest::get(
            "GetCustomPrompt",
            "/v1/customizations/{customization_id}/prompts/{prompt_id}",
            &[("customization_id", customization_id), ("prompt_id", prompt_id)],
        )?;

        self.http.request(&req, &self.headers).await
    }

    /// Deletes a prompt from a custom model.
    pub async fn delete(&self, customization_id: &str, prompt_id: &str) -> Result<()> {
        let req = ApiRequest::delete(
            "DeleteCustomPrompt",
            "/v1/customizations/{customization_id}/prompts/{prompt_id}",
            &[("customization_id", customization_id), ("prompt_id", prompt_id)],
        )?;

        self.http.request_empty(&req, &self.headers).await
    }
}

// ==================== Request/Response Types ====================

/// Request for adding a custom prompt.
#[derive(Debug, Clone, Default)]
pub struct AddCustomPromptRequest {
    pub customization_id: String,

    /// Identifier of the prompt, unique within the model.
    pub prompt_id: String,

    pub metadata: PromptMetadata,

    /// WAV audio of the spoken prompt.
    pub file: Bytes,

    /// File name reported in the form part. Defaults to `filename`.
    pub filename: Option<String>,
}

/// Text and speaker of a prompt, sent as the `metadata` form part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptMetadata {
    /// Text spoken in the audio.
    pub prompt_text: String,

    /// Speaker model used to tune the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_id: Option<String>,
}

impl PromptMetadata {
    pub fn new(prompt_text: impl Into<String>) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            speaker_id: None,
        }
    }
}

/// A custom prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prompt {
    /// Text of the prompt.
    pub prompt: String,

    pub prompt_id: String,

    /// `processing`, `available` or `failed`.
    pub status: String,

    /// Why processing failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_id: Option<String>,
}

impl Prompt {
    /// Parsed status, `None` for values this crate does not know.
    pub fn parsed_status(&self) -> Option<PromptStatus> {
        PromptStatus::parse(&self.status)
    }
}

/// The prompts of a custom model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prompts {
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

//! Speech synthesis service.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::{
    error::{Error, Result},
    http::{ApiRequest, ByteStream, HttpClient},
    types::{AudioFormat, PronunciationFormat},
};

/// Speech synthesis service.
pub struct SynthesisService {
    http: Arc<HttpClient>,
    headers: Vec<(String, String)>,
}

impl SynthesisService {
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

    /// Synthesizes text to audio spoken in the requested voice.
    ///
    /// The service accepts at most 5 KB of input text, SSML tags included.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = SynthesizeRequest {
    ///     text: "Hello, world!".to_string(),
    ///     voice: Some(voice_name::EN_US_ALLISON_V3.to_string()),
    ///     accept: Some(AudioFormat::Wav.mime().to_string()),
    ///     ..Default::default()
    /// };
    ///
    /// let response = client.synthesis().synthesize(&request).await?;
    /// std::fs::write("hello.wav", &response.audio)?;
    /// ```
    pub async fn synthesize(&self, request: &SynthesizeRequest) -> Result<SynthesizeResponse> {
        let req = build_synthesize_request(request)?;
        let resp = self.http.request_bytes(&req, &self.headers).await?;

        Ok(SynthesizeResponse {
            audio: resp.data,
            content_type: resp.content_type,
            warnings: resp.warnings,
        })
    }

    /// Synthesizes text and streams the audio as it arrives.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use futures::StreamExt;
    ///
    /// let mut response = client.synthesis().synthesize_stream(&request).await?;
    /// while let Some(chunk) = response.audio.next().await {
    ///     file.write_all(&chunk?)?;
    /// }
    /// ```
    pub async fn synthesize_stream(&self, request: &SynthesizeRequest) -> Result<SynthesizeStream> {
        let req = build_synthesize_request(request)?;
        let resp = self.http.request_stream(&req, &self.headers).await?;

        Ok(SynthesizeStream {
            audio: resp.stream,
            content_type: resp.content_type,
            warnings: resp.warnings,
        })
    }

    /// Gets the phonetic pronunciation of a word.
    pub async fn pronunciation(&self, request: &GetPronunciationRequest) -> Result<Pronunciation> {
        if request.text.is_empty() {
            return Err(Error::required("text"));
        }

        let req = ApiRequest::get("GetPronunciation", "/v1/pronunciation", &[])?
            .query("text", request.text.as_str())
            .query_opt("voice", request.voice.as_deref())
            .query_opt("format", request.format.map(|f| f.as_str()))
            .query_opt("customization_id", request.customization_id.as_deref());

        self.http.request(&req, &self.headers).await
    }
}

fn build_synthesize_request(request: &SynthesizeRequest) -> Result<ApiRequest> {
    #[derive(Serialize)]
    struct Body<'a> {
        text: &'a str,
    }

    if request.text.is_empty() {
        return Err(Error::required("text"));
    }

    let accept = request
        .accept
        .as_deref()
        .unwrap_or_else(|| AudioFormat::default().mime());

    ApiRequest::post("Synthesize", "/v1/synthesize", &[])?
        .accept(accept)
        .query_opt("voice", request.voice.as_deref())
        .query_opt("customization_id", request.customization_id.as_deref())
        .json(&Body {
            text: &request.text,
        })
}

// ==================== Request/Response Types ====================

/// Request for speech synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesizeRequest {
    /// Plain text or SSML to synthesize.
    pub text: String,

    /// Requested audio format (`Accept` value), e.g. `audio/wav` or
    /// `audio/l16;rate=22050`. Defaults to `audio/basic`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,

    /// Voice to speak with. The service picks its default voice when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Custom model to apply; its language must match the voice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization_id: Option<String>,
}

impl SynthesizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Synthesized audio.
#[derive(Debug, Clone, Default)]
pub struct SynthesizeResponse {
    /// Audio bytes in the requested format.
    pub audio: Bytes,

    /// Content type reported by the service.
    pub content_type: Option<String>,

    /// Messages about invalid query parameters. The request still succeeds.
    pub warnings: Option<String>,
}

/// Synthesized audio delivered chunk by chunk.
pub struct SynthesizeStream {
    /// Audio chunks in the requested format.
    pub audio: ByteStream,

    /// Content type reported by the service.
    pub content_type: Option<String>,

    /// Messages about invalid query parameters. The request still succeeds.
    pub warnings: Option<String>,
}

/// Request for the pronunciation of a word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetPronunciationRequest {
    /// The word to look up.
    pub text: String,

    /// Voice selecting the language of the pronunciation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Phoneme format of the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<PronunciationFormat>,

    /// Custom model whose translation takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization_id: Option<String>,
}

/// The pronunciation of a word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pronunciation {
    pub pronunciation: String,
}

//! Text to Speech API SDK for Rust.
//!
//! This crate provides a client for the IBM Watson Text to Speech REST API:
//! voices, synthesis, pronunciation, custom models and words, custom
//! prompts, speaker models and user data deletion.
//!
//! # Example
//!
//! ```rust,ignore
//! use giztoy_texttospeech::{voice_name, AudioFormat, Client, SynthesizeRequest};
//!
//! let client = Client::from_env()?;
//!
//! let request = SynthesizeRequest {
//!     text: "Hello, world!".to_string(),
//!     voice: Some(voice_name::EN_US_ALLISON_V3.to_string()),
//!     accept: Some(AudioFormat::Mp3.mime().to_string()),
//!     ..Default::default()
//! };
//! let response = client.synthesis().synthesize(&request).await?;
//! ```

mod auth;
mod client;
mod config;
mod customization;
mod error;
pub mod http;
mod prompt;
mod speaker;
mod synthesis;
mod types;
mod user_data;
mod voice;

pub use auth::{
    auth_type, Authenticator, BasicAuthenticator, BearerTokenAuthenticator, IamAuthenticator,
    NoAuthAuthenticator, DEFAULT_IAM_URL,
};
pub use client::{Client, ClientBuilder, DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT};
pub use config::{ServiceConfig, DEFAULT_SERVICE_NAME};
pub use customization::{
    AddWordRequest, CreateCustomModelRequest, CustomModel, CustomModels, CustomizationService,
    Translation, UpdateCustomModelRequest, Word, Words,
};
pub use error::{Error, Result};
pub use http::{ByteStream, RetryPolicy};
pub use prompt::{AddCustomPromptRequest, Prompt, PromptMetadata, PromptService, Prompts};
pub use speaker::{
    CreateSpeakerModelRequest, Speaker, SpeakerCustomModel, SpeakerCustomModels, SpeakerModel,
    SpeakerPrompt, SpeakerService, Speakers,
};
pub use synthesis::{
    GetPronunciationRequest, Pronunciation, SynthesisService, SynthesizeRequest,
    SynthesizeResponse, SynthesizeStream,
};
pub use types::{
    voice_name, AudioFormat, Endianness, Language, PartOfSpeech, PromptStatus,
    PronunciationFormat,
};
pub use user_data::UserDataService;
pub use voice::{GetVoiceRequest, SupportedFeatures, Voice, VoiceService, Voices};

//! Custom model and custom word service.
//!
//! A custom model is a named set of word translations for one language. It
//! can be used with any voice of that language. Requests must be made with
//! the credentials of the service instance that owns the model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    error::{Error, Result},
    http::{ApiRequest, HttpClient},
    prompt::Prompt,
    types::{Language, PartOfSpeech},
};

/// Custom model and custom word service.
pub struct CustomizationService {
    http: Arc<HttpClient>,
    headers: Vec<(String, String)>,
}

impl CustomizationService {
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

    // ==================== Custom Models ====================

    /// Creates a new empty custom model.
    ///
    /// Only the `customization_id` of the returned model is populated.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = CreateCustomModelRequest {
    ///     name: "Support terms".to_string(),
    ///     language: Some(Language::EnUs),
    ///     description: Some("Acronyms used by the help desk".to_string()),
    /// };
    ///
    /// let model = client.customization().create(&request).await?;
    /// println!("created {}", model.customization_id);
    /// ```
    pub async fn create(&self, request: &CreateCustomModelRequest) -> Result<CustomModel> {
        if request.name.is_empty() {
            return Err(Error::required("name"));
        }

        let req = ApiRequest::post("CreateCustomModel", "/v1/customizations", &[])?.json(request)?;
        self.http.request(&req, &self.headers).await
    }

    /// Lists the custom models owned by the credentials, optionally only
    /// those of one language.
    pub async fn list(&self, language: Option<Language>) -> Result<CustomModels> {
        let req = ApiRequest::get("ListCustomModels", "/v1/customizations", &[])?
            .query_opt("language", language.map(|l| l.as_str()));

        self.http.request(&req, &self.headers).await
    }

    /// Updates the name, description or words of a custom model.
    ///
    /// Words already in the model are overwritten by the new translations.
    pub async fn update(&self, request: &UpdateCustomModelRequest) -> Result<()> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a str>,
            #[serde(skip_serializing_if = "<[Word]>::is_empty")]
            words: &'a [Word],
        }

        let params = [("customization_id", request.customization_id.as_str())];
        let req = ApiRequest::post(
            "UpdateCustomModel",
            "/v1/customizations/{customization_id}",
            &params,
        )?
        .json(&Body {
            name: request.name.as_deref(),
            description: request.description.as_deref(),
            words: &request.words,
        })?;

        self.http.request_empty(&req, &self.headers).await
    }

    /// Gets a custom model with its words and prompts.
    pub async fn get(&self, customization_id: &str) -> Result<CustomModel> {
        let req = ApiRequest::get(
            "GetCustomModel",
            "/v1/customizations/{customization_id}",
            &[("customization_id", customization_id)],
        )?;

        self.http.request(&req, &self.headers).await
    }

    /// Deletes a custom model.
    pub async fn delete(&self, customization_id: &str) -> Result<()> {
        let req = ApiRequest::delete(
            "DeleteCustomModel",
            "/v1/customizations/{customization_id}",
            &[("customization_id", customization_id)],
        )?;

        self.http.request_empty(&req, &self.headers).await
    }

    // ==================== Custom Words ====================

    /// Adds one or more words to a custom model, replacing existing
    /// translations of the same words.
    pub async fn add_words(&self, customization_id: &str, words: &[Word]) -> Result<()> {
        #[derive(Serialize)]
        struct Body<'a> {
            words: &'a [Word],
        }

        if words.is_empty() {
            return Err(Error::required("words"));
        }

        let req = ApiRequest::post(
            "AddWords",
            "/v1/customizations/{customization_id}/words",
            &[("customization_id", customization_id)],
        )?
        .json(&Body { words })?;

        self.http.request_empty(&req, &self.headers).await
    }

    /// Lists the words of a custom model in alphabetical order, uppercase
    /// before lowercase.
    pub async fn list_words(&self, customization_id: &str) -> Result<Words> {
        let req = ApiRequest::get(
            "ListWords",
            "/v1/customizations/{customization_id}/words",
            &[("customization_id", customization_id)],
        )?;

        self.http.request(&req, &self.headers).await
    }

    /// Adds or replaces a single word.
    pub async fn add_word(&self, request: &AddWordRequest) -> Result<()> {
        #[derive(Serialize)]
        struct Body<'a> {
            translation: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            part_of_speech: Option<PartOfSpeech>,
        }

        if request.translation.is_empty() {
            return Err(Error::required("translation"));
        }

        let params = [
            ("customization_id", request.customization_id.as_str()),
            ("word", request.word.as_str()),
        ];
        let req = ApiRequest::put(
            "AddWord",
            "/v1/customizations/{customization_id}/words/{word}",
            &params,
        )?
        .accept_none()
        .json(&Body {
            translation: &request.translation,
            part_of_speech: request.part_of_speech,
        })?;

        self.http.request_empty(&req, &self.headers).await
    }

    /// Gets the translation of a word in a custom model.
    pub async fn get_word(&self, customization_id: &str, word: &str) -> Result<Translation> {
        let req = ApiRequest::get(
            "GetWord",
            "/v1/customizations/{customization_id}/words/{word}",
            &[("customization_id", customization_id), ("word", word)],
        )?;

        self.http.request(&req, &self.headers).await
    }

    /// Deletes a word from a custom model.
    pub async fn delete_word(&self, customization_id: &str, word: &str) -> Result<()> {
        let req = ApiRequest::delete(
            "DeleteWord",
            "/v1/customizations/{customization_id}/words/{word}",
            &[("customization_id", customization_id), ("word", word)],
        )?;

        self.http.request_empty(&req, &self.headers).await
    }
}

// ==================== Request/Response Types ====================

/// Request for creating a custom model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCustomModelRequest {
    /// Name of the new model.
    pub name: String,

    /// Language of the model. The service uses `en-US` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request for updating a custom model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCustomModelRequest {
    pub customization_id: String,

    /// New name of the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description of the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Words to add or update.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,
}

/// Request for adding a single word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddWordRequest {
    pub customization_id: String,

    /// The word to add or update.
    pub word: String,

    /// Phonetic (SSML phoneme) or sounds-like translation.
    pub translation: String,

    /// Japanese only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<PartOfSpeech>,
}

/// Information about a custom model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomModel {
    /// Customization ID (GUID) of the model.
    pub customization_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Language identifier, e.g. `en-US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// GUID of the credentials that own the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Creation time, ISO 8601 in UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Last modification time, ISO 8601 in UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Only returned when getting a single model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,

    /// Only returned when getting a single model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<Prompt>,
}

/// A list of custom models.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomModels {
    #[serde(default)]
    pub customizations: Vec<CustomModel>,
}

/// A word and its translation in a custom model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,

    pub translation: String,

    /// Japanese only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<PartOfSpeech>,
}

impl Word {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            part_of_speech: None,
        }
    }
}

/// The words of a custom model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Words {
    #[serde(default)]
    pub words: Vec<Word>,
}

/// The translation of a single word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Translation {
    pub translation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<PartOfSpeech>,
}

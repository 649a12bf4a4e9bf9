use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Response as HttpResponse, Uri},
    response::Response,
    Router,
};
use futures::StreamExt;
use giztoy_texttospeech::{
    voice_name, AddCustomPromptRequest, AddWordRequest, AudioFormat, BasicAuthenticator,
    BearerTokenAuthenticator, Client, CreateCustomModelRequest, CreateSpeakerModelRequest, Error,
    GetPronunciationRequest, GetVoiceRequest, IamAuthenticator, Language, NoAuthAuthenticator,
    PartOfSpeech, PromptMetadata, PromptStatus, PronunciationFormat, SynthesizeRequest,
    UpdateCustomModelRequest, Word,
};
use serde_json::{json, Value};

// ==================== Mock Server ====================

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is json")
    }
}

struct Canned {
    status: u16,
    content_type: &'static str,
    headers: Vec<(&'static str, &'static str)>,
    body: Vec<u8>,
}

impl Canned {
    fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            headers: Vec::new(),
            body: body.to_string().into_bytes(),
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    fn audio(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type,
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<VecDeque<Canned>>>,
}

impl MockState {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }
}

async fn handler(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(|q| q.to_string()),
        headers,
        body: body.to_vec(),
    });

    let canned = state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Canned::json(200, json!({})));

    let mut builder = HttpResponse::builder()
        .status(canned.status)
        .header("content-type", canned.content_type);
    for (name, value) in canned.headers {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(canned.body)).unwrap()
}

async fn start(responses: Vec<Canned>) -> (String, MockState) {
    let state = MockState::default();
    state.responses.lock().unwrap().extend(responses);

    let app = Router::new().fallback(handler).with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn client(url: &str) -> Client {
    Client::builder()
        .service_url(url)
        .authenticator(Arc::new(NoAuthAuthenticator))
        .build()
        .unwrap()
}

// ==================== Voices ====================

#[tokio::test]
async fn test_list_voices() {
    let (url, mock) = start(vec![Canned::json(
        200,
        json!({
            "voices": [{
                "url": "https://example.com/v1/voices/en-US_AllisonV3Voice",
                "gender": "female",
                "name": "en-US_AllisonV3Voice",
                "language": "en-US",
                "description": "Allison: American English female voice.",
                "customizable": true,
                "supported_features": {"custom_pronunciation": true, "voice_transformation": false}
            }]
        }),
    )])
    .await;

    let voices = client(&url).voice().list().await.unwrap();
    assert_eq!(voices.voices.len(), 1);
    assert_eq!(voices.voices[0].name, voice_name::EN_US_ALLISON_V3);
    assert!(voices.voices[0].supported_features.custom_pronunciation);

    let req = mock.last();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/v1/voices");
    assert_eq!(req.query, None);
    assert_eq!(req.header("accept"), Some("application/json"));
    assert!(req
        .header("user-agent")
        .unwrap()
        .starts_with("giztoy-texttospeech-rust/"));
    assert_eq!(
        req.header("x-ibmcloud-sdk-analytics"),
        Some("service_name=text_to_speech;service_version=V1;operation_id=ListVoices")
    );
}

#[tokio::test]
async fn test_get_voice_with_customization() {
    let (url, mock) = start(vec![Canned::json(
        200,
        json!({
            "name": "en-US_AllisonV3Voice",
            "gender": "female",
            "language": "en-US",
            "customization": {"customization_id": "cust-1", "name": "Support"}
        }),
    )])
    .await;

    let request = GetVoiceRequest {
        voice: voice_name::EN_US_ALLISON_V3.to_string(),
        customization_id: Some("cust-1".to_string()),
    };
    let voice = client(&url).voice().get(&request).await.unwrap();
    assert_eq!(voice.customization.unwrap().customization_id, "cust-1");

    let req = mock.last();
    assert_eq!(req.path, "/v1/voices/en-US_AllisonV3Voice");
    assert_eq!(req.query.as_deref(), Some("customization_id=cust-1"));
}

#[tokio::test]
async fn test_get_voice_requires_name() {
    let (url, mock) = start(vec![]).await;

    let err = client(&url)
        .voice()
        .get(&GetVoiceRequest::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(mock.requests().is_empty());
}

// ==================== Synthesis ====================

#[tokio::test]
async fn test_synthesize() {
    let (url, mock) = start(vec![Canned::audio("audio/wav", b"RIFF....WAVE")
        .with_header("warnings", "Unknown arguments: foo.")])
    .await;

    let request = SynthesizeRequest {
        text: "Hello, world!".to_string(),
        accept: Some(AudioFormat::Wav.mime().to_string()),
        voice: Some(voice_name::EN_US_MICHAEL_V3.to_string()),
        customization_id: Some("cust-1".to_string()),
    };
    let response = client(&url).synthesis().synthesize(&request).await.unwrap();
    assert_eq!(&response.audio[..], b"RIFF....WAVE");
    assert_eq!(response.content_type.as_deref(), Some("audio/wav"));
    assert_eq!(response.warnings.as_deref(), Some("Unknown arguments: foo."));

    let req = mock.last();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/v1/synthesize");
    assert_eq!(
        req.query.as_deref(),
        Some("voice=en-US_MichaelV3Voice&customization_id=cust-1")
    );
    assert_eq!(req.header("accept"), Some("audio/wav"));
    assert!(req.header("content-type").unwrap().starts_with("application/json"));
    assert_eq!(req.json(), json!({"text": "Hello, world!"}));
}

#[tokio::test]
async fn test_synthesize_default_accept() {
    let (url, mock) = start(vec![Canned::audio("audio/basic", &[0x7f; 16])]).await;

    let response = client(&url)
        .synthesis()
        .synthesize(&SynthesizeRequest::new("Hi"))
        .await
        .unwrap();
    assert_eq!(response.audio.len(), 16);

    let req = mock.last();
    assert_eq!(req.header("accept"), Some("audio/basic"));
    assert_eq!(req.query, None);
}

#[tokio::test]
async fn test_synthesize_l16_accept() {
    let (url, mock) = start(vec![Canned::audio("audio/l16;rate=22050", &[0; 8])]).await;

    let request = SynthesizeRequest {
        text: "Hi".to_string(),
        accept: Some(AudioFormat::L16.with_rate(22050)),
        ..Default::default()
    };
    client(&url).synthesis().synthesize(&request).await.unwrap();

    assert_eq!(mock.last().header("accept"), Some("audio/l16;rate=22050"));
}

#[tokio::test]
async fn test_synthesize_stream() {
    let audio: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();
    let (url, _mock) = start(vec![
        Canned::audio("audio/mp3", &audio).with_header("Warnings", "Unknown arguments: foo."),
    ])
    .await;

    let request = SynthesizeRequest {
        text: "Streaming".to_string(),
        accept: Some(AudioFormat::Mp3.mime().to_string()),
        ..Default::default()
    };
    let mut response = client(&url)
        .synthesis()
        .synthesize_stream(&request)
        .await
        .unwrap();

    assert_eq!(response.content_type.as_deref(), Some("audio/mp3"));
    assert_eq!(response.warnings.as_deref(), Some("Unknown arguments: foo."));

    let mut received = Vec::new();
    while let Some(chunk) = response.audio.next().await {
        received.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(received, audio);
}

#[tokio::test]
async fn test_synthesize_requires_text() {
    let (url, mock) = start(vec![]).await;

    let err = client(&url)
        .synthesis()
        .synthesize(&SynthesizeRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_get_pronunciation() {
    let (url, mock) = start(vec![Canned::json(
        200,
        json!({"pronunciation": "ˌaɪˌtrɪpəlˈi"}),
    )])
    .await;

    let request = GetPronunciationRequest {
        text: "IEEE".to_string(),
        voice: Some(voice_name::EN_US_ALLISON_V3.to_string()),
        format: Some(PronunciationFormat::Ipa),
        customization_id: None,
    };
    let pronunciation = client(&url)
        .synthesis()
        .pronunciation(&request)
        .await
        .unwrap();
    assert_eq!(pronunciation.pronunciation, "ˌaɪˌtrɪpəlˈi");

    let req = mock.last();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/v1/pronunciation");
    assert_eq!(
        req.query.as_deref(),
        Some("text=IEEE&voice=en-US_AllisonV3Voice&format=ipa")
    );
}

// ==================== Custom Models ====================

#[tokio::test]
async fn test_create_custom_model() {
    let (url, mock) = start(vec![Canned::json(201, json!({"customization_id": "cust-1"}))]).await;

    let request = CreateCustomModelRequest {
        name: "Support terms".to_string(),
        language: Some(Language::EnUs),
        description: Some("Help desk acronyms".to_string()),
    };
    let model = client(&url).customization().create(&request).await.unwrap();
    assert_eq!(model.customization_id, "cust-1");

    let req = mock.last();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/v1/customizations");
    assert_eq!(
        req.json(),
        json!({"name": "Support terms", "language": "en-US", "description": "Help desk acronyms"})
    );
}

#[tokio::test]
async fn test_create_custom_model_requires_name() {
    let (url, _mock) = start(vec![]).await;

    let err = client(&url)
        .customization()
        .create(&CreateCustomModelRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_list_custom_models() {
    let (url, mock) = start(vec![Canned::json(
        200,
        json!({
            "customizations": [
                {"customization_id": "a", "name": "one", "language": "en-US", "owner": "o"},
                {"customization_id": "b", "name": "two", "language": "en-US", "owner": "o"}
            ]
        }),
    )])
    .await;

    let models = client(&url)
        .customization()
        .list(Some(Language::EnUs))
        .await
        .unwrap();
    assert_eq!(models.customizations.len(), 2);
    assert_eq!(models.customizations[1].name.as_deref(), Some("two"));

    let req = mock.last();
    assert_eq!(req.path, "/v1/customizations");
    assert_eq!(req.query.as_deref(), Some("language=en-US"));
}

#[tokio::test]
async fn test_update_custom_model() {
    let (url, mock) = start(vec![Canned::empty(200)]).await;

    let request = UpdateCustomModelRequest {
        customization_id: "cust-1".to_string(),
        name: Some("Renamed".to_string()),
        description: None,
        words: vec![Word::new("IEEE", "I triple E")],
    };
    client(&url).customization().update(&request).await.unwrap();

    let req = mock.last();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/v1/customizations/cust-1");
    assert_eq!(
        req.json(),
        json!({"name": "Renamed", "words": [{"word": "IEEE", "translation": "I triple E"}]})
    );
}

#[tokio::test]
async fn test_get_custom_model() {
    let (url, mock) = start(vec![Canned::json(
        200,
        json!({
            "customization_id": "cust-1",
            "name": "Support",
            "words": [{"word": "ACLs", "translation": "ackles"}],
            "prompts": [{"prompt": "Hello", "prompt_id": "greeting", "status": "available"}]
        }),
    )])
    .await;

    let model = client(&url).customization().get("cust-1").await.unwrap();
    assert_eq!(model.words, vec![Word::new("ACLs", "ackles")]);
    assert_eq!(model.prompts[0].parsed_status(), Some(PromptStatus::Available));

    let req = mock.last();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/v1/customizations/cust-1");
}

#[tokio::test]
async fn test_delete_custom_model() {
    let (url, mock) = start(vec![Canned::empty(204)]).await;

    client(&url).customization().delete("cust-1").await.unwrap();

    let req = mock.last();
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(req.path, "/v1/customizations/cust-1");
    assert_eq!(req.header("accept"), None);
}

#[tokio::test]
async fn test_delete_custom_model_requires_id() {
    let (url, mock) = start(vec![]).await;

    let err = client(&url).customization().delete("").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(mock.requests().is_empty());
}

// ==================== Custom Words ====================

#[tokio::test]
async fn test_add_words() {
    let (url, mock) = start(vec![Canned::empty(200)]).await;

    let words = vec![
        Word::new("NCAA", "N C double A"),
        Word {
            word: "東京".to_string(),
            translation: "とうきょう".to_string(),
            part_of_speech: Some(PartOfSpeech::Koyu),
        },
    ];
    client(&url)
        .customization()
        .add_words("cust-1", &words)
        .await
        .unwrap();

    let req = mock.last();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/v1/customizations/cust-1/words");
    assert_eq!(
        req.json(),
        json!({"words": [
            {"word": "NCAA", "translation": "N C double A"},
            {"word": "東京", "translation": "とうきょう", "part_of_speech": "Koyu"}
        ]})
    );
}

#[tokio::test]
async fn test_add_words_requires_words() {
    let (url, _mock) = start(vec![]).await;

    let err = client(&url)
        .customization()
        .add_words("cust-1", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_list_words() {
    let (url, mock) = start(vec![Canned::json(
        200,
        json!({"words": [{"word": "IEEE", "translation": "I triple E"}]}),
    )])
    .await;

    let words = client(&url).customization().list_words("cust-1").await.unwrap();
    assert_eq!(words.words, vec![Word::new("IEEE", "I triple E")]);
    assert_eq!(mock.last().path, "/v1/customizations/cust-1/words");
}

#[tokio::test]
async fn test_add_word() {
    let (url, mock) = start(vec![Canned::empty(200)]).await;

    let request = AddWordRequest {
        customization_id: "cust-1".to_string(),
        word: "hello world".to_string(),
        translation: "hullo wurld".to_string(),
        part_of_speech: None,
    };
    client(&url).customization().add_word(&request).await.unwrap();

    let req = mock.last();
    assert_eq!(req.method, Method::PUT);
    assert_eq!(req.path, "/v1/customizations/cust-1/words/hello%20world");
    assert_eq!(req.header("accept"), None);
    assert_eq!(req.json(), json!({"translation": "hullo wurld"}));
}

#[tokio::test]
async fn test_get_word() {
    let (url, mock) = start(vec![Canned::json(
        200,
        json!({"translation": "I triple E"}),
    )])
    .await;

    let translation = client(&url)
        .customization()
        .get_word("cust-1", "IEEE")
        .await
        .unwrap();
    assert_eq!(translation.translation, "I triple E");
    assert_eq!(translation.part_of_speech, None);
    assert_eq!(mock.last().path, "/v1/customizations/cust-1/words/IEEE");
}

#[tokio::test]
async fn test_delete_word_escapes_slash() {
    let (url, mock) = start(vec![Canned::empty(204)]).await;

    client(&url)
        .customization()
        .delete_word("cust-1", "TCP/IP")
        .await
        .unwrap();

    let req = mock.last();
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(req.path, "/v1/customizations/cust-1/words/TCP%2FIP");
}

// ==================== Custom Prompts ====================

#[tokio::test]
async fn test_add_custom_prompt() {
    let (url, mock) = start(vec![Canned::json(
        201,
        json!({"prompt": "Thank you", "prompt_id": "goodbye", "status": "processing", "speaker_id": "spk-1"}),
    )])
    .await;

    let request = AddCustomPromptRequest {
        customization_id: "cust-1".to_string(),
        prompt_id: "goodbye".to_string(),
        metadata: PromptMetadata {
            prompt_text: "Thank you".to_string(),
            speaker_id: Some("spk-1".to_string()),
        },
        file: b"RIFFdataWAVE".to_vec().into(),
        filename: None,
    };
    let prompt = client(&url).prompt().add(&request).await.unwrap();
    assert_eq!(prompt.prompt_id, "goodbye");
    assert_eq!(prompt.parsed_status(), Some(PromptStatus::Processing));

    let req = mock.last();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/v1/customizations/cust-1/prompts/goodbye");
    assert!(req
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&req.body);
    assert!(body.contains(r#"name="metadata""#));
    assert!(body.contains(r#"{"prompt_text":"Thank you","speaker_id":"spk-1"}"#));
    assert!(body.contains(r#"name="file"; filename="filename""#));
    assert!(body.contains("audio/wav"));
    assert!(body.contains("RIFFdataWAVE"));
}

#[tokio::test]
async fn test_add_custom_prompt_requires_file() {
    let (url, mock) = start(vec![]).await;

    let request = AddCustomPromptRequest {
        customization_id: "cust-1".to_string(),
        prompt_id: "goodbye".to_string(),
        metadata: PromptMetadata::new("Thank you"),
        ..Default::default()
    };
    let err = client(&url).prompt().add(&request).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_list_get_delete_custom_prompts() {
    let (url, mock) = start(vec![
        Canned::json(
            200,
            json!({"prompts": [{"prompt": "Hi", "prompt_id": "hi", "status": "failed", "error": "too long"}]}),
        ),
        Canned::json(200, json!({"prompt": "Hi", "prompt_id": "hi", "status": "available"})),
        Canned::empty(204),
    ])
    .await;
    let prompts = client(&url).prompt();

    let list = prompts.list("cust-1").await.unwrap();
    assert_eq!(list.prompts[0].error.as_deref(), Some("too long"));
    assert_eq!(list.prompts[0].parsed_status(), Some(PromptStatus::Failed));

    let prompt = prompts.get("cust-1", "hi").await.unwrap();
    assert_eq!(prompt.status, "available");

    prompts.delete("cust-1", "hi").await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].path, "/v1/customizations/cust-1/prompts");
    assert_eq!(requests[1].path, "/v1/customizations/cust-1/prompts/hi");
    assert_eq!(requests[2].method, Method::DELETE);
    assert_eq!(requests[2].path, "/v1/customizations/cust-1/prompts/hi");
}

// ==================== Speaker Models ====================

#[tokio::test]
async fn test_create_speaker_model() {
    let (url, mock) = start(vec![Canned::json(201, json!({"speaker_id": "spk-1"}))]).await;

    let request = CreateSpeakerModelRequest {
        speaker_name: "Angelo".to_string(),
        audio: b"RIFFspeakerWAVE".to_vec().into(),
    };
    let model = client(&url).speaker().create(&request).await.unwrap();
    assert_eq!(model.speaker_id, "spk-1");

    let req = mock.last();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/v1/speakers");
    assert_eq!(req.query.as_deref(), Some("speaker_name=Angelo"));
    assert_eq!(req.header("content-type"), Some("audio/wav"));
    assert_eq!(req.body, b"RIFFspeakerWAVE");
}

#[tokio::test]
async fn test_list_get_delete_speaker_models() {
    let (url, mock) = start(vec![
        Canned::json(200, json!({"speakers": [{"speaker_id": "spk-1", "name": "Angelo"}]})),
        Canned::json(
            200,
            json!({"customizations": [{
                "customization_id": "cust-1",
                "prompts": [{"prompt": "Hi", "prompt_id": "hi", "status": "available"}]
            }]}),
        ),
        Canned::empty(204),
    ])
    .await;
    let speakers = client(&url).speaker();

    let list = speakers.list().await.unwrap();
    assert_eq!(list.speakers[0].name, "Angelo");

    let models = speakers.get("spk-1").await.unwrap();
    assert_eq!(models.customizations[0].customization_id, "cust-1");
    assert_eq!(
        models.customizations[0].prompts[0].parsed_status(),
        Some(PromptStatus::Available)
    );

    speakers.delete("spk-1").await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].path, "/v1/speakers");
    assert_eq!(requests[1].path, "/v1/speakers/spk-1");
    assert_eq!(requests[2].method, Method::DELETE);
    assert_eq!(requests[2].path, "/v1/speakers/spk-1");
}

// ==================== User Data ====================

#[tokio::test]
async fn test_delete_user_data() {
    let (url, mock) = start(vec![Canned::empty(200)]).await;

    client(&url).user_data().delete("customer-1").await.unwrap();

    let req = mock.last();
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(req.path, "/v1/user_data");
    assert_eq!(req.query.as_deref(), Some("customer_id=customer-1"));
    assert_eq!(
        req.header("x-ibmcloud-sdk-analytics"),
        Some("service_name=text_to_speech;service_version=V1;operation_id=DeleteUserData")
    );
}

// ==================== Errors & Retries ====================

#[tokio::test]
async fn test_api_error() {
    let (url, _mock) = start(vec![Canned::json(
        404,
        json!({"code": 404, "error": "Model cust-9 not found", "code_description": "Not Found"}),
    )
    .with_header("x-global-transaction-id", "tx-42")])
    .await;

    let err = client(&url).customization().get("cust-9").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_retryable());
    match err {
        Error::Api {
            status,
            message,
            code_description,
            transaction_id,
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Model cust-9 not found");
            assert_eq!(code_description, "Not Found");
            assert_eq!(transaction_id, "tx-42");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_response() {
    let (url, _mock) = start(vec![Canned::audio("application/json", b"not json")]).await;

    let err = client(&url).voice().list().await.unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn test_retry_on_service_unavailable() {
    let (url, mock) = start(vec![
        Canned::empty(503),
        Canned::json(429, json!({"error": "Too many requests"})),
        Canned::json(200, json!({"voices": []})),
    ])
    .await;

    let client = Client::builder()
        .service_url(&url)
        .authenticator(Arc::new(NoAuthAuthenticator))
        .enable_retries(3, Duration::from_millis(10))
        .build()
        .unwrap();

    let voices = client.voice().list().await.unwrap();
    assert!(voices.voices.is_empty());
    assert_eq!(mock.requests().len(), 3);
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let (url, mock) = start(vec![Canned::empty(503), Canned::json(200, json!({"voices": []}))]).await;

    let err = client(&url).voice().list().await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_retries_exhausted() {
    let (url, mock) = start(vec![
        Canned::empty(502),
        Canned::empty(502),
        Canned::empty(502),
    ])
    .await;

    let client = Client::builder()
        .service_url(&url)
        .authenticator(Arc::new(NoAuthAuthenticator))
        .enable_retries(2, Duration::from_millis(5))
        .build()
        .unwrap();

    let err = client.voice().list().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(mock.requests().len(), 3);
}

#[tokio::test]
async fn test_client_error_not_retried() {
    let (url, mock) = start(vec![Canned::json(400, json!({"error": "Invalid voice"}))]).await;

    let client = Client::builder()
        .service_url(&url)
        .authenticator(Arc::new(NoAuthAuthenticator))
        .enable_retries(3, Duration::from_millis(5))
        .build()
        .unwrap();

    let err = client.voice().get(&GetVoiceRequest::new("bogus")).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(mock.requests().len(), 1);
}

// ==================== Authentication ====================

#[tokio::test]
async fn test_bearer_token_auth() {
    let (url, mock) = start(vec![Canned::json(200, json!({"voices": []}))]).await;

    let client = Client::builder()
        .service_url(&url)
        .authenticator(Arc::new(BearerTokenAuthenticator::new("tok-123").unwrap()))
        .build()
        .unwrap();
    client.voice().list().await.unwrap();

    assert_eq!(mock.last().header("authorization"), Some("Bearer tok-123"));
}

#[tokio::test]
async fn test_basic_auth_and_default_headers() {
    let (url, mock) = start(vec![Canned::json(200, json!({"voices": []}))]).await;

    let client = Client::builder()
        .service_url(&url)
        .authenticator(Arc::new(BasicAuthenticator::new("user", "pass").unwrap()))
        .default_header("X-Watson-Learning-Opt-Out", "true")
        .build()
        .unwrap();
    client.voice().list().await.unwrap();

    let req = mock.last();
    assert_eq!(req.header("authorization"), Some("Basic dXNlcjpwYXNz"));
    assert_eq!(req.header("x-watson-learning-opt-out"), Some("true"));
}

#[tokio::test]
async fn test_iam_auth_caches_token() {
    let (url, mock) = start(vec![
        Canned::json(
            200,
            json!({"access_token": "iam-token", "refresh_token": "r", "token_type": "Bearer", "expires_in": 3600}),
        ),
        Canned::json(200, json!({"voices": []})),
        Canned::json(200, json!({"voices": []})),
    ])
    .await;

    let auth = IamAuthenticator::with_options("my-api-key", Some(url.clone()), false).unwrap();
    let client = Client::builder()
        .service_url(&url)
        .authenticator(Arc::new(auth))
        .build()
        .unwrap();

    client.voice().list().await.unwrap();
    client.voice().list().await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);

    let token_req = &requests[0];
    assert_eq!(token_req.method, Method::POST);
    assert_eq!(token_req.path, "/identity/token");
    let form = String::from_utf8_lossy(&token_req.body);
    assert!(form.contains("grant_type=urn%3Aibm%3Aparams%3Aoauth%3Agrant-type%3Aapikey"));
    assert!(form.contains("apikey=my-api-key"));

    assert_eq!(requests[1].header("authorization"), Some("Bearer iam-token"));
    assert_eq!(requests[2].header("authorization"), Some("Bearer iam-token"));
}

#[tokio::test]
async fn test_per_call_headers() {
    let (url, mock) = start(vec![
        Canned::audio("audio/wav", b"RIFF"),
        Canned::json(200, json!({"voices": []})),
    ])
    .await;

    let client = Client::builder()
        .service_url(&url)
        .authenticator(Arc::new(BearerTokenAuthenticator::new("tok-123").unwrap()))
        .default_header("X-Watson-Metadata", "customer_id=default")
        .build()
        .unwrap();

    client
        .synthesis()
        .with_header("X-Watson-Metadata", "customer_id=cust-7")
        .with_header("Accept", "text/plain")
        .with_header("Authorization", "Bearer other")
        .synthesize(&SynthesizeRequest::new("Tagged"))
        .await
        .unwrap();

    let req = mock.last();
    assert_eq!(req.header("x-watson-metadata"), Some("customer_id=cust-7"));
    assert_eq!(req.header("accept"), Some("audio/basic"));
    assert_eq!(req.header("authorization"), Some("Bearer tok-123"));

    // Headers stay on the handle they were added to.
    client.voice().list().await.unwrap();
    assert_eq!(mock.last().header("x-watson-metadata"), Some("customer_id=default"));
}

#[tokio::test]
async fn test_per_call_header_invalid() {
    let (url, mock) = start(vec![]).await;

    let err = client(&url)
        .voice()
        .with_header("bad header", "v")
        .list()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_iam_token_lifetime_out_of_range() {
    for expires_in in [json!(u64::MAX), json!(0)] {
        let (url, mock) = start(vec![
            Canned::json(200, json!({"access_token": "iam-token", "expires_in": expires_in.clone()})),
            Canned::json(200, json!({"voices": []})),
            Canned::json(200, json!({"voices": []})),
        ])
        .await;

        let auth = IamAuthenticator::with_options("my-api-key", Some(url.clone()), false).unwrap();
        let client = Client::builder()
            .service_url(&url)
            .authenticator(Arc::new(auth))
            .build()
            .unwrap();

        client.voice().list().await.unwrap();
        client.voice().list().await.unwrap();

        let requests = mock.requests();
        let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/identity/token", "/v1/voices", "/v1/voices"], "expires_in {}", expires_in);
        assert_eq!(requests[2].header("authorization"), Some("Bearer iam-token"));
    }
}

#[tokio::test]
async fn test_dot_segments_rejected() {
    let (url, mock) = start(vec![]).await;
    let client = client(&url);

    let err = client.customization().delete_word("cust", "..").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    let err = client.customization().delete(".").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_iam_token_failure() {
    let (url, _mock) = start(vec![Canned::json(400, json!({"errorMessage": "bad key"}))]).await;

    let auth = IamAuthenticator::with_options("my-api-key", Some(url.clone()), false).unwrap();
    let client = Client::builder()
        .service_url(&url)
        .authenticator(Arc::new(auth))
        .build()
        .unwrap();

    let err = client.voice().list().await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

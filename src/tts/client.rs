//! HTTP client for the remote speech endpoint.
//!
//! - Endpoint: `POST {endpoint}` (OpenAI-compatible `/v1/audio/speech`)
//! - Auth: `Authorization: Bearer <api key>`
//! - Body: `{"model", "input", "voice"}`
//! - Response: MP3 bytes

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::audio::SynthesizedAudio;
use super::request::SynthesisRequest;
use super::voice::{ModelMap, Voice};
use super::{SynthesisResult, Synthesizer};
use crate::error::SynthesisError;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/audio/speech";

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: Voice,
}

/// Issues one synthesis request per call. No retries.
#[derive(Debug, Clone)]
pub struct SpeechClient {
    http: reqwest::Client,
    endpoint: String,
    models: ModelMap,
}

impl SpeechClient {
    pub fn new(
        endpoint: impl Into<String>,
        models: ModelMap,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            models,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, request: &SynthesisRequest) -> reqwest::RequestBuilder {
        let body = SpeechBody {
            model: self.models.model_for(request.quality()),
            input: request.text(),
            voice: request.voice(),
        };

        self.http
            .post(&self.endpoint)
            .bearer_auth(request.credential().expose())
            .json(&body)
    }
}

#[async_trait]
impl Synthesizer for SpeechClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> SynthesisResult {
        tracing::debug!(
            voice = %request.voice(),
            quality = %request.quality(),
            chars = request.text().chars().count(),
            "Sending synthesis request"
        );

        let response = self
            .build_request(request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            tracing::warn!(status = status.as_u16(), "Speech endpoint returned an error status");
            return Err(SynthesisError::Server {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(SynthesisError::Unexpected {
                detail: format!("unexpected HTTP status {}", status),
            });
        }

        let bytes = response.bytes().await.map_err(classify_transport_error)?;
        tracing::debug!(bytes = bytes.len(), "Received audio");

        Ok(SynthesizedAudio::mpeg(bytes))
    }
}

/// Transport failures become `Network`; a request that could not even be
/// built (e.g. a key that is not a valid header value) is `Unexpected`.
fn classify_transport_error(err: reqwest::Error) -> SynthesisError {
    let detail = err.to_string();
    if err.is_builder() {
        SynthesisError::Unexpected { detail }
    } else if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
        SynthesisError::Network { detail }
    } else {
        SynthesisError::Unexpected { detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::tts::request::ApiKey;
    use crate::tts::voice::Quality;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SPEECH_PATH: &str = "/v1/audio/speech";

    fn client_for(server: &MockServer) -> SpeechClient {
        SpeechClient::new(
            format!("{}{}", server.uri(), SPEECH_PATH),
            ModelMap::default(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn request(text: &str, quality: Quality) -> SynthesisRequest {
        SynthesisRequest::new(ApiKey::new("sk-test"), text, Voice::Nova, quality, 4096).unwrap()
    }

    #[test]
    fn test_request_building() {
        let client =
            SpeechClient::new(DEFAULT_ENDPOINT, ModelMap::default(), Duration::from_secs(1))
                .unwrap();
        let built = client
            .build_request(&request("Hello world", Quality::Hd))
            .build()
            .unwrap();

        assert_eq!(built.url().as_str(), DEFAULT_ENDPOINT);
        assert_eq!(built.headers().get("authorization").unwrap(), "Bearer sk-test");
        assert!(built.headers().get("authorization").unwrap().is_sensitive());
        assert_eq!(built.headers().get("content-type").unwrap(), "application/json");

        let body: serde_json::Value =
            serde_json::from_slice(built.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"model": "tts-1-hd", "input": "Hello world", "voice": "nova"})
        );
    }

    #[tokio::test]
    async fn test_success_returns_body_bytes() {
        let server = MockServer::start().await;
        let audio = b"\xff\xfb\x90\x64fake-mp3-frames".to_vec();

        Mock::given(method("POST"))
            .and(path(SPEECH_PATH))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "model": "tts-1",
                "input": "Hello there",
                "voice": "nova"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .synthesize(&request("Hello there", Quality::Standard))
            .await
            .unwrap();

        assert_eq!(&result.bytes[..], &audio[..]);
        assert_eq!(result.mime_type, "audio/mpeg");
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_or_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": {"message": "Incorrect API key provided"}})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .synthesize(&request("Hello", Quality::Standard))
            .await
            .unwrap_err();

        assert_eq!(err, SynthesisError::Server { status: 401 });
        assert_eq!(err.kind(), FailureKind::AuthOrServerError);
        assert_eq!(
            err.to_string(),
            "Failed to generate due to a server error. Please check your API key and try again."
        );
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .synthesize(&request("Hello", Quality::Standard))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::AuthOrServerError);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing is listening on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = SpeechClient::new(
            format!("http://127.0.0.1:{}{}", port, SPEECH_PATH),
            ModelMap::default(),
            Duration::from_secs(5),
        )
        .unwrap();

        let err = client
            .synthesize(&request("Hello", Quality::Standard))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::NetworkError);
        assert_eq!(
            err.to_string(),
            "Failed to generate due to a network error. Please check your connection and try again."
        );
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = SpeechClient::new(
            format!("{}{}", server.uri(), SPEECH_PATH),
            ModelMap::default(),
            Duration::from_millis(200),
        )
        .unwrap();

        let err = client
            .synthesize(&request("Hello", Quality::Standard))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::NetworkError);
    }

    #[tokio::test]
    async fn test_invalid_header_key_is_unexpected() {
        let server = MockServer::start().await;
        let request = SynthesisRequest::new(
            ApiKey::new("sk-bad\nkey"),
            "Hello",
            Voice::Alloy,
            Quality::Standard,
            4096,
        )
        .unwrap();

        let err = client_for(&server).synthesize(&request).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::UnexpectedError);
        assert!(!err.detail().contains("sk-bad"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_identical_calls_yield_identical_audio() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\xff\xfbsame".to_vec()))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let first = client.synthesize(&request("Same text", Quality::Hd)).await;
        let second = client.synthesize(&request("Same text", Quality::Hd)).await;
        assert_eq!(first, second);
        assert!(first.is_ok());
    }
}

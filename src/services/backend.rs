use crate::error::ApiError;
use crate::models::{
    AuthUrlResponse, CapturedImage, CreatePlaylistRequest, GenerateSongsRequest,
    PlaylistConfirmation, Song, SongBatch, Token, TokenResponse,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Remote emotion inference from a still frame.
#[async_trait]
pub trait EmotionDetector: Send + Sync {
    /// Returns the raw label reported by the service.
    async fn detect_emotion(&self, image: &CapturedImage) -> Result<String, ApiError>;
}

#[async_trait]
pub trait SongGenerator: Send + Sync {
    async fn generate_songs(
        &self,
        token: &Token,
        request: &GenerateSongsRequest,
    ) -> Result<Vec<Song>, ApiError>;
}

#[async_trait]
pub trait PlaylistCreator: Send + Sync {
    async fn create_playlist(
        &self,
        token: &Token,
        request: &CreatePlaylistRequest,
    ) -> Result<PlaylistConfirmation, ApiError>;
}

/// OAuth authorization-code flow against the music service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authorize_url(&self) -> Result<String, ApiError>;

    async fn exchange_code(&self, code: &str) -> Result<Token, ApiError>;
}

#[derive(Debug, Deserialize)]
struct EmotionResponse {
    emotion: Option<String>,
}

/// HTTP client for the playlist backend. One instance serves all four
/// remote interfaces.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a request and decode the JSON body. An `error` field in the body
    /// wins over the status code; a non-2xx status without one is a
    /// [`ApiError::Status`].
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;

        tracing::debug!(
            "Backend response {}: {}",
            status,
            body.chars().take(500).collect::<String>()
        );

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                return Err(ApiError::InvalidResponse(format!(
                    "Failed to parse response: {}",
                    e
                )))
            }
            Err(_) => Value::Null,
        };

        if let Some(error) = value.get("error").and_then(error_text) {
            return Err(ApiError::Upstream(error));
        }

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_value(value)
            .map_err(|e| ApiError::InvalidResponse(format!("Unexpected response shape: {}", e)))
    }
}

fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl EmotionDetector for BackendClient {
    async fn detect_emotion(&self, image: &CapturedImage) -> Result<String, ApiError> {
        tracing::debug!(
            "Detecting emotion for capture #{} ({} bytes)",
            image.seq,
            image.frame.data.len()
        );

        let response: EmotionResponse = self
            .send(
                self.client
                    .post(self.url("detect-emotion"))
                    .json(&json!({ "image": image.to_data_url() })),
            )
            .await?;

        response
            .emotion
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("Response carried no emotion".to_string()))
    }
}

#[async_trait]
impl SongGenerator for BackendClient {
    async fn generate_songs(
        &self,
        token: &Token,
        request: &GenerateSongsRequest,
    ) -> Result<Vec<Song>, ApiError> {
        tracing::debug!("Requesting songs: {:?}", request);

        let batch: SongBatch = self
            .send(
                self.client
                    .post(self.url("generate-songs"))
                    .bearer_auth(token.value())
                    .json(request),
            )
            .await?;

        tracing::debug!("Backend returned {} songs", batch.songs.len());
        Ok(batch.songs)
    }
}

#[async_trait]
impl PlaylistCreator for BackendClient {
    async fn create_playlist(
        &self,
        token: &Token,
        request: &CreatePlaylistRequest,
    ) -> Result<PlaylistConfirmation, ApiError> {
        tracing::debug!(
            "Creating playlist '{}' with {} songs",
            request.name,
            request.songs.len()
        );

        self.send(
            self.client
                .post(self.url("create-playlist"))
                .bearer_auth(token.value())
                .json(request),
        )
        .await
    }
}

#[async_trait]
impl IdentityProvider for BackendClient {
    async fn authorize_url(&self) -> Result<String, ApiError> {
        let response: AuthUrlResponse = self.send(self.client.get(self.url("auth/spotify"))).await?;
        Ok(response.auth_url)
    }

    async fn exchange_code(&self, code: &str) -> Result<Token, ApiError> {
        let response: TokenResponse = self
            .send(
                self.client
                    .post(self.url("auth/callback"))
                    .json(&json!({ "code": code })),
            )
            .await?;

        response
            .access_token
            .filter(|t| !t.is_empty())
            .map(Token::new)
            .ok_or_else(|| ApiError::InvalidResponse("No access token received".to_string()))
    }
}

use serde::Serialize;

/// Failures of a single call to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not logged in")]
    AuthMissing,

    #[error("Login failed: {0}")]
    LoginFailed(#[source] ApiError),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Emotion detection failed: {0}")]
    DetectionFailed(#[source] ApiError),

    #[error("Playlist generation failed: {0}")]
    GenerationFailed(#[source] ApiError),

    #[error("Playlist save failed: {0}")]
    SaveFailed(#[source] ApiError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Another request is still in progress")]
    Busy,

    #[error("Result discarded, the flow was left before it arrived")]
    Abandoned,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`AppError`], used by the error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthMissing,
    LoginFailed,
    CaptureFailed,
    DetectionFailed,
    GenerationFailed,
    SaveFailed,
    ValidationFailed,
    Busy,
    Abandoned,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::AuthMissing => ErrorKind::AuthMissing,
            AppError::LoginFailed(_) => ErrorKind::LoginFailed,
            AppError::CaptureFailed(_) => ErrorKind::CaptureFailed,
            AppError::DetectionFailed(_) => ErrorKind::DetectionFailed,
            AppError::GenerationFailed(_) => ErrorKind::GenerationFailed,
            AppError::SaveFailed(_) => ErrorKind::SaveFailed,
            AppError::Validation(_) => ErrorKind::ValidationFailed,
            AppError::Busy => ErrorKind::Busy,
            AppError::Abandoned => ErrorKind::Abandoned,
            AppError::Storage(_) | AppError::Serialization(_) | AppError::Config(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// The message shown to the user. Upstream detail is logged here and
    /// never leaks into the text.
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthMissing => "Please log in with Spotify to continue.".to_string(),
            AppError::LoginFailed(ref e) => {
                tracing::warn!("Login error: {}", e);
                "Authentication with Spotify failed. Please try again.".to_string()
            }
            AppError::CaptureFailed(ref reason) => {
                tracing::warn!("Capture error: {}", reason);
                "No image captured. Please try again.".to_string()
            }
            AppError::DetectionFailed(ref e) => {
                tracing::warn!("Detection error: {}", e);
                "Error detecting emotion. Please try selecting manually.".to_string()
            }
            AppError::GenerationFailed(ref e) => {
                tracing::warn!("Generation error: {}", e);
                "Failed to generate playlist. Please try again.".to_string()
            }
            AppError::SaveFailed(ref e) => {
                tracing::warn!("Save error: {}", e);
                "Failed to create playlist. Please try again.".to_string()
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::Busy => "Please wait for the current request to finish.".to_string(),
            AppError::Abandoned => "That request is no longer relevant.".to_string(),
            AppError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                "Could not access local storage.".to_string()
            }
            AppError::Serialization(ref e) => {
                tracing::error!("Serialization error: {:?}", e);
                "Something went wrong. Please try again.".to_string()
            }
            AppError::Config(msg) => msg.clone(),
        }
    }

    /// Errors that must never reach the error channel.
    pub fn is_silent(&self) -> bool {
        matches!(self, AppError::Busy | AppError::Abandoned)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

use crate::models::Frame;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("Camera unavailable: {0}")]
    Unavailable(String),
}

/// A device that can hand out single still frames.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Make the device ready for display. Opening an open device is a no-op.
    async fn open(&self) -> Result<(), CameraError>;

    /// Grab one frame; `None` when the device produced nothing.
    async fn snapshot(&self) -> Option<Frame>;

    async fn close(&self);
}

/// Camera for headless use: every snapshot is the contents of an image file.
#[derive(Debug, Clone)]
pub struct FileCamera {
    path: Option<PathBuf>,
}

impl FileCamera {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CameraDevice for FileCamera {
    async fn open(&self) -> Result<(), CameraError> {
        match &self.path {
            Some(path) => {
                tracing::debug!("Camera reading snapshots from {}", path.display());
                Ok(())
            }
            None => Err(CameraError::Unavailable(
                "CAMERA_SNAPSHOT_PATH is not set".to_string(),
            )),
        }
    }

    async fn snapshot(&self) -> Option<Frame> {
        let path = self.path.as_ref()?;
        match tokio::fs::read(path).await {
            Ok(data) if !data.is_empty() => Some(Frame {
                data: Bytes::from(data),
                mime_type: mime_guess::from_path(path)
                    .first_or_octet_stream()
                    .to_string(),
            }),
            Ok(_) => {
                tracing::warn!("Snapshot file {} is empty", path.display());
                None
            }
            Err(e) => {
                tracing::warn!("Failed to read snapshot {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn close(&self) {}
}

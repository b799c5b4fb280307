use crate::error::{AppError, Result};
use crate::models::CapturedImage;
use crate::services::camera::CameraDevice;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Armed,
    Capturing,
    Captured(CapturedImage),
    /// The device returned nothing; it stays open so the user can try again.
    CaptureFailed,
}

impl CaptureState {
    pub fn name(&self) -> &'static str {
        match self {
            CaptureState::Idle => "idle",
            CaptureState::Armed => "armed",
            CaptureState::Capturing => "capturing",
            CaptureState::Captured(_) => "captured",
            CaptureState::CaptureFailed => "capture_failed",
        }
    }

    fn camera_open(&self) -> bool {
        matches!(
            self,
            CaptureState::Armed | CaptureState::Capturing | CaptureState::CaptureFailed
        )
    }
}

struct Inner {
    state: CaptureState,
    /// Bumped on every capture attempt and every discard, so a frame or
    /// detection result can tell whether it still belongs to the flow.
    seq: u64,
    /// Ticket of an `arm` whose device open has not returned yet.
    opening: Option<u64>,
}

pub struct CaptureController {
    device: Arc<dyn CameraDevice>,
    inner: Mutex<Inner>,
}

impl CaptureController {
    pub fn new(device: Arc<dyn CameraDevice>) -> Self {
        Self {
            device,
            inner: Mutex::new(Inner {
                state: CaptureState::Idle,
                seq: 0,
                opening: None,
            }),
        }
    }

    pub async fn state(&self) -> CaptureState {
        self.inner.lock().await.state.clone()
    }

    /// Idle/CaptureFailed → Armed.
    ///
    /// The device is opened without holding the lock. A cancel or reset while
    /// it opens wins: the late open is closed again and `Abandoned` returned.
    pub async fn arm(&self) -> Result<()> {
        let ticket = {
            let mut inner = self.inner.lock().await;
            if inner.opening.is_some() {
                tracing::debug!("Ignoring arm while the camera is opening");
                return Ok(());
            }
            match inner.state {
                CaptureState::Idle | CaptureState::CaptureFailed => {}
                CaptureState::Armed => return Ok(()),
                ref other => {
                    tracing::debug!("Ignoring arm while {}", other.name());
                    return Ok(());
                }
            }
            inner.seq += 1;
            inner.opening = Some(inner.seq);
            inner.seq
        };

        let opened = self.device.open().await;

        let mut inner = self.inner.lock().await;
        if inner.opening != Some(ticket) {
            drop(inner);
            tracing::debug!("Camera open #{} finished after cancel", ticket);
            if opened.is_ok() {
                self.device.close().await;
            }
            return Err(AppError::Abandoned);
        }
        inner.opening = None;

        opened.map_err(|e| AppError::CaptureFailed(e.to_string()))?;
        inner.state = CaptureState::Armed;
        tracing::info!("Camera armed");
        Ok(())
    }

    /// Armed/CaptureFailed → Capturing → Captured | CaptureFailed.
    ///
    /// Returns `Ok(None)` when the call is ignored because no capture is
    /// allowed right now (including a duplicate call while one is in flight).
    pub async fn capture(&self) -> Result<Option<CapturedImage>> {
        let ticket = {
            let mut inner = self.inner.lock().await;
            match inner.state {
                CaptureState::Armed | CaptureState::CaptureFailed => {}
                ref other => {
                    tracing::debug!("Ignoring capture while {}", other.name());
                    return Ok(None);
                }
            }
            inner.seq += 1;
            inner.state = CaptureState::Capturing;
            inner.seq
        };

        let frame = self.device.snapshot().await;

        let mut inner = self.inner.lock().await;
        if inner.seq != ticket || inner.state != CaptureState::Capturing {
            tracing::debug!("Discarding frame for abandoned capture #{}", ticket);
            return Err(AppError::Abandoned);
        }

        match frame {
            Some(frame) if !frame.data.is_empty() => {
                let image = CapturedImage { seq: ticket, frame };
                inner.state = CaptureState::Captured(image.clone());
                tracing::info!("Captured frame #{} ({} bytes)", ticket, image.frame.data.len());
                Ok(Some(image))
            }
            _ => {
                inner.state = CaptureState::CaptureFailed;
                Err(AppError::CaptureFailed("device returned no frame".to_string()))
            }
        }
    }

    /// Captured → Armed, discarding the image.
    pub async fn retake(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if !matches!(inner.state, CaptureState::Captured(_)) {
            return false;
        }
        inner.seq += 1;
        inner.state = CaptureState::Armed;
        tracing::info!("Retaking photo");
        true
    }

    /// Stop showing the camera without keeping a capture.
    pub async fn cancel(&self) -> bool {
        let was_open = {
            let mut inner = self.inner.lock().await;
            let was_opening = inner.opening.take().is_some();
            let was_open = inner.state.camera_open();
            if !was_open && !was_opening {
                return false;
            }
            inner.seq += 1;
            inner.state = CaptureState::Idle;
            was_open
        };

        if was_open {
            self.device.close().await;
        }
        tracing::info!("Camera cancelled");
        true
    }

    /// Leave the capture flow from any state.
    pub async fn reset(&self) {
        let was_open = {
            let mut inner = self.inner.lock().await;
            inner.opening = None;
            inner.seq += 1;
            std::mem::replace(&mut inner.state, CaptureState::Idle).camera_open()
        };

        if was_open {
            self.device.close().await;
        }
    }

    /// Whether `seq` is the capture currently on display.
    pub async fn is_current(&self, seq: u64) -> bool {
        matches!(
            &self.inner.lock().await.state,
            CaptureState::Captured(image) if image.seq == seq
        )
    }
}

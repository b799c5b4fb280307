use crate::error::{ApiError, AppError, Result};
use crate::models::{CapturedImage, Emotion, MoodRequest, MoodSource};
use crate::services::backend::EmotionDetector;
use crate::services::capture::CaptureController;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    current: Option<(MoodRequest, MoodSource)>,
    /// Bumped by every user write so a detection started earlier can tell it
    /// has been overtaken.
    revision: u64,
}

/// Folds detector results, manual picks and free-text prompts into the one
/// mood the next generation call will use.
#[derive(Default)]
pub struct EmotionResolver {
    inner: Mutex<Inner>,
}

impl EmotionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current(&self) -> Option<MoodRequest> {
        self.inner.lock().await.current.as_ref().map(|(m, _)| m.clone())
    }

    pub async fn source(&self) -> Option<MoodSource> {
        self.inner.lock().await.current.as_ref().map(|(_, s)| *s)
    }

    /// Apply the outcome of a detection request. On failure the current value
    /// is left as it is.
    pub async fn on_detection_result(
        &self,
        result: std::result::Result<String, ApiError>,
    ) -> Result<Emotion> {
        let mut inner = self.inner.lock().await;
        apply_detection(&mut inner, result)
    }

    pub async fn on_manual_select(&self, emotion: Emotion) {
        let mut inner = self.inner.lock().await;
        inner.revision += 1;
        inner.current = Some((MoodRequest::Emotion(emotion), MoodSource::Manual));
        tracing::info!("Emotion selected manually: {}", emotion);
    }

    /// Switch to free-text mode. Blank text leaves nothing selected.
    pub async fn on_free_text_prompt(&self, text: &str) {
        let mut inner = self.inner.lock().await;
        inner.revision += 1;
        let text = text.trim();
        inner.current = if text.is_empty() {
            None
        } else {
            Some((MoodRequest::Prompt(text.to_string()), MoodSource::FreeText))
        };
    }

    /// Drop the current value if the detector produced it.
    pub async fn discard_detected(&self) {
        let mut inner = self.inner.lock().await;
        if matches!(inner.current, Some((_, MoodSource::Detected))) {
            inner.current = None;
        }
    }

    /// Send `image` to the detector and apply the result, unless the capture
    /// was discarded or the user picked something while the request was out.
    pub async fn detect(
        &self,
        detector: &dyn EmotionDetector,
        capture: &CaptureController,
        image: &CapturedImage,
    ) -> Result<Emotion> {
        let started_at = self.inner.lock().await.revision;

        let result = detector.detect_emotion(image).await;

        if !capture.is_current(image.seq).await {
            tracing::debug!("Discarding detection for stale capture #{}", image.seq);
            return Err(AppError::Abandoned);
        }
        let mut inner = self.inner.lock().await;
        if inner.revision != started_at {
            tracing::debug!("Discarding detection overtaken by a manual choice");
            return Err(AppError::Abandoned);
        }

        apply_detection(&mut inner, result)
    }
}

fn apply_detection(
    inner: &mut Inner,
    result: std::result::Result<String, ApiError>,
) -> Result<Emotion> {
    let label = result.map_err(AppError::DetectionFailed)?;
    let emotion = Emotion::from_detector_label(&label).ok_or_else(|| {
        AppError::DetectionFailed(ApiError::InvalidResponse(format!(
            "Unrecognized emotion label '{}'",
            label
        )))
    })?;

    inner.current = Some((MoodRequest::Emotion(emotion), MoodSource::Detected));
    tracing::info!("Detected emotion {} (label '{}')", emotion, label);
    Ok(emotion)
}

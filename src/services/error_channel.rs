use crate::error::{AppError, ErrorKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub kind: ErrorKind,
    pub text: String,
    pub raised_at: DateTime<Utc>,
}

/// Single-slot surface for the most recent user-visible failure.
#[derive(Default)]
pub struct ErrorChannel {
    slot: RwLock<Option<ErrorMessage>>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current message with one for `err`. Busy rejections and
    /// discarded results are not user-facing failures and leave the slot alone.
    pub async fn report(&self, err: &AppError) {
        if err.is_silent() {
            tracing::debug!("Not surfacing {}", err);
            return;
        }

        let message = ErrorMessage {
            kind: err.kind(),
            text: err.user_message(),
            raised_at: Utc::now(),
        };
        tracing::info!("Surfacing error ({:?}): {}", message.kind, message.text);
        *self.slot.write().await = Some(message);
    }

    /// Called whenever a new operation begins.
    pub async fn clear(&self) {
        self.slot.write().await.take();
    }

    pub async fn current(&self) -> Option<ErrorMessage> {
        self.slot.read().await.clone()
    }
}

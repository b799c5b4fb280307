use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    Emotion, Language, MoodRequest, PlaylistConfirmation, QuickPrompt, Song, QUICK_PROMPTS,
};
use crate::services::{
    AuthService, BackendClient, CameraDevice, CaptureController, EmotionDetector, EmotionResolver,
    ErrorChannel, FileCamera, IdentityProvider, LocalStorage, PlaylistCreator, PlaylistSession,
    SongGenerator, TokenStore,
};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// The remote collaborators and the camera, injected so tests can swap them.
pub struct Collaborators {
    pub detector: Arc<dyn EmotionDetector>,
    pub generator: Arc<dyn SongGenerator>,
    pub creator: Arc<dyn PlaylistCreator>,
    pub identity: Arc<dyn IdentityProvider>,
    pub camera: Arc<dyn CameraDevice>,
}

impl Collaborators {
    /// Every remote interface backed by one HTTP client.
    pub fn backend(client: BackendClient, camera: Arc<dyn CameraDevice>) -> Self {
        let client = Arc::new(client);
        Self {
            detector: client.clone(),
            generator: client.clone(),
            creator: client.clone(),
            identity: client,
            camera,
        }
    }
}

/// Everything one browsing session needs, wired together.
pub struct AppContext {
    pub session_id: Uuid,
    pub tokens: Arc<TokenStore>,
    pub errors: Arc<ErrorChannel>,
    pub auth: AuthService,
    pub capture: CaptureController,
    pub resolver: EmotionResolver,
    pub session: PlaylistSession,
    detector: Arc<dyn EmotionDetector>,
}

impl AppContext {
    pub async fn from_config(config: &Config) -> Result<Self> {
        let client = BackendClient::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
        .map_err(|e| AppError::Config(e.to_string()))?;
        let camera = Arc::new(FileCamera::new(config.camera_snapshot_path.clone()));
        let tokens = Arc::new(TokenStore::init(LocalStorage::new(&config.storage_path)).await?);

        Ok(Self::new(
            tokens,
            Collaborators::backend(client, camera),
            config.default_language,
        ))
    }

    pub fn new(tokens: Arc<TokenStore>, collaborators: Collaborators, language: Language) -> Self {
        let errors = Arc::new(ErrorChannel::new());
        let session_id = Uuid::new_v4();
        tracing::info!("Starting session {}", session_id);

        Self {
            session_id,
            auth: AuthService::new(collaborators.identity, tokens.clone(), errors.clone()),
            capture: CaptureController::new(collaborators.camera),
            resolver: EmotionResolver::new(),
            session: PlaylistSession::new(
                tokens.clone(),
                collaborators.generator,
                collaborators.creator,
                errors.clone(),
                language,
            ),
            detector: collaborators.detector,
            tokens,
            errors,
        }
    }

    pub async fn start_camera(&self) -> Result<()> {
        self.errors.clear().await;
        if let Err(e) = self.capture.arm().await {
            self.errors.report(&e).await;
            return Err(e);
        }
        Ok(())
    }

    /// Capture a frame and run it through emotion detection.
    ///
    /// `Ok(None)` means the click was ignored (nothing to capture right now).
    pub async fn take_photo(&self) -> Result<Option<Emotion>> {
        self.errors.clear().await;

        let image = match self.capture.capture().await {
            Ok(Some(image)) => image,
            Ok(None) => return Ok(None),
            Err(e) => {
                self.errors.report(&e).await;
                return Err(e);
            }
        };

        match self
            .resolver
            .detect(self.detector.as_ref(), &self.capture, &image)
            .await
        {
            Ok(emotion) => Ok(Some(emotion)),
            Err(e) => {
                self.errors.report(&e).await;
                Err(e)
            }
        }
    }

    /// Back to the live camera; the photo and anything detected from it go.
    pub async fn retake_photo(&self) -> bool {
        self.errors.clear().await;
        let retaken = self.capture.retake().await;
        if retaken {
            self.resolver.discard_detected().await;
        }
        retaken
    }

    pub async fn cancel_camera(&self) -> bool {
        self.errors.clear().await;
        self.capture.cancel().await
    }

    pub async fn select_emotion(&self, emotion: Emotion) {
        self.errors.clear().await;
        self.resolver.on_manual_select(emotion).await;
    }

    pub async fn describe(&self, text: &str) {
        self.errors.clear().await;
        self.resolver.on_free_text_prompt(text).await;
    }

    pub async fn use_quick_prompt(&self, index: usize) -> Option<QuickPrompt> {
        let prompt = QUICK_PROMPTS.get(index).copied()?;
        self.describe(prompt.description).await;
        Some(prompt)
    }

    /// Generate from whatever mood is current. With nothing selected the
    /// session reports it as a validation failure.
    pub async fn generate(&self) -> Result<Vec<Song>> {
        let mood = self
            .resolver
            .current()
            .await
            .unwrap_or_else(|| MoodRequest::Prompt(String::new()));
        let params = self.session.request_params(mood).await;
        self.session.generate(params).await
    }

    pub async fn save(&self, name: &str) -> Result<PlaylistConfirmation> {
        self.session.save(name).await
    }

    /// Log out and drop everything tied to the old credentials.
    pub async fn logout(&self) -> Result<()> {
        self.session.abandon().await;
        self.capture.reset().await;
        self.auth.logout().await
    }

    /// The user navigated away from the playlist flow.
    pub async fn leave(&self) {
        self.session.abandon().await;
        self.capture.reset().await;
        self.resolver.discard_detected().await;
    }
}

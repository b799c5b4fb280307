use crate::error::{AppError, Result};
use crate::models::{
    first_validation_message, CreatePlaylistRequest, CuratedList, GenerateSongsRequest,
    GenerationParams, Language, MoodRequest, PlaylistConfirmation, Song,
};
use crate::services::backend::{PlaylistCreator, SongGenerator};
use crate::services::error_channel::ErrorChannel;
use crate::services::token_store::TokenStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Empty,
    Generating,
    Populated,
    /// The user has edited the batch (removed songs or named the draft).
    Curating,
    /// The last generation failed and there was no earlier batch to fall back to.
    GenerationFailed,
    Saving,
}

impl SessionPhase {
    fn in_flight(&self) -> bool {
        matches!(self, SessionPhase::Generating | SessionPhase::Saving)
    }

    fn editable(&self) -> bool {
        matches!(self, SessionPhase::Populated | SessionPhase::Curating)
    }
}

/// Consistent copy of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub songs: Vec<Song>,
    pub draft_name: String,
    pub language: Language,
    pub artist: Option<String>,
    pub confirmation: Option<PlaylistConfirmation>,
}

struct Inner {
    phase: SessionPhase,
    songs: CuratedList,
    draft_name: String,
    language: Language,
    artist: Option<String>,
    last_params: Option<GenerationParams>,
    confirmation: Option<PlaylistConfirmation>,
    /// Bumped by `abandon`; a request whose ticket no longer matches has its
    /// result dropped.
    epoch: u64,
}

/// Orchestrates generate → curate → save against the remote services.
///
/// At most one of generate/save is in flight. The lock is never held across
/// a remote call; the phase set before the call is what keeps a second
/// request out.
pub struct PlaylistSession {
    tokens: Arc<TokenStore>,
    generator: Arc<dyn SongGenerator>,
    creator: Arc<dyn PlaylistCreator>,
    errors: Arc<ErrorChannel>,
    inner: Mutex<Inner>,
}

impl PlaylistSession {
    pub fn new(
        tokens: Arc<TokenStore>,
        generator: Arc<dyn SongGenerator>,
        creator: Arc<dyn PlaylistCreator>,
        errors: Arc<ErrorChannel>,
        language: Language,
    ) -> Self {
        Self {
            tokens,
            generator,
            creator,
            errors,
            inner: Mutex::new(Inner {
                phase: SessionPhase::Empty,
                songs: CuratedList::default(),
                draft_name: String::new(),
                language,
                artist: None,
                last_params: None,
                confirmation: None,
                epoch: 0,
            }),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock().await;
        SessionSnapshot {
            phase: inner.phase,
            songs: inner.songs.songs().to_vec(),
            draft_name: inner.draft_name.clone(),
            language: inner.language,
            artist: inner.artist.clone(),
            confirmation: inner.confirmation.clone(),
        }
    }

    pub async fn phase(&self) -> SessionPhase {
        self.inner.lock().await.phase
    }

    pub async fn set_language(&self, language: Language) {
        self.inner.lock().await.language = language;
    }

    pub async fn set_artist(&self, artist: Option<String>) {
        self.inner.lock().await.artist = artist
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
    }

    /// Parameters for `mood` using the session's language and artist filter.
    pub async fn request_params(&self, mood: MoodRequest) -> GenerationParams {
        let inner = self.inner.lock().await;
        let params = GenerationParams::new(mood).language(inner.language);
        match &inner.artist {
            Some(artist) => params.artist(artist.as_str()),
            None => params,
        }
    }

    pub async fn last_params(&self) -> Option<GenerationParams> {
        self.inner.lock().await.last_params.clone()
    }

    pub async fn set_playlist_name(&self, name: &str) {
        let mut inner = self.inner.lock().await;
        inner.draft_name = name.to_string();
        if inner.phase == SessionPhase::Populated {
            inner.phase = SessionPhase::Curating;
        }
    }

    /// Replace the curated list with a freshly generated batch.
    ///
    /// The list is only touched once the call succeeds; on failure it stays
    /// exactly as it was.
    pub async fn generate(&self, params: GenerationParams) -> Result<Vec<Song>> {
        let (token, request, prior, ticket) = {
            let mut inner = self.inner.lock().await;
            if inner.phase.in_flight() {
                tracing::debug!("Rejecting generate while {:?}", inner.phase);
                return Err(AppError::Busy);
            }
            self.errors.clear().await;

            let request = GenerateSongsRequest::from(&params);
            if let Err(e) = request.validate() {
                return Err(self.fail(AppError::Validation(first_validation_message(&e))).await);
            }
            let token = match self.tokens.get_token().await {
                Ok(token) => token,
                Err(e) => return Err(self.fail(e).await),
            };

            let prior = inner.phase;
            inner.phase = SessionPhase::Generating;
            inner.last_params = Some(params.clone());
            (token, request, prior, inner.epoch)
        };

        tracing::info!("Generating playlist for {} in {}", params.mood, params.language);
        let result = self.generator.generate_songs(&token, &request).await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != ticket {
            tracing::debug!("Discarding generation result for abandoned session");
            return Err(AppError::Abandoned);
        }

        match result {
            Ok(batch) => {
                inner.songs = CuratedList::from_batch(batch);
                inner.phase = SessionPhase::Populated;
                inner.confirmation = None;
                if inner.songs.is_empty() {
                    tracing::warn!("Generation returned no playable songs");
                } else {
                    tracing::info!("Curated list populated with {} songs", inner.songs.len());
                }
                Ok(inner.songs.songs().to_vec())
            }
            Err(e) => {
                inner.phase = if inner.songs.is_empty() || !prior.editable() {
                    SessionPhase::GenerationFailed
                } else {
                    prior
                };
                drop(inner);
                Err(self.fail(AppError::GenerationFailed(e)).await)
            }
        }
    }

    /// Resend the last generation request unchanged.
    pub async fn retry_generation(&self) -> Result<Vec<Song>> {
        let params = self.inner.lock().await.last_params.clone();
        match params {
            Some(params) => self.generate(params).await,
            None => {
                let err = AppError::Validation("Nothing to retry yet".to_string());
                Err(self.fail(err).await)
            }
        }
    }

    /// Drop a song from the curated list. Returns whether anything was removed;
    /// outside Populated/Curating this never changes anything.
    pub async fn remove_song(&self, id: &str) -> bool {
        let mut inner = self.inner.lock().await;
        if !inner.phase.editable() {
            tracing::debug!("Ignoring remove of {} while {:?}", id, inner.phase);
            return false;
        }
        match inner.songs.remove(id) {
            Some(song) => {
                inner.phase = SessionPhase::Curating;
                tracing::debug!("Removed '{}' by {}", song.title, song.artist);
                true
            }
            None => false,
        }
    }

    /// Create the playlist from the curated list under `name`.
    ///
    /// Validation happens before any remote call. On success the list and
    /// draft name are cleared and the session is back to Empty; on failure
    /// the list is kept so the user can retry.
    pub async fn save(&self, name: &str) -> Result<PlaylistConfirmation> {
        let (token, request, prior, ticket) = {
            let mut inner = self.inner.lock().await;
            if inner.phase.in_flight() {
                tracing::debug!("Rejecting save while {:?}", inner.phase);
                return Err(AppError::Busy);
            }
            self.errors.clear().await;
            inner.draft_name = name.to_string();

            let request = CreatePlaylistRequest::new(name, inner.songs.play_uris());
            if let Err(e) = request.validate() {
                return Err(self.fail(AppError::Validation(first_validation_message(&e))).await);
            }
            let token = match self.tokens.get_token().await {
                Ok(token) => token,
                Err(e) => return Err(self.fail(e).await),
            };

            let prior = inner.phase;
            inner.phase = SessionPhase::Saving;
            (token, request, prior, inner.epoch)
        };

        tracing::info!(
            "Saving playlist '{}' with {} songs",
            request.name,
            request.songs.len()
        );
        let result = self.creator.create_playlist(&token, &request).await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != ticket {
            tracing::debug!("Discarding save result for abandoned session");
            return Err(AppError::Abandoned);
        }

        match result {
            Ok(confirmation) => {
                inner.songs.clear();
                inner.draft_name.clear();
                inner.phase = SessionPhase::Empty;
                inner.confirmation = Some(confirmation.clone());
                tracing::info!(
                    "Playlist '{}' created ({})",
                    request.name,
                    confirmation.external_url.as_deref().unwrap_or("no link")
                );
                Ok(confirmation)
            }
            Err(e) => {
                inner.phase = prior;
                drop(inner);
                Err(self.fail(AppError::SaveFailed(e)).await)
            }
        }
    }

    /// The user left the flow. Anything still in flight is discarded when it
    /// returns.
    pub async fn abandon(&self) {
        let mut inner = self.inner.lock().await;
        inner.epoch += 1;
        inner.phase = SessionPhase::Empty;
        inner.songs.clear();
        inner.draft_name.clear();
        inner.last_params = None;
        inner.confirmation = None;
        tracing::info!("Playlist session abandoned");
    }

    async fn fail(&self, err: AppError) -> AppError {
        self.errors.report(&err).await;
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ErrorKind};
    use crate::models::{Emotion, Token};
    use crate::services::local_storage::LocalStorage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use tempfile::TempDir;
    use tokio::sync::Notify;

    fn song(id: &str) -> Song {
        Song {
            id: id.to_string(),
            title: format!("Song {}", id),
            artist: "Artist".to_string(),
            play_uri: format!("spotify:track:{}", id),
        }
    }

    /// Generator that hands out queued responses, optionally waiting on a gate.
    #[derive(Default)]
    struct FakeGenerator {
        responses: StdMutex<Vec<std::result::Result<Vec<Song>, ApiError>>>,
        requests: StdMutex<Vec<serde_json::Value>>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl FakeGenerator {
        fn replying(responses: Vec<std::result::Result<Vec<Song>, ApiError>>) -> Self {
            Self {
                responses: StdMutex::new(responses),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl SongGenerator for FakeGenerator {
        async fn generate_songs(
            &self,
            _token: &Token,
            request: &GenerateSongsRequest,
        ) -> std::result::Result<Vec<Song>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .unwrap()
                .push(serde_json::to_value(request).unwrap());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.responses.lock().unwrap().remove(0)
        }
    }

    #[derive(Default)]
    struct FakeCreator {
        fail: bool,
        calls: AtomicUsize,
        received: StdMutex<Vec<(String, Vec<String>)>>,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl PlaylistCreator for FakeCreator {
        async fn create_playlist(
            &self,
            _token: &Token,
            request: &CreatePlaylistRequest,
        ) -> std::result::Result<PlaylistConfirmation, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.received
                .lock()
                .unwrap()
                .push((request.name.clone(), request.songs.clone()));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail {
                return Err(ApiError::Upstream("spotify down".into()));
            }
            Ok(PlaylistConfirmation {
                playlist_id: Some("pl1".into()),
                external_url: Some("https://open.spotify.com/playlist/pl1".into()),
            })
        }
    }

    struct Harness {
        _dir: TempDir,
        tokens: Arc<TokenStore>,
        errors: Arc<ErrorChannel>,
        generator: Arc<FakeGenerator>,
        creator: Arc<FakeCreator>,
        session: PlaylistSession,
    }

    async fn harness(generator: FakeGenerator, creator: FakeCreator) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let tokens = Arc::new(
            TokenStore::init(LocalStorage::new(dir.path().join("ls.json")))
                .await
                .unwrap(),
        );
        tokens.set_token(Token::new("token")).await.unwrap();
        let errors = Arc::new(ErrorChannel::new());
        let generator = Arc::new(generator);
        let creator = Arc::new(creator);
        let session = PlaylistSession::new(
            tokens.clone(),
            generator.clone(),
            creator.clone(),
            errors.clone(),
            Language::English,
        );
        Harness {
            _dir: dir,
            tokens,
            errors,
            generator,
            creator,
            session,
        }
    }

    fn happy() -> GenerationParams {
        GenerationParams::new(MoodRequest::Emotion(Emotion::Happy))
    }

    fn ids(songs: &[Song]) -> Vec<&str> {
        songs.iter().map(|s| s.id.as_str()).collect()
    }

    #[tokio::test]
    async fn generate_populates_list() {
        let h = harness(
            FakeGenerator::replying(vec![Ok(vec![song("1"), song("2"), song("3")])]),
            FakeCreator::default(),
        )
        .await;

        let songs = h.session.generate(happy()).await.unwrap();
        assert_eq!(ids(&songs), vec!["1", "2", "3"]);
        assert_eq!(h.session.phase().await, SessionPhase::Populated);
        assert_eq!(
            h.generator.requests.lock().unwrap()[0],
            serde_json::json!({"emotion": "Happy", "language": "English"})
        );
    }

    #[tokio::test]
    async fn generate_without_token_never_calls_out() {
        let h = harness(FakeGenerator::default(), FakeCreator::default()).await;
        h.tokens.clear().await.unwrap();

        let err = h.session.generate(happy()).await.unwrap_err();
        assert!(matches!(err, AppError::AuthMissing));
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.errors.current().await.unwrap().kind, ErrorKind::AuthMissing);
        assert_eq!(h.session.phase().await, SessionPhase::Empty);
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_before_remote_call() {
        let h = harness(FakeGenerator::default(), FakeCreator::default()).await;
        let params = GenerationParams::new(MoodRequest::Prompt("  ".into()));

        let err = h.session.generate(params).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            h.errors.current().await.unwrap().kind,
            ErrorKind::ValidationFailed
        );
    }

    #[tokio::test]
    async fn failed_generation_preserves_previous_list() {
        let h = harness(
            FakeGenerator::replying(vec![
                Ok(vec![song("1"), song("2"), song("3")]),
                Err(ApiError::Upstream("upstream timeout".into())),
                Ok(vec![song("9")]),
            ]),
            FakeCreator::default(),
        )
        .await;

        h.session.generate(happy()).await.unwrap();
        assert!(h.session.remove_song("2").await);
        let before = h.session.snapshot().await;

        let err = h.session.generate(happy()).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
        assert_eq!(h.session.snapshot().await, before);
        assert_eq!(before.phase, SessionPhase::Curating);

        let message = h.errors.current().await.unwrap();
        assert_eq!(message.text, "Failed to generate playlist. Please try again.");

        // Same parameters are accepted again, and success clears the message.
        let songs = h.session.retry_generation().await.unwrap();
        assert_eq!(ids(&songs), vec!["9"]);
        assert!(h.errors.current().await.is_none());
    }

    #[tokio::test]
    async fn failed_first_generation_is_generation_failed() {
        let h = harness(
            FakeGenerator::replying(vec![Err(ApiError::Transport("refused".into()))]),
            FakeCreator::default(),
        )
        .await;

        h.session.generate(happy()).await.unwrap_err();
        assert_eq!(h.session.phase().await, SessionPhase::GenerationFailed);
        assert!(!h.session.remove_song("1").await);
    }

    #[tokio::test]
    async fn concurrent_generate_is_rejected() {
        let gate = Arc::new(Notify::new());
        let generator = FakeGenerator {
            gate: Some(gate.clone()),
            ..FakeGenerator::replying(vec![
                Ok(vec![song("a1"), song("a2")]),
                Ok(vec![song("b1")]),
            ])
        };
        let h = harness(generator, FakeCreator::default()).await;

        let (first, second) = tokio::join!(h.session.generate(happy()), async {
            let second = h.session.generate(happy()).await;
            gate.notify_one();
            second
        });

        assert_eq!(ids(&first.unwrap()), vec!["a1", "a2"]);
        assert!(matches!(second, Err(AppError::Busy)));
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ids(&h.session.snapshot().await.songs), vec!["a1", "a2"]);
        assert!(h.errors.current().await.is_none());
    }

    #[tokio::test]
    async fn list_is_untouched_while_generate_is_pending() {
        let gate = Arc::new(Notify::new());
        let generator = FakeGenerator {
            gate: Some(gate.clone()),
            ..FakeGenerator::replying(vec![
                Ok(vec![song("a1"), song("a2")]),
                Ok(vec![song("b1")]),
            ])
        };
        let h = harness(generator, FakeCreator::default()).await;

        gate.notify_one();
        h.session.generate(happy()).await.unwrap();

        let (regenerated, mid_flight) = tokio::join!(h.session.generate(happy()), async {
            let snapshot = h.session.snapshot().await;
            gate.notify_one();
            snapshot
        });

        assert_eq!(mid_flight.phase, SessionPhase::Generating);
        assert_eq!(ids(&mid_flight.songs), vec!["a1", "a2"]);
        assert_eq!(ids(&regenerated.unwrap()), vec!["b1"]);
        assert_eq!(ids(&h.session.snapshot().await.songs), vec!["b1"]);
    }

    #[tokio::test]
    async fn save_is_rejected_while_generating_and_vice_versa() {
        let gate = Arc::new(Notify::new());
        let generator = FakeGenerator {
            gate: Some(gate.clone()),
            ..FakeGenerator::replying(vec![Ok(vec![song("1")])])
        };
        let h = harness(generator, FakeCreator::default()).await;

        let (_, saved) = tokio::join!(h.session.generate(happy()), async {
            let saved = h.session.save("Mix").await;
            gate.notify_one();
            saved
        });
        assert!(matches!(saved, Err(AppError::Busy)));
        assert_eq!(h.creator.calls.load(Ordering::SeqCst), 0);

        let save_gate = Arc::new(Notify::new());
        let h = harness(
            FakeGenerator::replying(vec![Ok(vec![song("1")]), Ok(vec![song("2")])]),
            FakeCreator {
                gate: Some(save_gate.clone()),
                ..Default::default()
            },
        )
        .await;
        h.session.generate(happy()).await.unwrap();

        let (saved, generated) = tokio::join!(h.session.save("Mix"), async {
            let generated = h.session.generate(happy()).await;
            save_gate.notify_one();
            generated
        });
        assert!(saved.is_ok());
        assert!(matches!(generated, Err(AppError::Busy)));
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn save_validation_never_calls_out() {
        let h = harness(
            FakeGenerator::replying(vec![Ok(vec![song("1")])]),
            FakeCreator::default(),
        )
        .await;

        // Empty list.
        let err = h.session.save("Mix").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(h.errors.current().await.unwrap().text, "Your playlist has no songs");

        // Blank name.
        h.session.generate(happy()).await.unwrap();
        let err = h.session.save("   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(h.errors.current().await.unwrap().text, "Please enter a playlist name");

        assert_eq!(h.creator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.session.snapshot().await.songs.len(), 1);
    }

    #[tokio::test]
    async fn successful_save_clears_everything() {
        let batch: Vec<Song> = (1..=7).map(|i| song(&i.to_string())).collect();
        let h = harness(
            FakeGenerator::replying(vec![Ok(batch)]),
            FakeCreator::default(),
        )
        .await;

        h.session.generate(happy()).await.unwrap();
        h.session.remove_song("4").await;
        let confirmation = h.session.save("  Monday Mix ").await.unwrap();

        assert_eq!(confirmation.playlist_id.as_deref(), Some("pl1"));
        let snapshot = h.session.snapshot().await;
        assert!(snapshot.songs.is_empty());
        assert!(snapshot.draft_name.is_empty());
        assert_eq!(snapshot.phase, SessionPhase::Empty);
        assert_eq!(snapshot.confirmation, Some(confirmation));

        let received = h.creator.received.lock().unwrap();
        assert_eq!(received[0].0, "Monday Mix");
        assert_eq!(
            received[0].1,
            vec![
                "spotify:track:1",
                "spotify:track:2",
                "spotify:track:3",
                "spotify:track:5",
                "spotify:track:6",
                "spotify:track:7"
            ]
        );
    }

    #[tokio::test]
    async fn failed_save_keeps_list_for_retry() {
        let h = harness(
            FakeGenerator::replying(vec![Ok(vec![song("1"), song("2")])]),
            FakeCreator {
                fail: true,
                ..Default::default()
            },
        )
        .await;

        h.session.generate(happy()).await.unwrap();
        let err = h.session.save("Mix").await.unwrap_err();
        assert!(matches!(err, AppError::SaveFailed(_)));

        let snapshot = h.session.snapshot().await;
        assert_eq!(snapshot.phase, SessionPhase::Populated);
        assert_eq!(ids(&snapshot.songs), vec!["1", "2"]);
        assert_eq!(snapshot.draft_name, "Mix");
        assert_eq!(
            h.errors.current().await.unwrap().text,
            "Failed to create playlist. Please try again."
        );

        // Retry goes straight to the creator, no regeneration needed.
        h.session.save("Mix").await.unwrap_err();
        assert_eq!(h.creator.calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn abandoned_generation_result_is_discarded() {
        let gate = Arc::new(Notify::new());
        let generator = FakeGenerator {
            gate: Some(gate.clone()),
            ..FakeGenerator::replying(vec![Ok(vec![song("late")])])
        };
        let h = harness(generator, FakeCreator::default()).await;

        let (result, _) = tokio::join!(h.session.generate(happy()), async {
            h.session.abandon().await;
            gate.notify_one();
        });

        assert!(matches!(result, Err(AppError::Abandoned)));
        let snapshot = h.session.snapshot().await;
        assert_eq!(snapshot.phase, SessionPhase::Empty);
        assert!(snapshot.songs.is_empty());
    }

    #[tokio::test]
    async fn remove_song_outside_curation_is_ignored() {
        let h = harness(
            FakeGenerator::replying(vec![Ok(vec![song("1"), song("1"), song("2")])]),
            FakeCreator::default(),
        )
        .await;

        assert!(!h.session.remove_song("1").await);
        h.session.generate(happy()).await.unwrap();
        assert_eq!(ids(&h.session.snapshot().await.songs), vec!["1", "2"]);
        assert!(!h.session.remove_song("missing").await);
        assert_eq!(h.session.phase().await, SessionPhase::Populated);
        assert!(h.session.remove_song("1").await);
        assert_eq!(h.session.phase().await, SessionPhase::Curating);
    }

    #[tokio::test]
    async fn request_params_use_session_settings() {
        let h = harness(FakeGenerator::default(), FakeCreator::default()).await;
        h.session.set_language(Language::Tamil).await;
        h.session.set_artist(Some("  A. R. Rahman ".into())).await;

        let params = h
            .session
            .request_params(MoodRequest::Emotion(Emotion::Romantic))
            .await;
        assert_eq!(params.language, Language::Tamil);
        assert_eq!(params.artist.as_deref(), Some("A. R. Rahman"));

        h.session.set_artist(Some("   ".into())).await;
        let params = h
            .session
            .request_params(MoodRequest::Emotion(Emotion::Romantic))
            .await;
        assert_eq!(params.artist, None);
    }
}

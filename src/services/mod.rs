pub mod auth;
pub mod backend;
pub mod camera;
pub mod capture;
pub mod emotion_resolver;
pub mod error_channel;
pub mod local_storage;
pub mod playlist_session;
pub mod token_store;

pub use auth::AuthService;
pub use backend::{BackendClient, EmotionDetector, IdentityProvider, PlaylistCreator, SongGenerator};
pub use camera::{CameraDevice, FileCamera};
pub use capture::{CaptureController, CaptureState};
pub use emotion_resolver::EmotionResolver;
pub use error_channel::{ErrorChannel, ErrorMessage};
pub use local_storage::LocalStorage;
pub use playlist_session::{PlaylistSession, SessionPhase, SessionSnapshot};
pub use token_store::TokenStore;

pub mod capture;
pub mod emotion;
pub mod playlist;
pub mod token;
pub mod track;

pub use capture::{CapturedImage, Frame};
pub use emotion::{Emotion, Language, MoodRequest, MoodSource, QuickPrompt, QUICK_PROMPTS};
pub use playlist::{
    first_validation_message, CreatePlaylistRequest, GenerateSongsRequest, GenerationParams,
    PlaylistConfirmation, SongBatch,
};
pub use token::{AuthUrlResponse, Token, TokenResponse};
pub use track::{CuratedList, Song};

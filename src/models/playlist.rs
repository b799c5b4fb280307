use super::emotion::{Language, MoodRequest};
use super::track::Song;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Parameters of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub mood: MoodRequest,
    pub language: Language,
    pub artist: Option<String>,
}

impl GenerationParams {
    pub fn new(mood: MoodRequest) -> Self {
        Self {
            mood,
            language: Language::default(),
            artist: None,
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Blank artist names are treated as no filter.
    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        let artist = artist.into();
        let trimmed = artist.trim();
        self.artist = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "validate_mood_mode"))]
pub struct GenerateSongsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

fn validate_mood_mode(req: &GenerateSongsRequest) -> Result<(), ValidationError> {
    let has_emotion = req.emotion.as_deref().is_some_and(|e| !e.trim().is_empty());
    let has_prompt = req.prompt.as_deref().is_some_and(|p| !p.trim().is_empty());
    if has_emotion == has_prompt {
        let mut err = ValidationError::new("mood_mode");
        err.message = Some("Please select an emotion or describe the playlist you want".into());
        return Err(err);
    }
    Ok(())
}

impl From<&GenerationParams> for GenerateSongsRequest {
    fn from(params: &GenerationParams) -> Self {
        let (emotion, prompt) = match &params.mood {
            MoodRequest::Emotion(e) => (Some(e.to_string()), None),
            MoodRequest::Prompt(text) => (None, Some(text.trim().to_string())),
        };
        GenerateSongsRequest {
            emotion,
            prompt,
            language: params.language.to_string(),
            artist: params.artist.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongBatch {
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreatePlaylistRequest {
    #[validate(length(min = 1, message = "Please enter a playlist name"))]
    pub name: String,
    #[validate(length(min = 1, message = "Your playlist has no songs"))]
    pub songs: Vec<String>,
}

impl CreatePlaylistRequest {
    pub fn new(name: &str, songs: Vec<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            songs,
        }
    }
}

/// What the playlist service hands back once the playlist exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistConfirmation {
    #[serde(default)]
    pub playlist_id: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
}

/// Pick one user-facing message out of a set of validation errors.
/// Fields are visited in name order so the choice is stable.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

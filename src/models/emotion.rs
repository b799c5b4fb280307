use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Happy,
    Sad,
    Energetic,
    Calm,
    Romantic,
    Melancholic,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Energetic,
        Emotion::Calm,
        Emotion::Romantic,
        Emotion::Melancholic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Energetic => "Energetic",
            Emotion::Calm => "Calm",
            Emotion::Romantic => "Romantic",
            Emotion::Melancholic => "Melancholic",
        }
    }

    /// Map a label produced by the emotion detector onto the canonical set.
    ///
    /// The detector classifies faces into seven classes; the ones that have no
    /// direct counterpart are folded into the closest listening mood.
    pub fn from_detector_label(label: &str) -> Option<Emotion> {
        if let Ok(emotion) = label.parse() {
            return Some(emotion);
        }
        match label.trim().to_ascii_lowercase().as_str() {
            "angry" | "surprise" => Some(Emotion::Energetic),
            "neutral" => Some(Emotion::Calm),
            "fear" | "disgust" => Some(Emotion::Melancholic),
            _ => None,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown emotion '{}'", wanted))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Spanish,
    Korean,
    Tamil,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Hindi,
        Language::Spanish,
        Language::Korean,
        Language::Tamil,
        Language::Telugu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Spanish => "Spanish",
            Language::Korean => "Korean",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unsupported language '{}'", wanted))
    }
}

/// What a generation call is parameterized by. The two modes never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodRequest {
    Emotion(Emotion),
    Prompt(String),
}

impl MoodRequest {
    pub fn is_blank(&self) -> bool {
        match self {
            MoodRequest::Emotion(_) => false,
            MoodRequest::Prompt(text) => text.trim().is_empty(),
        }
    }
}

impl fmt::Display for MoodRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoodRequest::Emotion(e) => write!(f, "emotion {}", e),
            MoodRequest::Prompt(text) => write!(f, "prompt \"{}\"", text),
        }
    }
}

/// Where the current mood came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodSource {
    Manual,
    Detected,
    FreeText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickPrompt {
    pub title: &'static str,
    pub description: &'static str,
}

pub const QUICK_PROMPTS: [QuickPrompt; 6] = [
    QuickPrompt {
        title: "90s Rock Hits",
        description: "Classic rock songs from the 90s with high energy and iconic guitar riffs",
    },
    QuickPrompt {
        title: "Chill Study Session",
        description: "Calm instrumental tracks perfect for studying or focused work",
    },
    QuickPrompt {
        title: "Workout Energy",
        description: "High-tempo, motivating songs to keep you energized during workouts",
    },
    QuickPrompt {
        title: "Road Trip Mix",
        description: "Fun, upbeat songs perfect for a long drive",
    },
    QuickPrompt {
        title: "Romantic Evening",
        description: "Smooth and romantic songs for a special evening",
    },
    QuickPrompt {
        title: "Party Hits",
        description: "Popular dance and party songs to get everyone moving",
    },
];

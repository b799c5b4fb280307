use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A track returned by the song-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    #[serde(rename = "name")]
    pub title: String,
    pub artist: String,
    #[serde(rename = "uri")]
    pub play_uri: String,
}

/// The user-editable batch between generation and save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CuratedList {
    songs: Vec<Song>,
}

impl CuratedList {
    /// Build a list from a generated batch, keeping the first occurrence of
    /// any repeated id.
    pub fn from_batch(batch: Vec<Song>) -> Self {
        let mut seen = HashSet::new();
        let songs = batch
            .into_iter()
            .filter(|song| seen.insert(song.id.clone()))
            .collect();
        Self { songs }
    }

    pub fn remove(&mut self, id: &str) -> Option<Song> {
        let pos = self.songs.iter().position(|s| s.id == id)?;
        Some(self.songs.remove(pos))
    }

    pub fn play_uris(&self) -> Vec<String> {
        self.songs.iter().map(|s| s.play_uri.clone()).collect()
    }

    pub fn clear(&mut self) {
        self.songs.clear();
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

//! Track and playlist types handed over by the catalog

use serde::Deserialize;

/// One playable item. Immutable once obtained from the catalog.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub cover_image_url: String,
    /// Resolved, directly playable location
    pub source_url: String,
    /// Duration in seconds, when the catalog knows it
    #[serde(default)]
    pub duration_hint: Option<f64>,
}

impl Track {
    pub fn new(id: &str, title: &str, artist: &str, source_url: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            cover_image_url: String::new(),
            source_url: source_url.to_string(),
            duration_hint: None,
        }
    }

    pub fn with_duration_hint(mut self, seconds: f64) -> Self {
        self.duration_hint = Some(seconds);
        self
    }
}

/// Ordered sequence of tracks. Insertion order defines next/previous.
pub type Playlist = Vec<Track>;

//! Track catalog collaborator
//!
//! Tracks arrive with an already resolved `source_url`; nothing here signs
//! or rewrites URLs.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Playlist, Track};

pub trait Catalog {
    fn tracks(&self) -> &[Track];

    /// Known durations keyed by source URL
    fn duration_hints(&self) -> HashMap<String, f64> {
        self.tracks()
            .iter()
            .filter_map(|t| t.duration_hint.map(|d| (t.source_url.clone(), d)))
            .collect()
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    tracks: Vec<Track>,
}

pub struct JsonCatalog {
    tracks: Playlist,
}

impl JsonCatalog {
    pub fn parse(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content).context("invalid catalog JSON")?;
        tracing::info!(tracks = file.tracks.len(), "Catalog loaded");
        Ok(Self { tracks: file.tracks })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::parse(&content)
    }

    /// Small built-in catalog used when no file is configured
    pub fn demo() -> Self {
        let tracks = [
            ("1", "Night Drive", "Aurora Lines", 214.0),
            ("2", "Glass Harbor", "Low Tide", 187.0),
            ("3", "Paper Satellites", "Aurora Lines", 242.0),
            ("4", "Quiet Engines", "Mono Atlas", 163.0),
            ("5", "Last Ferry", "Low Tide", 201.0),
        ]
        .into_iter()
        .map(|(id, title, artist, duration)| {
            let mut track = Track::new(id, title, artist, &format!("demo://tracks/{id}.mp3"))
                .with_duration_hint(duration);
            track.cover_image_url = format!("demo://covers/{id}.jpg");
            track
        })
        .collect();
        Self { tracks }
    }
}

impl Catalog for JsonCatalog {
    fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

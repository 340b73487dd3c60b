//! Model module - playback state and data types
//!
//! - `types`: transport commands and view-local UI state
//! - `track`: tracks and playlists as delivered by the catalog
//! - `context`: the playback context (what should be playing)
//! - `playback`: telemetry and the snapshot presentations render

mod types;
mod track;
mod context;
mod playback;

pub use types::{PresentationMode, TransportCommand, UiState};

pub use track::{Playlist, Track};

pub use context::{PlaybackContext, PlaybackIntent};

pub use playback::{EnginePhase, EngineSnapshot, Telemetry};

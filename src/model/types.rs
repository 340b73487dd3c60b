//! Core type definitions for the application

use std::time::Instant;

/// Write operations every presentation may forward to the engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransportCommand {
    TogglePlay,
    Next,
    Previous,
    ToggleLoop,
    /// Absolute position, 0–100
    Seek(f64),
    /// Relative position change in percentage points
    SeekBy(f64),
    /// Relative volume change
    VolumeBy(f64),
    ToggleMute,
    Stop,
}

/// Which presentation of the player is on screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresentationMode {
    #[default]
    Compact,
    Fullscreen,
}

/// View-local state. Holds no playback state.
#[derive(Clone, Debug)]
pub struct UiState {
    pub presentation: PresentationMode,
    pub filter_query: String,
    pub filter_focused: bool,
    pub library_selected: usize,
    pub show_help_popup: bool,
    pub notice: Option<String>,
    pub notice_timestamp: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            presentation: PresentationMode::Compact,
            filter_query: String::new(),
            filter_focused: false,
            library_selected: 0,
            show_help_popup: false,
            notice: None,
            notice_timestamp: None,
        }
    }
}

//! View module - UI rendering
//!
//! Both presentations render the same engine snapshot; neither owns any
//! playback state.
//!
//! - `utils`: shared helpers (status lines, scrollable lists)
//! - `layout`: top bar and library list
//! - `compact`: compact player bar
//! - `fullscreen`: fullscreen player
//! - `overlays`: notice and help popups

mod compact;
mod fullscreen;
mod layout;
mod overlays;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{EngineSnapshot, PresentationMode, Track, UiState};
use crate::session::Session;

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        snapshot: &EngineSnapshot,
        ui_state: &UiState,
        session: &Session,
        visible_tracks: &[Track],
    ) {
        let area = frame.area();
        match ui_state.presentation {
            PresentationMode::Fullscreen => {
                fullscreen::render_fullscreen_player(frame, area, snapshot);
            }
            PresentationMode::Compact => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // Filter + session
                        Constraint::Min(0),    // Library
                        Constraint::Length(3), // Compact player
                    ])
                    .split(area);

                layout::render_top_bar(frame, chunks[0], ui_state, session);

                let playing_id = snapshot.current_track.as_ref().map(|t| t.id.as_str());
                layout::render_library(frame, chunks[1], visible_tracks, ui_state, playing_id);

                compact::render_compact_player(frame, chunks[2], snapshot);
            }
        }

        if ui_state.notice.is_some() {
            overlays::render_notice(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

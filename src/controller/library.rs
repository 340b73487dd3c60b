//! Track list filtering and selection

use crate::model::{Playlist, Track};

use super::AppController;

/// Tracks whose title or artist contains `query`, in catalog order
pub fn visible_tracks(library: &[Track], query: &str) -> Playlist {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return library.to_vec();
    }
    library
        .iter()
        .filter(|t| t.title.to_lowercase().contains(&query) || t.artist.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

impl AppController {
    pub(crate) async fn library_move(&self, down: bool) {
        let mut ui = self.ui_state.lock().await;
        let count = visible_tracks(&self.library, &ui.filter_query).len();
        if count == 0 {
            ui.library_selected = 0;
            return;
        }
        ui.library_selected = if down {
            (ui.library_selected + 1).min(count - 1)
        } else {
            ui.library_selected.saturating_sub(1)
        };
    }

    /// Play the selected row with the visible list as the playlist
    pub(crate) async fn play_selected(&self) {
        let (playlist, selected) = {
            let ui = self.ui_state.lock().await;
            (visible_tracks(&self.library, &ui.filter_query), ui.library_selected)
        };
        let Some(track) = playlist.get(selected).cloned() else {
            tracing::debug!(selected, "Nothing selected to play");
            return;
        };
        self.engine.context().play_track(track, playlist, Some(selected));
    }

    pub(crate) async fn edit_filter(&self, edit: impl FnOnce(&mut String)) {
        let mut ui = self.ui_state.lock().await;
        edit(&mut ui.filter_query);
        ui.library_selected = 0;
    }
}

//! Playback context: the single source of truth for what should be playing
//!
//! The context never touches the audio resource. It only publishes intent
//! snapshots; the engine observes them and reconciles the resource.

use std::sync::Arc;
use tokio::sync::watch;

use super::track::{Playlist, Track};

/// Desired playback state, independent of the physical resource
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackIntent {
    pub current_track: Option<Track>,
    pub current_playlist: Playlist,
    /// `None` whenever there is no track or the track came without a playlist
    pub current_index: Option<usize>,
    pub is_playing: bool,
}

impl PlaybackIntent {
    pub fn source_url(&self) -> Option<&str> {
        self.current_track.as_ref().map(|t| t.source_url.as_str())
    }
}

#[derive(Clone)]
pub struct PlaybackContext {
    intent: Arc<watch::Sender<PlaybackIntent>>,
}

impl Default for PlaybackContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(PlaybackIntent::default());
        Self { intent: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackIntent> {
        self.intent.subscribe()
    }

    pub fn intent(&self) -> PlaybackIntent {
        self.intent.borrow().clone()
    }

    pub fn is_playing(&self) -> bool {
        self.intent.borrow().is_playing
    }

    /// Replace the whole intent and start playing `track`.
    ///
    /// `index` should point at `track` inside `playlist`. A mismatch is
    /// accepted as-is and only logged; next/previous then walk the playlist
    /// from `index`, not from `track`.
    pub fn play_track(&self, track: Track, playlist: Playlist, index: Option<usize>) {
        let index = index.filter(|i| *i < playlist.len());
        if let Some(i) = index {
            if playlist[i].id != track.id {
                tracing::warn!(
                    track_id = %track.id,
                    index = i,
                    indexed_id = %playlist[i].id,
                    "play_track called with a playlist index that does not match the track"
                );
            }
        }

        tracing::info!(track = %track.title, artist = %track.artist, index = ?index, playlist_len = playlist.len(), "play_track");

        self.intent.send_modify(|intent| {
            *intent = PlaybackIntent {
                current_track: Some(track),
                current_playlist: playlist,
                current_index: index,
                is_playing: true,
            };
        });
    }

    /// Advance with wraparound. Returns the new index, or `None` when there
    /// is nothing to advance through.
    pub fn play_next(&self) -> Option<usize> {
        self.step(|index, len| (index + 1) % len, "play_next")
    }

    /// Step back with wraparound. Returns the new index, or `None` when there
    /// is nothing to step through.
    pub fn play_previous(&self) -> Option<usize> {
        self.step(|index, len| if index == 0 { len - 1 } else { index - 1 }, "play_previous")
    }

    fn step(&self, next_index: impl Fn(usize, usize) -> usize, operation: &'static str) -> Option<usize> {
        let mut moved_to = None;
        self.intent.send_if_modified(|intent| {
            let len = intent.current_playlist.len();
            let Some(index) = intent.current_index.filter(|i| *i < len) else {
                return false;
            };
            let new_index = next_index(index, len);
            intent.current_track = Some(intent.current_playlist[new_index].clone());
            intent.current_index = Some(new_index);
            moved_to = Some(new_index);
            true
        });

        match moved_to {
            Some(index) => tracing::debug!(operation, index, "Playlist position changed"),
            None => tracing::warn!(operation, "Ignored: playlist is empty or index is invalid"),
        }
        moved_to
    }

    pub fn toggle_play(&self) {
        let changed = self.intent.send_if_modified(|intent| {
            if intent.current_track.is_none() {
                return false;
            }
            intent.is_playing = !intent.is_playing;
            true
        });
        if changed {
            tracing::debug!(is_playing = self.is_playing(), "Playback intent toggled");
        } else {
            tracing::debug!("toggle_play ignored: no current track");
        }
    }

    pub fn stop(&self) {
        tracing::info!("Playback context stopped");
        self.intent.send_if_modified(|intent| {
            if *intent == PlaybackIntent::default() {
                return false;
            }
            *intent = PlaybackIntent::default();
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Playlist {
        vec![
            Track::new("a", "A", "Artist", "mem://a"),
            Track::new("b", "B", "Artist", "mem://b"),
            Track::new("c", "C", "Artist", "mem://c"),
        ]
    }

    #[test]
    fn next_walks_the_playlist_and_wraps_around() {
        let context = PlaybackContext::new();
        let playlist = abc();
        context.play_track(playlist[0].clone(), playlist, Some(0));

        context.play_next();
        context.play_next();
        let intent = context.intent();
        assert_eq!(intent.current_index, Some(2));
        assert_eq!(intent.current_track.unwrap().id, "c");

        assert_eq!(context.play_next(), Some(0));
        assert_eq!(context.intent().current_track.unwrap().id, "a");
    }

    #[test]
    fn next_n_times_returns_to_start() {
        let context = PlaybackContext::new();
        let playlist = abc();
        context.play_track(playlist[1].clone(), playlist, Some(1));
        for _ in 0..3 {
            context.play_next();
        }
        assert_eq!(context.intent().current_index, Some(1));
    }

    #[test]
    fn previous_from_first_goes_to_last() {
        let context = PlaybackContext::new();
        let playlist = abc();
        context.play_track(playlist[0].clone(), playlist, Some(0));
        assert_eq!(context.play_previous(), Some(2));
        assert_eq!(context.intent().current_track.unwrap().id, "c");
    }

    #[test]
    fn stepping_preserves_paused_intent() {
        let context = PlaybackContext::new();
        let playlist = abc();
        context.play_track(playlist[0].clone(), playlist, Some(0));
        context.toggle_play();
        context.play_next();
        assert!(!context.is_playing());
    }

    #[test]
    fn next_without_playlist_is_a_noop() {
        let context = PlaybackContext::new();
        let x = Track::new("x", "X", "Artist", "mem://x");
        context.play_track(x.clone(), Vec::new(), None);

        assert_eq!(context.play_next(), None);
        assert_eq!(context.play_previous(), None);
        let intent = context.intent();
        assert_eq!(intent.current_track, Some(x));
        assert!(intent.is_playing);
    }

    #[test]
    fn toggle_without_track_does_nothing() {
        let context = PlaybackContext::new();
        context.toggle_play();
        assert!(!context.is_playing());
    }

    #[test]
    fn stop_clears_everything() {
        let context = PlaybackContext::new();
        let playlist = abc();
        context.play_track(playlist[2].clone(), playlist, Some(2));
        context.stop();
        assert_eq!(context.intent(), PlaybackIntent::default());
    }

    #[test]
    fn mismatched_index_is_accepted() {
        let context = PlaybackContext::new();
        let playlist = abc();
        context.play_track(playlist[0].clone(), playlist, Some(1));
        let intent = context.intent();
        assert_eq!(intent.current_track.unwrap().id, "a");
        assert_eq!(intent.current_index, Some(1));
        context.play_next();
        assert_eq!(context.intent().current_track.unwrap().id, "c");
    }

    #[test]
    fn observers_see_whole_updates() {
        let context = PlaybackContext::new();
        let mut rx = context.subscribe();
        let playlist = abc();
        context.play_track(playlist[1].clone(), playlist, Some(1));

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        let index = seen.current_index.unwrap();
        assert_eq!(seen.current_playlist[index], seen.current_track.unwrap());
        assert!(seen.is_playing);
    }
}

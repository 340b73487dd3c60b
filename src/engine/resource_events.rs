//! Reactions to resource lifecycle events

use crate::model::EnginePhase;
use crate::resource::ResourceEvent;

use super::PlaybackEngine;

impl PlaybackEngine {
    pub(crate) async fn handle_resource_event(&self, event: ResourceEvent) {
        match event {
            ResourceEvent::LoadStart => {
                tracing::trace!("ResourceEvent::LoadStart");
                let mut state = self.state.lock().await;
                state.pending_load_starts = state.pending_load_starts.saturating_sub(1);
                state.binding.is_loading = true;
            }
            ResourceEvent::CanPlay => {
                tracing::trace!("ResourceEvent::CanPlay");
                self.state.lock().await.binding.is_loading = false;
            }
            ResourceEvent::LoadedMetadata { duration } => {
                tracing::debug!(duration, "ResourceEvent::LoadedMetadata");
                let mut state = self.state.lock().await;
                if duration.is_finite() && duration > 0.0 {
                    state.duration = duration;
                }
                if state.phase == EnginePhase::Binding {
                    state.phase = EnginePhase::Ready;
                }
            }
            ResourceEvent::TimeUpdate { current_time } => {
                let mut state = self.state.lock().await;
                if state.awaiting_load_start() {
                    tracing::trace!(current_time, "Dropping time update from the previous source");
                } else if state.pending_seek.is_none() && state.binding.bound_source_url.is_some() {
                    // A pending seek already moved the displayed position
                    state.current_time = current_time;
                }
            }
            ResourceEvent::Ended => {
                tracing::debug!("ResourceEvent::Ended");
                self.handle_ended().await;
            }
        }
        self.publish().await;
    }

    async fn handle_ended(&self) {
        let state = self.state.lock().await;
        let is_loop = state.is_loop;
        let bound_source = state.binding.bound_source_url.clone();
        let stale = state.awaiting_load_start();
        drop(state);

        if bound_source.is_none() {
            return;
        }
        // Queued by the previous source, or the intent already moved on
        if stale || self.context.intent().source_url() != bound_source.as_deref() {
            tracing::debug!("Ignoring end of a track that is no longer bound");
            return;
        }

        if is_loop {
            tracing::debug!("Looping current track");
            self.restart_from_beginning().await;
            return;
        }

        match self.context.play_next() {
            Some(index) => {
                let next_source = self.context.intent().source_url().map(str::to_string);
                if next_source == bound_source {
                    // Single-item playlist: the intent observer will not rebind
                    tracing::debug!(index, "Auto-advance landed on the bound track, restarting it");
                    self.restart_from_beginning().await;
                } else {
                    tracing::info!(index, "Auto-advanced to next track");
                }
            }
            None => {
                tracing::debug!("Track ended with nothing to advance to");
                self.state.lock().await.phase = EnginePhase::Paused;
                if self.context.is_playing() {
                    self.context.toggle_play();
                }
            }
        }
    }

    async fn restart_from_beginning(&self) {
        {
            let mut state = self.state.lock().await;
            state.cancel_pending_seek();
            state.current_time = 0.0;
        }
        self.resource.set_current_time(0.0);
        self.issue_play(self.current_generation()).await;
    }
}

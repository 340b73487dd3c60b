//! Track binding and intent reconciliation
//!
//! Every `load` starts a new generation. Load and play completions carry the
//! generation they were issued under and are dropped when it is no longer
//! current, so a superseded track can never start playing.

use anyhow::Result;

use crate::model::{EnginePhase, PlaybackIntent, Track};

use super::{PlaybackEngine, ResourceBinding};

impl PlaybackEngine {
    /// Bring the resource in line with `intent`
    pub(crate) async fn reconcile(&self, intent: PlaybackIntent) {
        let Some(track) = intent.current_track.as_ref() else {
            self.unbind().await;
            return;
        };

        let state = self.state.lock().await;
        let same_source = state.binding.bound_source_url.as_deref() == Some(track.source_url.as_str());
        let phase = state.phase;
        drop(state);

        if !same_source {
            self.bind(track).await;
        } else {
            match (intent.is_playing, phase) {
                (true, EnginePhase::Ready | EnginePhase::Paused) => {
                    self.issue_play(self.current_generation()).await;
                }
                (false, EnginePhase::Playing) => self.pause_preserving_position().await,
                // Binding: the load completion reads the intent itself
                _ => {}
            }
        }

        self.publish().await;
    }

    async fn bind(&self, track: &Track) {
        let generation = self.invalidate_generation();
        {
            let mut state = self.state.lock().await;
            state.cancel_pending_seek();
            state.binding = ResourceBinding {
                bound_source_url: Some(track.source_url.clone()),
                is_loading: true,
            };
            state.phase = EnginePhase::Binding;
            state.pending_load_starts += 1;
            state.current_time = 0.0;
            state.duration = track.duration_hint.unwrap_or(0.0);
        }

        tracing::info!(
            generation,
            track = %track.title,
            source = %track.source_url,
            "Binding resource to track"
        );

        let load = self.resource.load(&track.source_url);
        let engine = self.clone();
        tokio::spawn(async move {
            let result = load.await;
            engine.on_load_settled(generation, result).await;
        });
    }

    async fn on_load_settled(&self, generation: u64, result: Result<()>) {
        if !self.is_current(generation) {
            tracing::debug!(generation, "Discarding stale load completion");
            return;
        }

        match result {
            Ok(()) => {
                {
                    let mut state = self.state.lock().await;
                    if state.phase == EnginePhase::Binding {
                        state.phase = EnginePhase::Ready;
                    }
                }
                if self.context.is_playing() {
                    self.issue_play(generation).await;
                }
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "Resource load rejected");
                self.state.lock().await.phase = EnginePhase::Paused;
            }
        }
        self.publish().await;
    }

    /// Issue `play()` under `generation`. Nothing is issued if a newer bind
    /// has started in the meantime.
    pub(crate) async fn issue_play(&self, generation: u64) {
        {
            let mut state = self.state.lock().await;
            if !self.is_current(generation) {
                tracing::debug!(generation, "Not issuing play for a superseded bind");
                return;
            }
            state.phase = EnginePhase::Playing;
        }

        let play = self.resource.play();
        let engine = self.clone();
        tokio::spawn(async move {
            let result = play.await;
            engine.on_play_settled(generation, result).await;
        });
    }

    pub(crate) async fn on_play_settled(&self, generation: u64, result: Result<()>) {
        if !self.is_current(generation) {
            tracing::debug!(generation, "Discarding stale play completion");
            return;
        }

        match result {
            Ok(()) => {
                if !self.context.is_playing() {
                    // Paused while play() was in flight
                    self.pause_preserving_position().await;
                }
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "Resource play rejected");
                let mut state = self.state.lock().await;
                if state.phase == EnginePhase::Playing {
                    state.phase = EnginePhase::Paused;
                }
            }
        }
        self.publish().await;
    }

    /// Pause never resets the position
    pub(crate) async fn pause_preserving_position(&self) {
        self.resource.pause();
        let position = self.resource.current_time();
        let mut state = self.state.lock().await;
        if state.pending_seek.is_none() {
            state.current_time = position;
        }
        state.phase = EnginePhase::Paused;
        tracing::debug!(position, "Paused");
    }

    async fn unbind(&self) {
        let mut state = self.state.lock().await;
        if state.binding.bound_source_url.is_none() && state.phase == EnginePhase::Idle {
            drop(state);
            self.publish().await;
            return;
        }

        self.invalidate_generation();
        state.cancel_pending_seek();
        state.binding = ResourceBinding::default();
        state.phase = EnginePhase::Idle;
        state.current_time = 0.0;
        state.duration = 0.0;
        drop(state);

        self.resource.pause();
        tracing::info!("Resource unbound");
        self.publish().await;
    }
}

//! Transport operations exposed to presentations
//!
//! None of these return errors; failures are logged and absorbed.

use crate::model::TransportCommand;

use super::PlaybackEngine;

impl PlaybackEngine {
    pub async fn dispatch(&self, command: TransportCommand) {
        tracing::debug!(?command, "Transport command");
        match command {
            TransportCommand::TogglePlay => self.toggle_play(),
            TransportCommand::Next => self.play_next(),
            TransportCommand::Previous => self.play_previous(),
            TransportCommand::ToggleLoop => self.toggle_loop().await,
            TransportCommand::Seek(percentage) => self.seek(percentage).await,
            TransportCommand::SeekBy(delta) => {
                let current = self.snapshot().telemetry.progress_percentage;
                self.seek(current + delta).await;
            }
            TransportCommand::VolumeBy(delta) => {
                let volume = self.state.lock().await.volume;
                self.set_volume(volume + delta).await;
            }
            TransportCommand::ToggleMute => self.toggle_mute().await,
            TransportCommand::Stop => self.stop(),
        }
    }

    pub fn toggle_play(&self) {
        self.context.toggle_play();
    }

    pub fn play_next(&self) {
        self.context.play_next();
    }

    pub fn play_previous(&self) {
        self.context.play_previous();
    }

    pub fn stop(&self) {
        self.context.stop();
    }

    pub async fn toggle_loop(&self) {
        let is_loop = {
            let mut state = self.state.lock().await;
            state.is_loop = !state.is_loop;
            state.is_loop
        };
        tracing::info!(is_loop, "Loop toggled");
        self.publish().await;
    }

    /// Move to `percentage` (0–100) of the track.
    ///
    /// The displayed position changes right away; the resource write waits
    /// for the debounce delay and is replaced by any later seek.
    pub async fn seek(&self, percentage: f64) {
        if !percentage.is_finite() {
            return;
        }

        let mut state = self.state.lock().await;
        if state.binding.bound_source_url.is_none() || state.duration <= 0.0 {
            tracing::debug!(percentage, "Seek ignored: duration unknown");
            return;
        }

        let target = percentage.clamp(0.0, 100.0) / 100.0 * state.duration;
        state.current_time = target;
        state.cancel_pending_seek();

        let generation = self.current_generation();
        let delay = self.config.seek_debounce;
        let engine = self.clone();
        state.pending_seek = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.commit_seek(generation, target).await;
        }));
        drop(state);

        self.publish().await;
    }

    async fn commit_seek(&self, generation: u64, target: f64) {
        let mut state = self.state.lock().await;
        // Our own handle; dropping it just detaches
        state.pending_seek = None;
        if !self.is_current(generation) {
            tracing::debug!(generation, "Dropping seek for a superseded bind");
            return;
        }
        drop(state);

        tracing::debug!(target, "Seek written to resource");
        self.resource.set_current_time(target);
    }

    pub async fn set_volume(&self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        let mut state = self.state.lock().await;
        state.volume = volume.clamp(0.0, 1.0);
        self.resource.set_volume(state.effective_volume());
        tracing::debug!(volume = state.volume, muted = state.is_muted, "Volume changed");
        drop(state);
        self.publish().await;
    }

    pub async fn toggle_mute(&self) {
        let mut state = self.state.lock().await;
        state.is_muted = !state.is_muted;
        self.resource.set_volume(state.effective_volume());
        tracing::debug!(muted = state.is_muted, "Mute toggled");
        drop(state);
        self.publish().await;
    }
}

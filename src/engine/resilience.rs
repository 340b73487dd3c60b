//! Best-effort resume after visibility, focus and fullscreen changes
//!
//! Hosts may suspend output around these transitions. While the intent says
//! playing, `play()` is re-issued; a rejection is retried once after a short
//! delay and a second rejection is accepted silently.

use crate::environment::EnvironmentEvent;
use crate::model::EnginePhase;

use super::PlaybackEngine;

const RESUME_ATTEMPTS: u32 = 2;

impl PlaybackEngine {
    pub(crate) async fn handle_environment_event(&self, event: EnvironmentEvent) {
        if !self.context.is_playing() {
            tracing::trace!(?event, "Environment change while not playing");
            return;
        }

        {
            let state = self.state.lock().await;
            if state.binding.bound_source_url.is_none() || state.phase == EnginePhase::Binding {
                return;
            }
        }

        tracing::debug!(?event, "Re-issuing play after environment change");
        let generation = self.current_generation();
        let engine = self.clone();
        tokio::spawn(async move {
            engine.resume_with_retry(generation).await;
        });
    }

    async fn resume_with_retry(&self, generation: u64) {
        for attempt in 1..=RESUME_ATTEMPTS {
            if !self.is_current(generation) || !self.context.is_playing() {
                return;
            }

            match self.resource.play().await {
                Ok(()) => {
                    if self.is_current(generation) {
                        let mut state = self.state.lock().await;
                        if state.phase == EnginePhase::Paused || state.phase == EnginePhase::Ready {
                            state.phase = EnginePhase::Playing;
                        }
                    }
                    self.on_play_settled(generation, Ok(())).await;
                    return;
                }
                Err(e) if attempt < RESUME_ATTEMPTS => {
                    tracing::warn!(attempt, error = %e, "Resume rejected, retrying");
                    tokio::time::sleep(self.config.resume_retry_delay).await;
                }
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "Resume rejected again, giving up until the next change");
                }
            }
        }
    }
}

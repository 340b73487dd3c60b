//! Playback engine - reconciles one audio resource against the playback context
//!
//! Exactly one engine exists per session. Both presentations read its
//! snapshot and forward their transport commands to it. It is organized into
//! submodules by responsibility:
//!
//! - `binding`: track binding, the generation guard and intent reconciliation
//! - `resource_events`: reactions to resource lifecycle events
//! - `transport`: seek, volume, mute, loop and forwarded context operations
//! - `resilience`: resume attempts after environment changes

mod binding;
mod resilience;
mod resource_events;
mod transport;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;

use crate::config::EngineConfig;
use crate::environment::EnvironmentEvent;
use crate::model::{EnginePhase, EngineSnapshot, PlaybackContext, Telemetry};
use crate::resource::AudioResource;

/// What the resource currently has loaded, as far as the engine knows
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ResourceBinding {
    pub bound_source_url: Option<String>,
    pub is_loading: bool,
}

pub(crate) struct EngineState {
    pub phase: EnginePhase,
    pub binding: ResourceBinding,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub is_muted: bool,
    pub is_loop: bool,
    /// Debounced resource write for the latest seek
    pub pending_seek: Option<JoinHandle<()>>,
    /// `load` calls whose `LoadStart` has not arrived yet. Events queued
    /// before it belong to the previous source.
    pub pending_load_starts: u32,
}

impl EngineState {
    fn new(volume: f64) -> Self {
        Self {
            phase: EnginePhase::Idle,
            binding: ResourceBinding::default(),
            current_time: 0.0,
            duration: 0.0,
            volume,
            is_muted: false,
            is_loop: false,
            pending_seek: None,
            pending_load_starts: 0,
        }
    }

    pub fn effective_volume(&self) -> f64 {
        if self.is_muted { 0.0 } else { self.volume }
    }

    /// Position and end events are stale until the current bind's load starts
    pub fn awaiting_load_start(&self) -> bool {
        self.phase == EnginePhase::Binding && self.pending_load_starts > 0
    }

    pub fn cancel_pending_seek(&mut self) {
        if let Some(seek) = self.pending_seek.take() {
            seek.abort();
        }
    }
}

#[derive(Clone)]
pub struct PlaybackEngine {
    pub(crate) context: PlaybackContext,
    pub(crate) resource: Arc<dyn AudioResource>,
    pub(crate) config: EngineConfig,
    pub(crate) state: Arc<Mutex<EngineState>>,
    generation: Arc<AtomicU64>,
    snapshot_tx: Arc<watch::Sender<EngineSnapshot>>,
    tasks: Arc<parking_lot::Mutex<Vec<JoinHandle<()>>>>,
}

impl PlaybackEngine {
    /// Bind the engine to `resource` and start observing the context, the
    /// resource events and the environment.
    ///
    /// Fails when another engine already took the resource's event stream.
    pub fn mount(
        context: PlaybackContext,
        resource: Arc<dyn AudioResource>,
        environment: broadcast::Receiver<EnvironmentEvent>,
        config: EngineConfig,
    ) -> Result<Self> {
        let resource_events = resource
            .take_events()
            .ok_or_else(|| anyhow!("audio resource is already bound to an engine"))?;

        let state = EngineState::new(config.initial_volume.clamp(0.0, 1.0));
        resource.set_volume(state.effective_volume());

        let (snapshot_tx, _rx) = watch::channel(EngineSnapshot {
            volume: state.volume,
            ..Default::default()
        });

        let engine = Self {
            context,
            resource,
            config,
            state: Arc::new(Mutex::new(state)),
            generation: Arc::new(AtomicU64::new(0)),
            snapshot_tx: Arc::new(snapshot_tx),
            tasks: Arc::new(parking_lot::Mutex::new(Vec::new())),
        };

        let intent_task = tokio::spawn(engine.clone().observe_intent());
        let events_task = tokio::spawn(engine.clone().observe_resource(resource_events));
        let environment_task = tokio::spawn(engine.clone().observe_environment(environment));
        engine
            .tasks
            .lock()
            .extend([intent_task, events_task, environment_task]);

        tracing::info!("Playback engine mounted");
        Ok(engine)
    }

    /// Stop listening, silence the resource and drop the binding.
    pub async fn dispose(&self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
        self.invalidate_generation();
        {
            let mut state = self.state.lock().await;
            state.cancel_pending_seek();
            state.binding = ResourceBinding::default();
            state.phase = EnginePhase::Idle;
            state.current_time = 0.0;
            state.duration = 0.0;
        }
        self.resource.pause();
        self.publish().await;
        tracing::info!("Playback engine disposed");
    }

    pub fn context(&self) -> &PlaybackContext {
        &self.context
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub(crate) fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.current_generation() == generation
    }

    /// Start a new generation; every continuation tagged with an older one
    /// becomes a no-op.
    pub(crate) fn invalidate_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Recompute telemetry and push a snapshot to every presentation
    pub(crate) async fn publish(&self) {
        let intent = self.context.intent();
        let snapshot = {
            let state = self.state.lock().await;
            EngineSnapshot {
                current_track: intent.current_track,
                telemetry: Telemetry::new(state.current_time, state.duration, state.binding.is_loading),
                is_playing: intent.is_playing,
                is_loop: state.is_loop,
                is_muted: state.is_muted,
                volume: state.volume,
                phase: state.phase,
            }
        };
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot;
            true
        });
    }

    async fn observe_intent(self) {
        let mut intent_rx = self.context.subscribe();
        let intent = intent_rx.borrow_and_update().clone();
        self.reconcile(intent).await;

        while intent_rx.changed().await.is_ok() {
            let intent = intent_rx.borrow_and_update().clone();
            self.reconcile(intent).await;
        }
        tracing::debug!("Intent observer finished");
    }

    async fn observe_resource(
        self,
        mut events: tokio::sync::mpsc::UnboundedReceiver<crate::resource::ResourceEvent>,
    ) {
        while let Some(event) = events.recv().await {
            self.handle_resource_event(event).await;
        }
        tracing::debug!("Resource event stream closed");
    }

    async fn observe_environment(self, mut environment: broadcast::Receiver<EnvironmentEvent>) {
        loop {
            match environment.recv().await {
                Ok(event) => self.handle_environment_event(event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Environment listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!("Environment listener finished");
    }
}

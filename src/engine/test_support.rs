//! Scripted resource for engine tests

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

use crate::config::EngineConfig;
use crate::environment::EnvironmentHub;
use crate::model::{PlaybackContext, Track};
use crate::resource::{AudioResource, ResourceEvent};

use super::PlaybackEngine;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Load(String),
    Play,
    Pause,
    SetTime(f64),
    SetVolume(f64),
}

pub struct FakeResource {
    calls: Mutex<Vec<Call>>,
    hold_loads: bool,
    hold_plays: bool,
    pending_loads: Mutex<Vec<(String, oneshot::Sender<Result<()>>)>>,
    pending_plays: Mutex<VecDeque<oneshot::Sender<Result<()>>>>,
    play_rejections: Mutex<u32>,
    position: Mutex<f64>,
    events_tx: mpsc::UnboundedSender<ResourceEvent>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<ResourceEvent>>>,
}

impl FakeResource {
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            calls: Mutex::new(Vec::new()),
            hold_loads: false,
            hold_plays: false,
            pending_loads: Mutex::new(Vec::new()),
            pending_plays: Mutex::new(VecDeque::new()),
            play_rejections: Mutex::new(0),
            position: Mutex::new(0.0),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        }
    }

    /// Loads stay pending until `resolve_load`
    pub fn holding_loads(mut self) -> Self {
        self.hold_loads = true;
        self
    }

    /// Plays stay pending until `resolve_play`
    pub fn holding_plays(mut self) -> Self {
        self.hold_plays = true;
        self
    }

    /// The next `count` immediate plays reject
    pub fn reject_next_plays(&self, count: u32) {
        *self.play_rejections.lock() = count;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls.lock().iter().filter(|c| *c == wanted).count()
    }

    pub fn seek_writes(&self) -> Vec<f64> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                Call::SetTime(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn last_volume(&self) -> Option<f64> {
        self.calls.lock().iter().rev().find_map(|c| match c {
            Call::SetVolume(v) => Some(*v),
            _ => None,
        })
    }

    pub fn set_position(&self, seconds: f64) {
        *self.position.lock() = seconds;
    }

    pub fn emit(&self, event: ResourceEvent) {
        let _ = self.events_tx.send(event);
    }

    pub fn resolve_load(&self, source: &str, result: Result<()>) {
        let mut pending = self.pending_loads.lock();
        let position = pending
            .iter()
            .position(|(s, _)| s == source)
            .unwrap_or_else(|| panic!("no pending load for {source}"));
        let (_, tx) = pending.remove(position);
        let _ = tx.send(result);
    }

    /// Resolve the oldest pending play
    pub fn resolve_play(&self, result: Result<()>) {
        let tx = self
            .pending_plays
            .lock()
            .pop_front()
            .expect("no pending play");
        let _ = tx.send(result);
    }

    /// Resolve the most recent pending play
    pub fn resolve_latest_play(&self, result: Result<()>) {
        let tx = self
            .pending_plays
            .lock()
            .pop_back()
            .expect("no pending play");
        let _ = tx.send(result);
    }

    pub fn pending_play_count(&self) -> usize {
        self.pending_plays.lock().len()
    }
}

fn held(rx: oneshot::Receiver<Result<()>>) -> BoxFuture<'static, Result<()>> {
    async move { rx.await.unwrap_or_else(|_| Err(anyhow!("dropped"))) }.boxed()
}

impl AudioResource for FakeResource {
    fn load(&self, source: &str) -> BoxFuture<'static, Result<()>> {
        self.calls.lock().push(Call::Load(source.to_string()));
        *self.position.lock() = 0.0;
        let _ = self.events_tx.send(ResourceEvent::LoadStart);
        if self.hold_loads {
            let (tx, rx) = oneshot::channel();
            self.pending_loads.lock().push((source.to_string(), tx));
            held(rx)
        } else {
            futures::future::ready(Ok(())).boxed()
        }
    }

    fn play(&self) -> BoxFuture<'static, Result<()>> {
        self.calls.lock().push(Call::Play);
        if self.hold_plays {
            let (tx, rx) = oneshot::channel();
            self.pending_plays.lock().push_back(tx);
            return held(rx);
        }
        let mut rejections = self.play_rejections.lock();
        if *rejections > 0 {
            *rejections -= 1;
            return futures::future::ready(Err(anyhow!("autoplay blocked"))).boxed();
        }
        futures::future::ready(Ok(())).boxed()
    }

    fn pause(&self) {
        self.calls.lock().push(Call::Pause);
    }

    fn current_time(&self) -> f64 {
        *self.position.lock()
    }

    fn set_current_time(&self, seconds: f64) {
        self.calls.lock().push(Call::SetTime(seconds));
        *self.position.lock() = seconds;
    }

    fn set_volume(&self, volume: f64) {
        self.calls.lock().push(Call::SetVolume(volume));
    }

    fn take_events(&self) -> Option<mpsc::UnboundedReceiver<ResourceEvent>> {
        self.events_rx.lock().take()
    }
}

pub struct Harness {
    pub context: PlaybackContext,
    pub resource: Arc<FakeResource>,
    pub environment: EnvironmentHub,
    pub engine: PlaybackEngine,
}

impl Harness {
    pub fn new(resource: FakeResource) -> Self {
        let context = PlaybackContext::new();
        let resource = Arc::new(resource);
        let environment = EnvironmentHub::new();
        let engine = PlaybackEngine::mount(
            context.clone(),
            resource.clone(),
            environment.subscribe(),
            EngineConfig {
                initial_volume: 0.8,
                ..Default::default()
            },
        )
        .expect("mount");
        Self {
            context,
            resource,
            environment,
            engine,
        }
    }
}

/// Let spawned tasks run until they block
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

pub fn track(id: &str) -> Track {
    Track::new(id, &id.to_uppercase(), "Tester", &format!("mem://{id}")).with_duration_hint(200.0)
}

pub fn playlist(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

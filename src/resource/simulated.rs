//! Clock-driven stand-in for a media element
//!
//! Advances its position in real time while playing and emits the same
//! lifecycle events a media element would. It produces no sound.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{AudioResource, ResourceEvent};

const DEFAULT_DURATION_SECS: f64 = 180.0;
const LOAD_LATENCY: Duration = Duration::from_millis(150);

#[derive(Default)]
struct ClockState {
    source: Option<String>,
    position: f64,
    duration: f64,
    playing: bool,
    volume: f64,
    load_seq: u64,
}

pub struct SimulatedResource {
    state: Arc<Mutex<ClockState>>,
    events_tx: mpsc::UnboundedSender<ResourceEvent>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<ResourceEvent>>>,
    durations: Arc<HashMap<String, f64>>,
    ticker: JoinHandle<()>,
}

impl SimulatedResource {
    /// `durations` maps source URLs to their length in seconds. Must be
    /// called inside a tokio runtime.
    pub fn new(durations: HashMap<String, f64>, tick: Duration) -> Self {
        let state = Arc::new(Mutex::new(ClockState {
            volume: 1.0,
            ..Default::default()
        }));
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let ticker = tokio::spawn(run_clock(state.clone(), events_tx.clone(), tick));

        Self {
            state,
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
            durations: Arc::new(durations),
            ticker,
        }
    }

    #[cfg(test)]
    pub fn volume(&self) -> f64 {
        self.state.lock().volume
    }

    fn emit(&self, event: ResourceEvent) {
        let _ = self.events_tx.send(event);
    }
}

async fn run_clock(
    state: Arc<Mutex<ClockState>>,
    events_tx: mpsc::UnboundedSender<ResourceEvent>,
    tick: Duration,
) {
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        let event = {
            let mut state = state.lock();
            if !state.playing || state.duration <= 0.0 {
                continue;
            }
            state.position += tick.as_secs_f64();
            if state.position >= state.duration {
                state.position = state.duration;
                state.playing = false;
                ResourceEvent::Ended
            } else {
                ResourceEvent::TimeUpdate { current_time: state.position }
            }
        };
        if events_tx.send(event).is_err() {
            break;
        }
    }
}

impl AudioResource for SimulatedResource {
    fn load(&self, source: &str) -> BoxFuture<'static, Result<()>> {
        let seq = {
            let mut state = self.state.lock();
            state.source = Some(source.to_string());
            state.position = 0.0;
            state.duration = 0.0;
            state.playing = false;
            state.load_seq += 1;
            state.load_seq
        };
        self.emit(ResourceEvent::LoadStart);

        let duration = self
            .durations
            .get(source)
            .copied()
            .unwrap_or(DEFAULT_DURATION_SECS);
        let state = self.state.clone();
        let events_tx = self.events_tx.clone();

        async move {
            tokio::time::sleep(LOAD_LATENCY).await;
            {
                let mut state = state.lock();
                if state.load_seq != seq {
                    tracing::trace!(seq, "Simulated load superseded");
                    return Ok(());
                }
                state.duration = duration;
            }
            let _ = events_tx.send(ResourceEvent::LoadedMetadata { duration });
            let _ = events_tx.send(ResourceEvent::CanPlay);
            Ok(())
        }
        .boxed()
    }

    fn play(&self) -> BoxFuture<'static, Result<()>> {
        let result = {
            let mut state = self.state.lock();
            if state.source.is_none() {
                Err(anyhow!("no source loaded"))
            } else {
                if state.duration > 0.0 && state.position >= state.duration {
                    state.position = 0.0;
                }
                state.playing = true;
                Ok(())
            }
        };
        future::ready(result).boxed()
    }

    fn pause(&self) {
        self.state.lock().playing = false;
    }

    fn current_time(&self) -> f64 {
        self.state.lock().position
    }

    fn set_current_time(&self, seconds: f64) {
        let current_time = {
            let mut state = self.state.lock();
            let upper = if state.duration > 0.0 { state.duration } else { f64::MAX };
            state.position = seconds.clamp(0.0, upper);
            state.position
        };
        self.emit(ResourceEvent::TimeUpdate { current_time });
    }

    fn set_volume(&self, volume: f64) {
        self.state.lock().volume = volume.clamp(0.0, 1.0);
    }

    fn take_events(&self) -> Option<mpsc::UnboundedReceiver<ResourceEvent>> {
        self.events_rx.lock().take()
    }
}

impl Drop for SimulatedResource {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> SimulatedResource {
        let mut durations = HashMap::new();
        durations.insert("mem://short".to_string(), 1.0);
        SimulatedResource::new(durations, Duration::from_millis(250))
    }

    #[tokio::test(start_paused = true)]
    async fn play_rejects_without_source() {
        let resource = resource();
        assert!(resource.play().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn load_reports_metadata_then_plays_to_the_end() {
        let resource = resource();
        let mut events = resource.take_events().unwrap();
        assert!(resource.take_events().is_none());

        resource.load("mem://short").await.unwrap();
        assert_eq!(events.recv().await, Some(ResourceEvent::LoadStart));
        assert_eq!(events.recv().await, Some(ResourceEvent::LoadedMetadata { duration: 1.0 }));
        assert_eq!(events.recv().await, Some(ResourceEvent::CanPlay));

        resource.play().await.unwrap();
        let mut saw_end = false;
        while let Some(event) = events.recv().await {
            if event == ResourceEvent::Ended {
                saw_end = true;
                break;
            }
        }
        assert!(saw_end);
        assert_eq!(resource.current_time(), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_load_does_not_report_metadata() {
        let resource = resource();
        let mut events = resource.take_events().unwrap();

        let first = resource.load("mem://first");
        let second = resource.load("mem://short");
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(events.recv().await, Some(ResourceEvent::LoadStart));
        assert_eq!(events.recv().await, Some(ResourceEvent::LoadStart));
        assert_eq!(events.recv().await, Some(ResourceEvent::LoadedMetadata { duration: 1.0 }));
    }

    #[tokio::test(start_paused = true)]
    async fn volume_is_clamped() {
        let resource = resource();
        resource.set_volume(1.7);
        assert_eq!(resource.volume(), 1.0);
    }
}

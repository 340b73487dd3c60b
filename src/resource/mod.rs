//! The opaque playable resource the engine drives
//!
//! The engine never decodes anything. It only issues `load`/`play`/`pause`,
//! reads and writes the position, sets the output volume and listens for
//! lifecycle events.

mod simulated;

pub use simulated::SimulatedResource;

use anyhow::Result;
use futures::future::BoxFuture;
use tokio::sync::mpsc;

/// Lifecycle notifications emitted by a resource
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResourceEvent {
    LoadStart,
    LoadedMetadata { duration: f64 },
    CanPlay,
    TimeUpdate { current_time: f64 },
    Ended,
}

pub trait AudioResource: Send + Sync {
    /// Start loading `source`. Settles once the resource accepted it.
    fn load(&self, source: &str) -> BoxFuture<'static, Result<()>>;

    /// Start or resume output. Rejects on autoplay policy or decode trouble.
    fn play(&self) -> BoxFuture<'static, Result<()>>;

    fn pause(&self);

    /// Position in seconds
    fn current_time(&self) -> f64;

    fn set_current_time(&self, seconds: f64);

    /// Output volume, 0.0..=1.0
    fn set_volume(&self, volume: f64);

    /// Take the event stream. Only the first call receives events.
    fn take_events(&self) -> Option<mpsc::UnboundedReceiver<ResourceEvent>>;
}

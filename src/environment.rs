//! Host environment notifications (visibility, focus, fullscreen)
//!
//! The engine receives a subscription at construction and drops it on
//! dispose, so nothing keeps listening across re-mounts.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentEvent {
    Visibility(bool),
    FocusGained,
    FocusLost,
    FullscreenChanged(bool),
}

#[derive(Clone)]
pub struct EnvironmentHub {
    tx: broadcast::Sender<EnvironmentEvent>,
}

impl Default for EnvironmentHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentHub {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EnvironmentEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: EnvironmentEvent) {
        tracing::debug!(?event, "Environment event");
        // No subscribers just means no engine is mounted
        let _ = self.tx.send(event);
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_SEEK_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_RESUME_RETRY_MS: u64 = 250;
pub const DEFAULT_VOLUME: f64 = 0.8;
pub const DEFAULT_TICK_MS: u64 = 250;

#[derive(Parser, Debug, Clone)]
#[command(name = "tunedeck", version, about = "Terminal music player")]
pub struct Args {
    /// JSON catalog of tracks; a built-in demo catalog is used when absent
    #[arg(long, env = "TUNEDECK_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Delay before a seek is written to the resource
    #[arg(long, env = "TUNEDECK_SEEK_DEBOUNCE_MS", default_value_t = DEFAULT_SEEK_DEBOUNCE_MS)]
    pub seek_debounce_ms: u64,

    /// Delay before a rejected resume is retried
    #[arg(long, env = "TUNEDECK_RESUME_RETRY_MS", default_value_t = DEFAULT_RESUME_RETRY_MS)]
    pub resume_retry_ms: u64,

    /// Initial volume, 0.0 to 1.0
    #[arg(long, env = "TUNEDECK_VOLUME", default_value_t = DEFAULT_VOLUME)]
    pub volume: f64,

    /// Position update interval of the simulated output
    #[arg(long, env = "TUNEDECK_TICK_MS", default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Override the signed-in user name
    #[arg(long, env = "TUNEDECK_USER")]
    pub user: Option<String>,
}

impl Args {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            seek_debounce: Duration::from_millis(self.seek_debounce_ms),
            resume_retry_delay: Duration::from_millis(self.resume_retry_ms),
            initial_volume: self.volume.clamp(0.0, 1.0),
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}

/// Tunables of the playback engine
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub seek_debounce: Duration,
    pub resume_retry_delay: Duration,
    pub initial_volume: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seek_debounce: Duration::from_millis(DEFAULT_SEEK_DEBOUNCE_MS),
            resume_retry_delay: Duration::from_millis(DEFAULT_RESUME_RETRY_MS),
            initial_volume: DEFAULT_VOLUME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let args = Args::parse_from(["tunedeck"]);
        assert_eq!(args.engine_config(), EngineConfig::default());
        assert!(args.catalog.is_none());
    }

    #[test]
    fn volume_is_clamped() {
        let args = Args::parse_from(["tunedeck", "--volume", "3.5", "--seek-debounce-ms", "40"]);
        let config = args.engine_config();
        assert_eq!(config.initial_volume, 1.0);
        assert_eq!(config.seek_debounce, Duration::from_millis(40));
    }
}

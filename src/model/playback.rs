//! Playback telemetry and the snapshot both presentations render from

use super::track::Track;

/// Engine lifecycle against the physical resource
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnginePhase {
    #[default]
    Idle,
    Binding,
    Ready,
    Playing,
    Paused,
}

impl EnginePhase {
    pub fn label(self) -> &'static str {
        match self {
            EnginePhase::Idle => "idle",
            EnginePhase::Binding => "loading",
            EnginePhase::Ready => "ready",
            EnginePhase::Playing => "playing",
            EnginePhase::Paused => "paused",
        }
    }
}

/// Derived resource metrics. Times are in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Telemetry {
    pub current_time: f64,
    pub duration: f64,
    pub progress_percentage: f64,
    pub is_loading: bool,
}

impl Telemetry {
    pub fn new(current_time: f64, duration: f64, is_loading: bool) -> Self {
        Self {
            current_time,
            duration,
            progress_percentage: progress_percentage(current_time, duration),
            is_loading,
        }
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.current_time)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.duration)
    }

    /// Progress as a 0.0..=1.0 ratio, for gauges
    pub fn ratio(&self) -> f64 {
        (self.progress_percentage / 100.0).clamp(0.0, 1.0)
    }
}

pub fn progress_percentage(current_time: f64, duration: f64) -> f64 {
    if duration > 0.0 && current_time.is_finite() {
        (current_time / duration * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Render seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total_seconds = seconds.floor() as u64;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Everything a presentation may read
#[derive(Clone, Debug, PartialEq)]
pub struct EngineSnapshot {
    pub current_track: Option<Track>,
    pub telemetry: Telemetry,
    pub is_playing: bool,
    pub is_loop: bool,
    pub is_muted: bool,
    pub volume: f64,
    pub phase: EnginePhase,
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            current_track: None,
            telemetry: Telemetry::default(),
            is_playing: false,
            is_loop: false,
            is_muted: false,
            volume: 1.0,
            phase: EnginePhase::Idle,
        }
    }
}

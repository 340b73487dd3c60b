//! Utility functions shared by both player presentations

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

use crate::model::{EnginePhase, EngineSnapshot};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Play-state glyph shared by both presentations
pub fn state_icon(snapshot: &EngineSnapshot) -> &'static str {
    if snapshot.telemetry.is_loading || snapshot.phase == EnginePhase::Binding {
        "…"
    } else if snapshot.is_playing {
        "▶"
    } else {
        "⏸"
    }
}

/// "▶ Title | Artist" style status
pub fn status_text(snapshot: &EngineSnapshot) -> String {
    let Some(track) = &snapshot.current_track else {
        return "No track playing".to_string();
    };
    format!("{} {} | {}", state_icon(snapshot), track.title, track.artist)
}

pub fn controls_text(snapshot: &EngineSnapshot) -> String {
    let loop_text = if snapshot.is_loop { "Loop: On" } else { "Loop: Off" };
    let volume_text = if snapshot.is_muted {
        "Vol: muted".to_string()
    } else {
        format!("Vol: {}%", (snapshot.volume * 100.0).round() as u32)
    };
    format!("{} | {}", loop_text, volume_text)
}

pub fn time_text(snapshot: &EngineSnapshot) -> String {
    format!(
        "{} / {}",
        snapshot.telemetry.elapsed_label(),
        snapshot.telemetry.duration_label()
    )
}

/// Rectangle of `width` x `height` centered inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}

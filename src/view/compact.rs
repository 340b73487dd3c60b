//! Compact player bar

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::EngineSnapshot;
use super::utils::{controls_text, status_text, time_text};

pub fn render_compact_player(frame: &mut Frame, area: Rect, snapshot: &EngineSnapshot) {
    let title = format!(" {} ", status_text(snapshot));
    let controls_info = format!(" {} ", controls_text(snapshot));

    let gauge_color = if snapshot.telemetry.is_loading {
        Color::DarkGray
    } else {
        Color::Green
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(snapshot.telemetry.ratio())
        .label(time_text(snapshot));

    frame.render_widget(gauge, area);
}

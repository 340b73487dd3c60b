//! Fullscreen player

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
    Frame,
};

use crate::model::EngineSnapshot;
use super::utils::{centered_rect, controls_text, state_icon, time_text};

const PLAYER_WIDTH: u16 = 72;
const PLAYER_HEIGHT: u16 = 14;

pub fn render_fullscreen_player(frame: &mut Frame, area: Rect, snapshot: &EngineSnapshot) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Now Playing · {} ", snapshot.phase.label()))
        .title_bottom(Line::from(" f / Esc to leave fullscreen ").centered());
    frame.render_widget(outer, area);

    let player_area = centered_rect(area, PLAYER_WIDTH, PLAYER_HEIGHT);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(2), // Artist
            Constraint::Length(2), // Cover
            Constraint::Length(3), // Progress
            Constraint::Length(2), // Time
            Constraint::Min(1),    // Controls
        ])
        .split(player_area);

    let (title, artist, cover) = match &snapshot.current_track {
        Some(track) => (
            track.title.as_str(),
            track.artist.as_str(),
            if track.cover_image_url.is_empty() {
                "no cover art"
            } else {
                track.cover_image_url.as_str()
            },
        ),
        None => ("Nothing playing", "Pick a track from the library", ""),
    };

    let title_line = Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", state_icon(snapshot)), Style::default().fg(Color::Green)),
        Span::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(title_line, chunks[0]);

    let artist_line = Paragraph::new(artist.to_string())
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(artist_line, chunks[1]);

    let cover_line = Paragraph::new(cover.to_string())
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        .alignment(Alignment::Center);
    frame.render_widget(cover_line, chunks[2]);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(snapshot.telemetry.ratio())
        .label(format!("{:.0}%", snapshot.telemetry.progress_percentage));
    frame.render_widget(progress, chunks[3]);

    let time = Paragraph::new(time_text(snapshot))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);
    frame.render_widget(time, chunks[4]);

    let controls = Paragraph::new(vec![
        Line::from(controls_text(snapshot)),
        Line::from(Span::styled(
            "Space play/pause · ←/→ prev/next · ,/. seek · +/- volume · m mute · l loop",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .style(Style::default().fg(Color::Cyan))
    .alignment(Alignment::Center);
    frame.render_widget(controls, chunks[5]);
}

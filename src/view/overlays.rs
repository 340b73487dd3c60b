//! Overlay rendering (notice, help popup)

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::UiState;
use super::utils::centered_rect;

pub fn render_notice(frame: &mut Frame, ui_state: &UiState) {
    let Some(ref notice) = ui_state.notice else {
        return;
    };
    let area = frame.area();
    let popup_width = (notice.chars().count() as u16 + 6).clamp(24, 52);
    let popup_area = centered_rect(area, popup_width, 3);

    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(notice.to_string())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Library ──"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Play selected track"),
        ("/", "Filter tracks"),
        ("Esc", "Leave filter / fullscreen"),
        ("", ""),
        ("", "── Playback ──"),
        ("Space", "Play / Pause"),
        ("→ / Ctrl+N", "Next track"),
        ("← / Ctrl+P", "Previous track"),
        (", / .", "Seek -5% / +5%"),
        ("0-9", "Jump to 0%-90%"),
        ("+ / -", "Volume up / down"),
        ("M", "Mute / Unmute"),
        ("L", "Toggle loop"),
        ("X", "Stop"),
        ("", ""),
        ("", "── General ──"),
        ("F", "Toggle fullscreen player"),
        ("Shift+O", "Sign in / out"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_height = keybindings.len() as u16 + 2;
    let popup_area = centered_rect(area, 62, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}

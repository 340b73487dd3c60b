//! Layout rendering (top bar, library list)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{Track, UiState};
use crate::session::Session;
use super::utils::{render_scrollable_list, truncate_string};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Filter input
            Constraint::Length(32), // Session
        ])
        .split(area);

    let filter_style = if ui_state.filter_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let filter_text = if ui_state.filter_query.is_empty() && !ui_state.filter_focused {
        "Press / to filter..."
    } else {
        &ui_state.filter_query
    };

    let filter = Paragraph::new(filter_text)
        .style(filter_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filter ")
                .padding(Padding::horizontal(1))
                .border_style(filter_style),
        );
    frame.render_widget(filter, chunks[0]);

    let session_text = match session.user() {
        Some(user) if session.can_edit() => {
            format!("{} ✎ since {}", user.label(), user.signed_in_label())
        }
        Some(user) => format!("{} since {}", user.label(), user.signed_in_label()),
        None => "signed out (O to sign in)".to_string(),
    };
    let session_widget = Paragraph::new(session_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Session "));
    frame.render_widget(session_widget, chunks[1]);
}

pub fn render_library(
    frame: &mut Frame,
    area: Rect,
    tracks: &[Track],
    ui_state: &UiState,
    playing_id: Option<&str>,
) {
    let title_width = (area.width as usize).saturating_sub(8) / 2;

    let items: Vec<ListItem> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_current = playing_id == Some(track.id.as_str());
            let marker = if is_current { "♪ " } else { "  " };
            let text = format!(
                "{}{} {}",
                marker,
                truncate_string(&track.title, title_width),
                track.artist
            );

            let style = if i == ui_state.library_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let title = if ui_state.filter_query.is_empty() {
        format!(" Library ({}) ", tracks.len())
    } else {
        format!(" Library ({} matching) ", tracks.len())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1));

    if items.is_empty() {
        let empty = Paragraph::new("No tracks")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    render_scrollable_list(frame, area, items, ui_state.library_selected, block);
}

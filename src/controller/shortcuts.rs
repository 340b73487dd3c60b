//! Global transport key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MediaKeyCode};

use crate::model::TransportCommand;

/// Map a key to a transport command.
///
/// Returns `None` while a text input has focus so typing never controls
/// playback.
pub fn transport_shortcut(
    key: &KeyEvent,
    text_input_focused: bool,
    is_playing: bool,
) -> Option<TransportCommand> {
    if text_input_focused {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char(' ') => Some(TransportCommand::TogglePlay),
        KeyCode::Right => Some(TransportCommand::Next),
        KeyCode::Left => Some(TransportCommand::Previous),
        KeyCode::Char('n') | KeyCode::Char('N') if ctrl => Some(TransportCommand::Next),
        KeyCode::Char('p') | KeyCode::Char('P') if ctrl => Some(TransportCommand::Previous),
        KeyCode::Media(MediaKeyCode::PlayPause) => Some(TransportCommand::TogglePlay),
        KeyCode::Media(MediaKeyCode::Play) if !is_playing => Some(TransportCommand::TogglePlay),
        KeyCode::Media(MediaKeyCode::Pause) if is_playing => Some(TransportCommand::TogglePlay),
        KeyCode::Media(MediaKeyCode::TrackNext) => Some(TransportCommand::Next),
        KeyCode::Media(MediaKeyCode::TrackPrevious) => Some(TransportCommand::Previous),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn maps_transport_keys() {
        assert_eq!(transport_shortcut(&key(KeyCode::Char(' ')), false, false), Some(TransportCommand::TogglePlay));
        assert_eq!(transport_shortcut(&key(KeyCode::Right), false, false), Some(TransportCommand::Next));
        assert_eq!(transport_shortcut(&key(KeyCode::Left), false, false), Some(TransportCommand::Previous));
        assert_eq!(transport_shortcut(&ctrl('n'), false, false), Some(TransportCommand::Next));
        assert_eq!(transport_shortcut(&ctrl('p'), false, false), Some(TransportCommand::Previous));
    }

    #[test]
    fn plain_letters_are_not_transport() {
        assert_eq!(transport_shortcut(&key(KeyCode::Char('n')), false, false), None);
        assert_eq!(transport_shortcut(&key(KeyCode::Char('p')), false, false), None);
    }

    #[test]
    fn media_keys_follow_playing_state() {
        let play = key(KeyCode::Media(MediaKeyCode::Play));
        let pause = key(KeyCode::Media(MediaKeyCode::Pause));
        assert_eq!(transport_shortcut(&play, false, false), Some(TransportCommand::TogglePlay));
        assert_eq!(transport_shortcut(&play, false, true), None);
        assert_eq!(transport_shortcut(&pause, false, true), Some(TransportCommand::TogglePlay));
        assert_eq!(transport_shortcut(&pause, false, false), None);
        assert_eq!(
            transport_shortcut(&key(KeyCode::Media(MediaKeyCode::TrackNext)), false, true),
            Some(TransportCommand::Next)
        );
    }

    #[test]
    fn ignored_while_typing() {
        assert_eq!(transport_shortcut(&key(KeyCode::Char(' ')), true, false), None);
        assert_eq!(transport_shortcut(&ctrl('n'), true, false), None);
        assert_eq!(transport_shortcut(&key(KeyCode::Media(MediaKeyCode::PlayPause)), true, true), None);
    }
}

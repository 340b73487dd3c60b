//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{PresentationMode, TransportCommand};
use super::AppController;
use super::shortcuts::transport_shortcut;

const SEEK_STEP_PERCENT: f64 = 5.0;
const VOLUME_STEP: f64 = 0.05;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let ui = self.get_ui_state().await;

        // Handle help popup
        if ui.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                self.ui_state.lock().await.show_help_popup = false;
            }
            return Ok(());
        }

        // Filter input swallows everything; transport shortcuts stay off
        if ui.filter_focused {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.ui_state.lock().await.filter_focused = false;
                }
                KeyCode::Backspace => {
                    self.edit_filter(|query| {
                        query.pop();
                    })
                    .await;
                }
                KeyCode::Char(c) => {
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        self.set_should_quit(true).await;
                        return Ok(());
                    }
                    self.edit_filter(|query| query.push(c)).await;
                }
                _ => {}
            }
            return Ok(());
        }

        let is_playing = self.engine.context().is_playing();
        if let Some(command) = transport_shortcut(&key, ui.filter_focused, is_playing) {
            self.engine.dispatch(command).await;
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.set_should_quit(true).await,
            KeyCode::Char('f') | KeyCode::Char('F') => self.toggle_fullscreen().await,
            KeyCode::Esc if ui.presentation == PresentationMode::Fullscreen => {
                self.toggle_fullscreen().await
            }
            KeyCode::Char('l') => self.engine.dispatch(TransportCommand::ToggleLoop).await,
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.engine.dispatch(TransportCommand::ToggleMute).await
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.engine.dispatch(TransportCommand::VolumeBy(VOLUME_STEP)).await
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.engine.dispatch(TransportCommand::VolumeBy(-VOLUME_STEP)).await
            }
            KeyCode::Char('.') => {
                self.engine.dispatch(TransportCommand::SeekBy(SEEK_STEP_PERCENT)).await
            }
            KeyCode::Char(',') => {
                self.engine.dispatch(TransportCommand::SeekBy(-SEEK_STEP_PERCENT)).await
            }
            KeyCode::Char(c @ '0'..='9') => {
                let tenths = c.to_digit(10).unwrap_or(0) as f64;
                self.engine.dispatch(TransportCommand::Seek(tenths * 10.0)).await
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                self.engine.dispatch(TransportCommand::Stop).await
            }
            KeyCode::Char('/') => {
                let mut ui = self.ui_state.lock().await;
                ui.filter_focused = true;
                ui.presentation = PresentationMode::Compact;
            }
            KeyCode::Char('O') => self.toggle_session().await,
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.ui_state.lock().await.show_help_popup = true;
            }
            KeyCode::Up => self.library_move(false).await,
            KeyCode::Down => self.library_move(true).await,
            KeyCode::Enter => self.play_selected().await,
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::test_support::{playlist, settle, Call, FakeResource, Harness};
    use crate::environment::EnvironmentEvent;
    use crate::model::{EnginePhase, PresentationMode};
    use crate::session::Session;

    use super::*;

    fn controller(h: &Harness) -> AppController {
        AppController::new(
            h.engine.clone(),
            h.environment.clone(),
            playlist(&["a", "b", "c"]),
            Session::sign_in(Some("tester".to_string())),
            Some("tester".to_string()),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test(start_paused = true)]
    async fn enter_plays_selected_row_with_visible_playlist() {
        let h = Harness::new(FakeResource::new());
        let app = controller(&h);
        app.handle_key_event(press(KeyCode::Down)).await.unwrap();
        app.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        settle().await;

        let intent = h.context.intent();
        assert_eq!(intent.current_index, Some(1));
        assert_eq!(intent.current_playlist.len(), 3);
        assert_eq!(h.engine.snapshot().current_track.unwrap().id, "b");
        assert_eq!(h.engine.snapshot().phase, EnginePhase::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn space_in_filter_is_text_not_toggle() {
        let h = Harness::new(FakeResource::new());
        let app = controller(&h);
        app.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        settle().await;
        assert!(h.context.is_playing());

        app.handle_key_event(press(KeyCode::Char('/'))).await.unwrap();
        app.handle_key_event(press(KeyCode::Char(' '))).await.unwrap();
        app.handle_key_event(press(KeyCode::Right)).await.unwrap();
        settle().await;
        assert!(h.context.is_playing());
        assert_eq!(h.context.intent().current_index, Some(0));
        assert_eq!(app.get_ui_state().await.filter_query, " ");

        app.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        app.handle_key_event(press(KeyCode::Char(' '))).await.unwrap();
        settle().await;
        assert!(!h.context.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn presentations_share_one_engine() {
        let h = Harness::new(FakeResource::new());
        let app = controller(&h);
        let mut environment = h.environment.subscribe();
        app.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        settle().await;
        let compact = h.engine.snapshot();

        app.handle_key_event(press(KeyCode::Char('f'))).await.unwrap();
        settle().await;
        assert_eq!(app.get_ui_state().await.presentation, PresentationMode::Fullscreen);
        assert_eq!(environment.recv().await.unwrap(), EnvironmentEvent::FullscreenChanged(true));

        // Same binding before and after the switch; no second load
        let fullscreen = h.engine.snapshot();
        assert_eq!(compact.current_track, fullscreen.current_track);
        assert_eq!(h.resource.count(&Call::Load("mem://a".into())), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn digit_jumps_to_tenth_of_track() {
        let h = Harness::new(FakeResource::new());
        let app = controller(&h);
        app.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        settle().await;

        app.handle_key_event(press(KeyCode::Char('5'))).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(150)).await;
        assert_eq!(h.resource.seek_writes(), vec![100.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn logout_clears_intent() {
        let h = Harness::new(FakeResource::new());
        let app = controller(&h);
        app.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        settle().await;

        app.handle_key_event(press(KeyCode::Char('O'))).await.unwrap();
        settle().await;
        assert!(app.get_session().await.user().is_none());
        assert!(h.context.intent().current_track.is_none());
        assert_eq!(h.engine.snapshot().phase, EnginePhase::Idle);
    }
}

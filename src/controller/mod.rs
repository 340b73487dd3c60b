//! Controller module - input handling and view-local state
//!
//! The controller turns key presses into transport commands for the engine
//! and keeps the state that belongs to the views only. It is organized into
//! submodules by responsibility:
//!
//! - `shortcuts`: global transport key bindings
//! - `input`: key event handling
//! - `library`: track list filtering and selection

mod input;
mod library;
mod shortcuts;

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::engine::PlaybackEngine;
use crate::environment::{EnvironmentEvent, EnvironmentHub};
use crate::model::{Playlist, PresentationMode, UiState};
use crate::session::Session;

pub use library::visible_tracks;

const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Clone)]
pub struct AppController {
    pub(crate) engine: PlaybackEngine,
    pub(crate) environment: EnvironmentHub,
    pub(crate) library: Arc<Playlist>,
    pub(crate) ui_state: Arc<Mutex<UiState>>,
    pub(crate) session: Arc<Mutex<Session>>,
    user_name: Option<String>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppController {
    pub fn new(
        engine: PlaybackEngine,
        environment: EnvironmentHub,
        library: Playlist,
        session: Session,
        user_name: Option<String>,
    ) -> Self {
        Self {
            engine,
            environment,
            library: Arc::new(library),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            session: Arc::new(Mutex::new(session)),
            user_name,
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_session(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub(crate) async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub(crate) async fn set_notice(&self, message: impl Into<String>) {
        let mut ui = self.ui_state.lock().await;
        ui.notice = Some(message.into());
        ui.notice_timestamp = Some(Instant::now());
    }

    pub async fn auto_clear_old_notice(&self) {
        let mut ui = self.ui_state.lock().await;
        if ui.notice_timestamp.is_some_and(|t| t.elapsed() >= NOTICE_TTL) {
            ui.notice = None;
            ui.notice_timestamp = None;
        }
    }

    /// Switch between the compact bar and the fullscreen player. Both render
    /// the same engine; only the view toggle changes.
    pub(crate) async fn toggle_fullscreen(&self) {
        let fullscreen = {
            let mut ui = self.ui_state.lock().await;
            ui.presentation = match ui.presentation {
                PresentationMode::Compact => PresentationMode::Fullscreen,
                PresentationMode::Fullscreen => PresentationMode::Compact,
            };
            ui.presentation == PresentationMode::Fullscreen
        };
        tracing::debug!(fullscreen, "Presentation switched");
        self.environment
            .publish(EnvironmentEvent::FullscreenChanged(fullscreen));
    }

    /// Forward a terminal focus change to the engine's environment feed
    pub fn focus_changed(&self, focused: bool) {
        let event = if focused {
            EnvironmentEvent::FocusGained
        } else {
            EnvironmentEvent::FocusLost
        };
        self.environment.publish(event);
    }

    /// Resizes follow the terminal being brought back into view
    pub fn surface_shown(&self) {
        self.environment.publish(EnvironmentEvent::Visibility(true));
    }

    pub(crate) async fn toggle_session(&self) {
        let mut session = self.session.lock().await;
        if session.user().is_some() {
            session.sign_out();
            drop(session);
            // Intent is cleared on logout
            self.engine.stop();
            self.set_notice("Signed out").await;
        } else {
            *session = Session::sign_in(self.user_name.clone());
            drop(session);
            self.set_notice("Signed in").await;
        }
    }
}

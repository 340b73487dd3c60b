mod catalog;
mod config;
mod controller;
mod engine;
mod environment;
mod logging;
mod model;
mod resource;
mod session;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use catalog::{Catalog, JsonCatalog};
use config::Args;
use controller::{visible_tracks, AppController};
use engine::PlaybackEngine;
use environment::EnvironmentHub;
use model::PlaybackContext;
use resource::SimulatedResource;
use session::Session;
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let args = Args::parse();
    tracing::info!(?args, "=== tunedeck starting ===");

    let catalog = match &args.catalog {
        Some(path) => JsonCatalog::load(path)?,
        None => {
            tracing::info!("No catalog configured, using the demo catalog");
            JsonCatalog::demo()
        }
    };

    let session = Session::sign_in(args.user.clone());

    let context = PlaybackContext::new();
    let environment = EnvironmentHub::new();
    let resource = Arc::new(SimulatedResource::new(catalog.duration_hints(), args.tick()));
    let engine = PlaybackEngine::mount(
        context.clone(),
        resource,
        environment.subscribe(),
        args.engine_config(),
    )?;

    let controller = AppController::new(
        engine.clone(),
        environment,
        catalog.tracks().to_vec(),
        session,
        args.user.clone(),
    );

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    engine.dispose().await;
    context.stop();

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("tunedeck shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: AppController,
) -> io::Result<()> {
    let snapshots = controller.engine.subscribe();

    loop {
        controller.auto_clear_old_notice().await;

        let snapshot = snapshots.borrow().clone();
        let ui_state = controller.get_ui_state().await;
        let session = controller.get_session().await;
        let tracks = visible_tracks(&controller.library, &ui_state.filter_query);

        terminal.draw(|f| {
            AppView::render(f, &snapshot, &ui_state, &session, &tracks);
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Err(e) = controller.handle_key_event(key).await {
                        tracing::warn!(error = %e, "Key handling failed");
                    }
                }
                Event::FocusGained => controller.focus_changed(true),
                Event::FocusLost => controller.focus_changed(false),
                Event::Resize(_, _) => controller.surface_shown(),
                _ => {}
            }
        }

        if controller.should_quit().await {
            break;
        }
    }

    Ok(())
}

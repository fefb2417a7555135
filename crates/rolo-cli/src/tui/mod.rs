//! rolo TUI
//!
//! Terminal user interface for rolo - client contact tracking.
//!
//! ## Layout
//!
//! - Header: summary statistics and sync indicator
//! - Left: clients table
//! - Right: detail of the selected client, tasks by assignee below
//! - Bottom: transient notice / key hints, search input in search mode
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Move selection
//! - /: Search (typing filters the table live)
//! - Esc: Clear search
//! - d: Delete selected client
//! - s: Sync to remote
//! - t: Toggle light/dark theme
//! - ?: Help
//! - q: Quit

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rolo_core::sync::push_outcome;
use rolo_core::{theme, Config, Notice, Store, SyncOrchestrator};

use app::{App, InputMode};

/// Run the TUI application
pub async fn run() -> Result<()> {
    // Open the store
    let mut store = Store::open()?;
    let config = store.config().clone();

    // Initialize TUI logging (file-based, only if ROLO_LOG is set)
    init_tui_logging(&config);

    let orchestrator = SyncOrchestrator::new(&config)?;
    let saved_theme = theme::load(&config);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create app
    let mut app = App::new(&store, saved_theme);

    // Remote is authoritative on startup when sync is enabled
    if orchestrator.remote_enabled() {
        app.set_notice(Notice::info("Loading from remote..."));
        terminal.draw(|frame| ui::draw(frame, &app))?;

        if let Some(notice) = orchestrator.startup(&mut store).await {
            app.set_notice(notice);
        }
        app.refresh(&store);
    }

    // Run app
    let result = run_app(&mut terminal, &mut app, &mut store, &orchestrator).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &mut Store,
    orchestrator: &SyncOrchestrator,
) -> Result<()> {
    // Background pushes report back through this channel
    let (sync_tx, mut sync_rx) = mpsc::unbounded_channel::<Notice>();

    loop {
        // Return the sync indicator to idle once its notice has been seen
        if app.check_notice_timeout() {
            orchestrator.reset_idle();
        }
        app.sync_status = orchestrator.status();

        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            biased;

            // Results from background pushes
            notice = sync_rx.recv() => {
                if let Some(notice) = notice {
                    app.sync_running = false;
                    app.set_notice(notice);
                }
            }

            // Poll for terminal events
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if event::poll(std::time::Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        // Only handle key press events (not release)
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }

                        // If help is showing, any key dismisses it
                        if app.show_help {
                            app.show_help = false;
                            continue;
                        }

                        match app.input_mode {
                            InputMode::Normal => handle_normal_mode(
                                app,
                                store,
                                orchestrator,
                                &sync_tx,
                                key.code,
                                key.modifiers,
                            ),
                            InputMode::Search => handle_search_mode(app, store, key.code),
                        }
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode(
    app: &mut App,
    store: &mut Store,
    orchestrator: &SyncOrchestrator,
    sync_tx: &mpsc::UnboundedSender<Notice>,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    match code {
        // Quit
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
        }

        // Search mode
        KeyCode::Char('/') => {
            app.enter_search_mode();
        }
        KeyCode::Esc => {
            app.clear_search(store);
        }

        // Delete selected client
        KeyCode::Char('d') => match app.delete_current(store) {
            Ok(Some(name)) => {
                app.set_notice(Notice::success(format!("Deleted '{}'", name)));
            }
            Ok(None) => {}
            Err(err) => {
                app.set_notice(Notice::error(format!("Delete failed: {}", err)));
            }
        },

        // Theme toggle (persisted under its own key)
        KeyCode::Char('t') => {
            app.theme = app.theme.toggled();
            if let Err(err) = theme::save(store.config(), app.theme) {
                app.set_notice(Notice::error(format!("Failed to save theme: {}", err)));
            }
        }

        // Manual sync
        KeyCode::Char('s') => {
            start_sync(app, store, orchestrator, sync_tx);
        }

        // Help
        KeyCode::Char('?') => {
            app.toggle_help();
        }

        _ => {}
    }
}

/// Handle key events in search mode
fn handle_search_mode(app: &mut App, store: &Store, code: KeyCode) {
    match code {
        // Cancel search
        KeyCode::Esc => {
            app.clear_search(store);
        }

        // Confirm search (stay in filtered view)
        KeyCode::Enter => {
            app.exit_search_mode();
        }

        // Text input (filters live)
        KeyCode::Char(c) => {
            app.push_search_char(c, store);
        }
        KeyCode::Backspace => {
            app.pop_search_char(store);
        }

        _ => {}
    }
}

/// Kick off a background push of the full client set
///
/// Local edits stay possible while the request is in flight; the result
/// arrives as a notice on the sync channel.
fn start_sync(
    app: &mut App,
    store: &Store,
    orchestrator: &SyncOrchestrator,
    sync_tx: &mpsc::UnboundedSender<Notice>,
) {
    if !orchestrator.remote_enabled() {
        app.set_notice(Notice::error(
            "Sync is not configured. Set sync_url and sync_enabled first.",
        ));
        return;
    }
    if app.sync_running {
        app.set_notice(Notice::info("Sync already in progress"));
        return;
    }

    app.sync_running = true;
    app.set_notice(Notice::info("Syncing to remote..."));

    let orchestrator = orchestrator.clone();
    let clients = store.clients().to_vec();
    let tx = sync_tx.clone();
    tokio::spawn(async move {
        let result = orchestrator.push(&clients).await;
        let _ = tx.send(push_outcome(&result));
    });
}

/// Initialize logging for TUI mode
///
/// Only initializes if ROLO_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_tui_logging(config: &Config) {
    // Only log if ROLO_LOG is set
    let Ok(log_level) = std::env::var("ROLO_LOG") else {
        return;
    };

    // Determine log file path
    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(|| config.data_dir.join("debug.log"));

    // Create log file
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("rolo_core={},rolo_cli={}", log_level, log_level));

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}

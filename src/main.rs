//! habitui - Terminal Habit Tracker
//!
//! A terminal-based habit tracker, built in Rust. One screen: add a habit,
//! check it off, rename it, batch-delete the completed ones. The list lives
//! in a local SQLite table and every write comes back through a live
//! subscription before it is drawn.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

mod application;
mod domain;
mod infrastructure;
mod presentation;

use application::{App, HabitManager};
use infrastructure::{DB_FILE_NAME, DataStorage, HabitStore, Subscription, init_logging};
use presentation::{InputHandler, render_ui};

/// Entry point for the habitui terminal application.
///
/// Initializes logging and the habit store, sets up the terminal
/// interface, and runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or if terminal setup
/// fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let storage = DataStorage::new();
    let _logger = init_logging(storage.dir()?)?;

    let store = Arc::new(HabitStore::open(storage.get_path(DB_FILE_NAME)?)?);
    let mut manager = HabitManager::new(Arc::clone(&store));
    let subscription = manager.habits()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    let res = run_app(&mut terminal, &mut app, &manager, &subscription);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Let queued writes finish before the process exits.
    manager.shutdown();

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Drains the live subscription, renders a frame, and processes keyboard
/// input. Continues running until the user presses 'q' in normal mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    manager: &HabitManager,
    subscription: &Subscription,
) -> io::Result<()> {
    loop {
        if let Some(habits) = subscription.latest() {
            app.apply_snapshot(habits);
        }

        terminal.draw(|f| render_ui(f, app))?;

        // Short poll so store emissions repaint without a keypress.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if matches!(app.mode, application::AppMode::Normal) => {
                            return Ok(());
                        }
                        _ => InputHandler::handle_key_event(app, manager, key.code, key.modifiers),
                    }
                }
            }
        }
    }
}

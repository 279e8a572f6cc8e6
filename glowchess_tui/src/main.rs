//! Terminal UI for glowchess.
//!
//! A thin collaborator over the engine: reads snapshots, sends square
//! clicks and promotion choices, and persists display preferences.

#![warn(missing_docs)]

mod app;
mod input;
mod prefs;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use prefs::Preferences;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Interactive chessboard with move/attack highlighting.
#[derive(Parser, Debug)]
#[command(name = "glowchess")]
#[command(about = "Interactive chessboard with move and attack highlighting", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the preferences file.
    #[arg(long, default_value = "glowchess_prefs.json")]
    prefs: PathBuf,

    /// Path to the log file (logging to the terminal would corrupt the UI).
    #[arg(long, default_value = "glowchess_tui.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to a file so output does not interfere with the TUI.
    let log_file = std::fs::File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("starting glowchess TUI");

    let preferences = Preferences::load(&cli.prefs);
    let app = App::new(preferences, cli.prefs);

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        eprintln!("Error: {err:?}");
    }
    res
}

/// Synchronous event loop: draw, poll, dispatch.
///
/// Each input event is handled to completion before the next is read;
/// the engine's promotion gate is the only "operation in progress" state.
fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, &mut app))?;

        if event::poll(Duration::from_millis(200))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit() {
            info!("user quit");
            return Ok(());
        }
    }
}

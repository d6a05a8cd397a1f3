mod app;
mod appearance;
mod calendar;
mod clock;
mod config;
mod date_key;
mod input;
mod logging;
mod quotes;
mod storage;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use app::App;
use clock::ClockFace;
use config::Config;
use input::Flow;
use storage::Storage;

#[derive(Parser, Debug)]
#[command(name = "mocal")]
#[command(about = "Calendar with a clock and a motivational quote for every day")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/motivational-calendar/config.toml")]
    config: String,

    /// Storage file path (overrides the config)
    #[arg(long)]
    storage: Option<String>,

    /// Clock face shown at startup
    #[arg(long, value_enum)]
    clock: Option<ClockFace>,

    /// Log file path (defaults to the data directory)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_path = cli
        .log_file
        .as_deref()
        .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
        .unwrap_or_else(logging::default_log_path);
    logging::init(&log_path);

    // Load config
    let mut config = Config::load(&cli.config)?;
    if let Some(path) = cli.storage {
        config.storage.path = Some(path);
    }
    if let Some(face) = cli.clock {
        config.clock.face = face;
    }

    let storage_path = config.storage.resolve_path();
    tracing::info!("Using storage at {}", storage_path.display());
    let storage = Storage::file(storage_path);

    // Create app state
    let mut app = App::new(config, storage, chrono::Local::now());
    app.start_clock();

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.pump_clock();
        app.sync_theme();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if input::handle_key(app, key) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }
    }
}

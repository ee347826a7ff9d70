//! Flightdeck TUI - simulated flight booking in the terminal.
//!
//! Flow: search form → progress overlay → results → details.

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use flightdeck_core::{
    AirportDirectory, BookingConfig, BookingSession, DirectoryStatus, ProgressSimulator, Tick,
};
use flightdeck_tui::app::AppState;
use flightdeck_tui::worker::{self, WorkerCommand, WorkerResponse};
use flightdeck_tui::{input, logging, ui};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "flightdeck-tui", about = "Simulated flight booking in the terminal")]
struct Args {
    /// Config file (default: <config dir>/flightdeck/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Airport JSON file to load at startup
    #[arg(long)]
    airports: Option<PathBuf>,

    /// URL to refresh the airport list from
    #[arg(long)]
    airports_url: Option<String>,

    /// Milliseconds per progress step
    #[arg(long)]
    tick_ms: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let config_root = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flightdeck");
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_root.join("config.toml"));

    let config = load_config(&config_path, &args)?;

    let log_dir = config.log_dir.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .map(|d| d.join("flightdeck"))
            .unwrap_or_else(|| config_root.clone())
    });
    let _log_guard = logging::init_file_logging(&log_dir)?;
    info!(config = %config_path.display(), tick_ms = config.tick_ms, "flightdeck starting");

    // Initial airport list; a failure leaves an empty, degraded directory.
    let initial = config.initial_source();
    let (directory, status, load_error) = AirportDirectory::load(&initial);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx);

    // Build app state
    let session = BookingSession::new(ProgressSimulator::new(config.tick_interval()));
    let mut app = AppState::new(session, directory, status, cmd_tx.clone(), resp_rx);
    if let Some(e) = &load_error {
        app.note_directory_error(initial.to_string(), e);
    }
    app.refresh_source = config.refresh_source();
    if let Some(source) = app.refresh_source.clone() {
        app.request_directory(source);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app, config.tick_interval());

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("flightdeck stopped");
    result
}

/// Read the config file, then let flags override it.
fn load_config(path: &Path, args: &Args) -> Result<BookingConfig> {
    let mut config = BookingConfig::load(path)
        .with_context(|| format!("load config {}", path.display()))?;

    if let Some(file) = &args.airports {
        config.airports_file = Some(file.clone());
    }
    if let Some(url) = &args.airports_url {
        config.airports_url = Some(url.clone());
    }
    if let Some(tick_ms) = args.tick_ms {
        config.tick_ms = tick_ms;
    }
    config.validate().context("invalid --tick-ms")?;
    Ok(config)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick: Duration,
) -> Result<()> {
    let poll = POLL_INTERVAL.min(tick);
    let mut last = Instant::now();

    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events
        if event::poll(poll)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Feed wall-clock time to the search progress
        let now = Instant::now();
        if app.session.advance(now - last) == Tick::Completed {
            app.results_cursor = 0;
            app.set_status(format!(
                "{} flights for {}",
                app.session.results().len(),
                app.session.criteria.route()
            ));
        }
        last = now;

        // 5. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::AirportsLoaded { source, directory } => {
            let status = DirectoryStatus::Loaded {
                source: source.to_string(),
                count: directory.len(),
            };
            app.apply_directory(directory, status);
        }
        WorkerResponse::AirportsFailed { source, error } => {
            app.directory_failed(source.to_string(), error);
        }
    }
}

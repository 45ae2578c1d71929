#![allow(dead_code)]

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::File, io, path::Path, sync::Arc, sync::Mutex, time::Duration};
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod forecast;
mod locale;
mod location;
mod openmeteo;
mod refresh;
mod session;
mod theme;
mod units;
mod weather;

use crate::app::run_app;
use crate::cli::Args;
use crate::location::LocationCycle;
use crate::openmeteo::{ForecastSource, OpenMeteoClient, OpenMeteoConfig};
use crate::refresh::Refresher;
use crate::session::Session;

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Fetches the selected location once and prints its view model.
fn print_snapshot(source: &dyn ForecastSource, mut session: Session) -> Result<()> {
    let ticket = session.begin_refresh();
    let result = source
        .fetch(ticket.location)
        .with_context(|| format!("fetching forecast for {}", ticket.location.display_name))?;
    session.complete_refresh(ticket.generation, Ok(result), chrono::Utc::now());

    let view = session
        .view()
        .ok_or_else(|| anyhow!("forecast produced no view model"))?;
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let cycle = LocationCycle::tokyo();
    let location = cycle.find(&args.location).ok_or_else(|| {
        let known: Vec<_> = cycle.iter().map(|l| l.id).collect();
        anyhow!("unknown location {:?} (expected one of {})", args.location, known.join(", "))
    })?;
    let mut session = Session::new(cycle, location, args.locale, args.theme);

    let source = Arc::new(OpenMeteoClient::new(OpenMeteoConfig {
        base_url: args.base_url,
        timezone: args.timezone,
        timeout: Duration::from_secs(args.timeout_secs),
    })?);

    if args.json {
        return print_snapshot(source.as_ref(), session);
    }

    tracing::info!(location = location.id, "starting");

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let refresher = Refresher::new(source);
    let res = run_app(&mut terminal, &mut session, &refresher);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}

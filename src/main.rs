//! fundmatch - Startup Funding Matcher
//!
//! Terminal front-end for finding funding: a landing page, a four-step
//! startup intake wizard, a dashboard and a filterable list of matches.

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use fundmatch::application::{App, spawn_submit};
use fundmatch::config::Cli;
use fundmatch::presentation::{InputHandler, render_ui};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Entry point for the fundmatch terminal application.
///
/// Parses the command line, sets up file logging and the data provider,
/// then runs the UI until the user quits.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let provider = cli.build_provider().context("failed to load opportunities")?;
    let mut app = App::new(provider, cli.start_view.into())?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting fundmatch");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "event loop failed");
        println!("{err:?}");
    }

    Ok(())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("cannot open log file {}", cli.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.parse().unwrap_or_default()),
        )
        .init();
    Ok(())
}

/// Main application event loop.
///
/// Waits on terminal input, a redraw tick and finished profile submissions.
/// Submissions run as tasks on the same single-threaded runtime.
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let mut ticker = time::interval(TICK_RATE);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        if let Some(task) = app.take_submit_task() {
            spawn_submit(task, outcome_tx.clone());
        }

        terminal.draw(|f| render_ui(f, app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') if app.can_quit() => {
                        app.cancel_submit();
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                },
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => return Ok(()),
            },
            _ = ticker.tick() => app.on_tick(),
            Some(outcome) = outcome_rx.recv() => app.finish_submit(outcome),
        }
    }
}

//! Terminal host for the Greyhound bin sensors.
//!
//! Stands in for a home-automation platform: registers the three sensors,
//! refreshes them on daily rollover (or on demand), and renders the state
//! and attributes each would publish.

mod app;
mod input;
mod ui;

use std::{io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use greyhound_core::{
    registry::SensorRegistry, schedule::ScheduleCalculator, service::GreyhoundService,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::app::{App, UPCOMING_COUNT};
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; the TUI owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // Calculator + sensor + service setup
    let calculator = Arc::new(ScheduleCalculator::new());
    let registry = Arc::new(SensorRegistry::new(greyhound_sensors::sensors(Arc::clone(
        &calculator,
    ))));
    let service = Arc::new(GreyhoundService::new(registry));

    // App state
    let app = App::new(service, calculator);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    refresh(&mut app).await;

    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Daily rollover while following the host clock.
        if app.follow_clock {
            let today = Local::now().date_naive();
            if today != app.preview_date {
                app.preview_date = today;
                refresh(&mut app).await;
            }
        }

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Refresh => refresh(&mut app).await,
            }
        }
    }

    Ok(())
}

/// One host-driven refresh tick: re-poll every sensor and rebuild the
/// upcoming-collections table for the previewed day.
async fn refresh(app: &mut App) {
    app.error_message = None;

    for (meta, outcome) in app.service.refresh_all(app.preview_date).await {
        match outcome {
            Ok(snapshot) => {
                app.snapshots.insert(meta.id, snapshot);
            }
            Err(err) => {
                // Keep the prior snapshot; the next tick retries on its own.
                warn!(sensor = %meta.id, error = %err, "sensor refresh failed");
                app.error_message = Some(format!("Refresh failed for {}: {err}", meta.name));
            }
        }
    }

    match app.calculator.upcoming(app.preview_date, UPCOMING_COUNT) {
        Ok(events) => app.upcoming = events,
        Err(err) => {
            app.upcoming.clear();
            app.error_message = Some(format!("Upcoming schedule unavailable: {err}"));
        }
    }
}

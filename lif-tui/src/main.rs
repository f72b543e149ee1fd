//! TUI entrypoint: steps the reference scenarios and plots the membrane potential
//! Controls: [s] Step, [r] Run/Pause, [x] Reset, [n] Next scenario, [q] Quit
//!
//! Environment:
//! - LIF_TUI_TICK_MS: tick period while running (default 100)
//! - LIF_TUI_LOG: file to write logs to (RUST_LOG filters); unset = no logging

mod app;
mod backend;
mod ui;

use anyhow::{Context, Result};
use app::App;
use backend::ScenarioBackend;
use ui::draw;

use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event as CEvent, KeyCode},
    execute, terminal,
};
use ratatui::{backend::CrosstermBackend, Terminal};

const DEFAULT_TICK_MS: u64 = 100;
const HISTORY_WIDTH: usize = 80;

struct Settings {
    tick_rate: Duration,
    log_file: Option<String>,
}

impl Settings {
    fn from_env() -> Result<Self> {
        let tick_ms = match std::env::var("LIF_TUI_TICK_MS") {
            Ok(v) => v
                .parse::<u64>()
                .with_context(|| format!("LIF_TUI_TICK_MS={v} is not a number of milliseconds"))?,
            Err(_) => DEFAULT_TICK_MS,
        };
        Ok(Self {
            tick_rate: Duration::from_millis(tick_ms),
            log_file: std::env::var("LIF_TUI_LOG").ok(),
        })
    }
}

// Stderr shares the terminal with the UI, so logs only go to a file.
fn init_logging(settings: &Settings) -> Result<()> {
    if let Some(path) = &settings.log_file {
        let file = File::create(path).with_context(|| format!("cannot open log file {path}"))?;
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()?;
    }
    Ok(())
}

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    init_logging(&settings)?;

    // Build the backend before touching the terminal so config errors print normally
    let backend = ScenarioBackend::new()?;
    let mut app = App::new(backend, HISTORY_WIDTH);

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Ensure terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));

    let result = event_loop(&mut terminal, &mut app, settings.tick_rate);

    // Cleanup
    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<ScenarioBackend>,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        draw(terminal, app)?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('s') => app.step(),
                    KeyCode::Char('r') => app.toggle_running(),
                    KeyCode::Char('x') => app.restart()?,
                    KeyCode::Char('n') => app.next_scenario()?,
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if app.running {
                app.step();
            }
            last_tick = Instant::now();
        }
    }
    Ok(())
}

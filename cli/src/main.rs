//! Vitrine CLI - binary entry point and terminal session management.
//!
//! The CLI bridges [`vitrine_engine`] (storefront state) and [`vitrine_tui`]
//! (rendering), with RAII terminal management that restores the terminal on
//! every exit path.
//!
//! # Event Loop
//!
//! A fixed 16ms frame cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`vitrine_tui::InputPump`])
//! 3. Advance animations and fire due reveal timers (`shop.tick(now)`)
//! 4. Render frame
//! 5. Report header visibility from the frame just drawn

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vitrine_engine::{Storefront, VitrineConfig};
use vitrine_tui::{HitMap, InputPump, draw, handle_events, report_visibility};

const FRAME_DURATION: Duration = Duration::from_millis(16);

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // Without a log file, stay silent rather than write over the TUI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.vitrine/logs/vitrine.log
    if let Some(config_path) = VitrineConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("vitrine.log"));
    }

    // Fallback: ./.vitrine/logs/vitrine.log
    candidates.push(PathBuf::from(".vitrine").join("logs").join("vitrine.log"));

    candidates
}

fn load_config() -> Option<VitrineConfig> {
    match VitrineConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Ignoring config: {err}");
            None
        }
    }
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Enables raw mode, the alternate screen and mouse capture (header icons and
/// the overlay backdrop are clickable). Drop restores all three, so the
/// terminal stays usable after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            let _ = execute!(out, DisableMouseCapture, LeaveAlternateScreen);
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_config();
    let mut shop = Storefront::new(config.as_ref())?;

    let result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut shop).await
    };

    // The terminal is restored by now, so errors print cleanly.
    shop.shutdown();
    result
}

async fn run_app<B>(terminal: &mut Terminal<B>, shop: &mut Storefront) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut hits = HitMap::default();

    let result: Result<()> = loop {
        frames.tick().await;

        // Clicks resolve against the previous frame's geometry.
        let quit_now = match handle_events(shop, &mut input, &hits) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            break Ok(());
        }

        let now = Instant::now();
        shop.tick(now);

        if let Err(e) = terminal.draw(|frame| hits = draw(frame, shop)) {
            break Err(e.into());
        }

        report_visibility(shop, &hits, now);
    };

    input.shutdown().await;
    result
}

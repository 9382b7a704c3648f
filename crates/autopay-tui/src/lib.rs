pub mod app;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use autopay_state::{AppState, Notice, Route};
use autopay_types::{Result as AutopayResult, SimulationResult};
use crossterm::cursor::Show;
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use thiserror::Error;
use tokio::sync::oneshot;

pub use app::{App, Command, InputMode};

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("export error: {0}")]
    Export(#[from] serde_json::Error),
}

pub struct TuiRunResult {
    pub route: Route,
    pub notices_shown: usize,
}

/// Runs `restore` exactly once, on `finish` or when dropped
///
/// Keeps an early `?` out of the loop from leaving the terminal raw.
struct TerminalGuard<F: FnMut() -> std::io::Result<()>> {
    restore: Option<F>,
}

impl<F: FnMut() -> std::io::Result<()>> TerminalGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    fn finish(mut self) -> std::io::Result<()> {
        match self.restore.take() {
            Some(mut restore) => restore(),
            None => Ok(()),
        }
    }
}

impl<F: FnMut() -> std::io::Result<()>> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        if let Some(mut restore) = self.restore.take() {
            let _ = restore();
        }
    }
}

fn restore_terminal() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen, Show)
}

/// Deferred work spawned from a key press, polled every tick
enum Pending {
    Simulation(oneshot::Receiver<AutopayResult<SimulationResult>>),
    Wallet(oneshot::Receiver<AutopayResult<String>>),
}

pub async fn run_dashboard_tui(
    state: AppState,
    initial_route: Route,
    tick_rate: Duration,
    export_dir: Option<PathBuf>,
) -> Result<TuiRunResult, TuiError> {
    let mut app = App::new(
        state,
        initial_route,
        export_dir.unwrap_or_else(|| PathBuf::from("out")),
    );

    enable_raw_mode()?;
    let guard = TerminalGuard::new(restore_terminal);
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, tick_rate).await;

    guard.finish()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<TuiRunResult, TuiError> {
    let mut pending: Vec<Pending> = Vec::new();

    loop {
        poll_pending(app, &mut pending);
        app.wallet = app.state.wallet.state().await;

        let now = app.state.now();
        terminal.draw(|frame| ui::draw_ui(frame, &*app, now))?;

        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.handle_key(key) {
                    Command::None => {}
                    Command::Quit => {
                        return Ok(TuiRunResult {
                            route: app.route.clone(),
                            notices_shown: app.state.notices.len(),
                        });
                    }
                    Command::Simulate(request) => {
                        let simulator = app.state.simulator.clone();
                        let agents = app.state.registry.agents().to_vec();
                        let (tx, rx) = oneshot::channel();
                        tokio::spawn(async move {
                            let _ = tx.send(simulator.simulate(&agents, &request).await);
                        });
                        pending.push(Pending::Simulation(rx));
                    }
                    Command::ConnectWallet => {
                        let wallet = app.state.wallet.clone();
                        let (tx, rx) = oneshot::channel();
                        tokio::spawn(async move {
                            let _ = tx.send(wallet.connect().await);
                        });
                        pending.push(Pending::Wallet(rx));
                    }
                    Command::DisconnectWallet => {
                        app.state.wallet.disconnect().await;
                        app.state
                            .notify(Notice::info("Wallet Disconnected", "Wallet session closed."));
                    }
                }
            }
        }
    }
}

/// Hand finished tasks back to the app; unfinished ones stay queued
fn poll_pending(app: &mut App, pending: &mut Vec<Pending>) {
    pending.retain_mut(|job| match job {
        Pending::Simulation(rx) => match rx.try_recv() {
            Ok(outcome) => {
                app.finish_simulation(outcome);
                false
            }
            Err(oneshot::error::TryRecvError::Empty) => true,
            Err(oneshot::error::TryRecvError::Closed) => {
                app.simulating = false;
                false
            }
        },
        Pending::Wallet(rx) => match rx.try_recv() {
            Ok(Ok(address)) => {
                app.state.notify(Notice::info(
                    "Wallet Connected",
                    format!("Connected to {}", autopay_types::short_address(&address)),
                ));
                false
            }
            Ok(Err(err)) => {
                app.state.notify(Notice::from(&err));
                false
            }
            Err(oneshot::error::TryRecvError::Empty) => true,
            Err(oneshot::error::TryRecvError::Closed) => false,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn failing_step(restored: &Cell<u32>) -> std::io::Result<()> {
        let _guard = TerminalGuard::new(|| {
            restored.set(restored.get() + 1);
            Ok(())
        });
        Err(std::io::Error::new(std::io::ErrorKind::Other, "draw failed"))?;
        Ok(())
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        let restored = Cell::new(0);
        assert!(failing_step(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_guard_restores_once_after_finish() {
        let restored = Cell::new(0);
        let guard = TerminalGuard::new(|| {
            restored.set(restored.get() + 1);
            Ok(())
        });
        guard.finish().unwrap();
        assert_eq!(restored.get(), 1);
    }
}

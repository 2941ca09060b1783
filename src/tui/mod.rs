//! Terminal UI: renders engine events and turns key presses into commands.

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{InputAction, action_for_key, move_cursor};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tictactoe_core::GameEvent;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::config::GameConfig;
use crate::controller::{Command, Controller, ControllerHandle};

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Runs a game in the terminal until the user quits.
#[instrument(skip_all)]
pub async fn run_tui(config: GameConfig) -> Result<()> {
    info!("Starting tic-tac-toe TUI");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (controller, handle) = Controller::from_config(&config, event_tx);
    let controller_task = tokio::spawn(controller.run());

    let res = match enter_terminal() {
        Ok(mut terminal) => {
            let res = run_loop(&mut terminal, &handle, &mut event_rx);
            restore_terminal()?;
            terminal.show_cursor()?;
            res
        }
        Err(e) => {
            error!(error = ?e, "Failed to set up terminal");
            if let Err(restore) = restore_terminal() {
                error!(error = ?restore, "Failed to restore terminal");
            }
            Err(e)
        }
    };

    // Send fails only if the controller already stopped with an error.
    let _ = handle.send(Command::Quit);
    drop(handle);
    controller_task
        .await
        .context("Controller task panicked")?
        .context("Controller failed")?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Leaves raw mode and the alternate screen. Safe to call after a partial setup.
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    handle: &ControllerHandle,
    event_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    let mut app = App::new();

    loop {
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match action_for_key(key.code, app.cursor()) {
                Some(InputAction::Cursor(pos)) => app.set_cursor(pos),
                Some(InputAction::Send(command)) => handle.send(command)?,
                Some(InputAction::Quit) => {
                    info!("User quit");
                    return Ok(());
                }
                None => {}
            }
        }
    }
}

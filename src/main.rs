/*
 * This file is part of Armtune.
 *
 * Copyright (C) 2025 Armtune contributors
 *
 * Armtune is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Armtune is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Armtune. If not, see <https://www.gnu.org/licenses/>.
 */

mod app;
mod characteristics;
mod delta;
mod driver;
mod events;
mod handlers;
mod logger;
mod sim;
#[cfg(test)]
mod test_utils;
mod ui;

use std::io::stdout;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::Terminal;

use app::App;
use driver::{ArmDriver, ConnectParams, DriverError};
use events::SetupAction;
use sim::SimArmDriver;
use ui::ui;

const MIN_COLS: u16 = 160;
const MIN_ROWS: u16 = 30;

fn main() -> anyhow::Result<()> {
    // Gather args once
    let args: Vec<String> = std::env::args().collect();

    // Optional logging to /tmp/armtune/logs.json
    let logging_enabled = args.iter().any(|a| a == "--logging");
    if logging_enabled {
        logger::init_logging();
        logger::log_event(
            "startup",
            serde_json::json!({
                "mode": "tui",
                "args": args,
            }),
        );
    }

    // One optional override: `armtune --ip 192.168.1.3`
    let cli_ip = args
        .iter()
        .position(|a| a == "--ip")
        .and_then(|i| args.get(i + 1))
        .cloned();

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, cli_ip);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
        if logging_enabled {
            logger::log_event(
                "fatal_error",
                serde_json::json!({ "error": err.to_string() }),
            );
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Connect attempt used by the setup screen. A transport-backed driver
/// would slot in here; the simulated arm answers the same contract.
fn connect(params: &ConnectParams) -> Result<Box<dyn ArmDriver>, DriverError> {
    logger::log_event(
        "connect_attempt",
        serde_json::json!({
            "address": params.address,
            "end_effector": params.end_effector.label(),
            "clear_error": params.clear_error,
        }),
    );
    let driver = SimArmDriver::configure(params)?;
    Ok(Box::new(driver))
}

fn run_app(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    cli_ip: Option<String>,
) -> anyhow::Result<()> {
    let mut app = App::new(cli_ip);

    // Setup screen: loop until a connect attempt succeeds or the operator
    // cancels. A failed attempt only fills connect_error; every entered
    // field keeps its value for the retry.
    let mut driver = loop {
        terminal.draw(|f| ui(f, &app))?;
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        match events::handle_setup_key(&mut app, key_event) {
            SetupAction::Cancel => return Ok(()),
            SetupAction::Continue => {}
            SetupAction::Connect => match connect(&app.connect_params()) {
                Ok(d) => {
                    logger::log_event(
                        "connect_ok",
                        serde_json::json!({ "num_joints": d.num_joints() }),
                    );
                    break d;
                }
                Err(e) => {
                    app.connect_error = e.to_string();
                    logger::log_event(
                        "connect_failed",
                        serde_json::json!({ "error": app.connect_error }),
                    );
                }
            },
        }
    };

    // From here the driver must be released on every exit path: operator
    // quit, terminal read failure, or a propagated arm fault. Capture the
    // loop result first, then clean up exactly once.
    let res = tuning_loop(terminal, &mut app, driver.as_mut());
    let cleanup_res = driver.cleanup();
    logger::log_event("cleanup", serde_json::json!({ "ok": cleanup_res.is_ok() }));
    res?;
    cleanup_res?;
    Ok(())
}

fn tuning_loop(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    driver: &mut dyn ArmDriver,
) -> anyhow::Result<()> {
    handlers::begin_tuning(app, driver)?;
    warn_if_small(terminal, app);

    loop {
        terminal.draw(|f| ui(f, app))?;
        // The single suspension point: block until the next keypress.
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if events::handle_tuning_key(app, driver, key_event)? {
            return Ok(());
        }
    }
}

fn warn_if_small(
    terminal: &Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) {
    if let Ok(size) = terminal.size() {
        if size.width < MIN_COLS || size.height < MIN_ROWS {
            app.status = format!(
                "Terminal is {}x{}; at least {}x{} recommended for the full grid",
                size.width, size.height, MIN_COLS, MIN_ROWS
            );
        }
    }
}

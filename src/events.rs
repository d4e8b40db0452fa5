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

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, SetupField};
use crate::driver::ArmDriver;
use crate::handlers::*;

/// What the setup screen wants the caller to do after a keypress.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetupAction {
    /// Stay in the setup screen.
    Continue,
    /// Run a connect attempt with the current field values.
    Connect,
    /// Abandon the session.
    Cancel,
}

/// Setup-screen state machine. Pure App mutation; the connect attempt
/// itself is performed by the caller so a failure can be reported back into
/// `connect_error` while every field keeps its value.
pub fn handle_setup_key(app: &mut App, key_event: KeyEvent) -> SetupAction {
    let KeyEvent { code, modifiers, .. } = key_event;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return SetupAction::Cancel;
    }

    match code {
        KeyCode::Esc => return SetupAction::Cancel,
        KeyCode::Down | KeyCode::Tab => {
            app.setup_field = app.setup_field.next();
            return SetupAction::Continue;
        }
        KeyCode::Up => {
            app.setup_field = app.setup_field.prev();
            return SetupAction::Continue;
        }
        KeyCode::Enter => {
            if app.setup_field == SetupField::Connect {
                app.connect_error.clear();
                return SetupAction::Connect;
            }
            app.setup_field = app.setup_field.next();
            return SetupAction::Continue;
        }
        _ => {}
    }

    // Field-specific input
    match app.setup_field {
        SetupField::EndEffector => match code {
            KeyCode::Left => app.cycle_end_effector(false),
            KeyCode::Right => app.cycle_end_effector(true),
            _ => {}
        },
        SetupField::Address => match code {
            KeyCode::Backspace => {
                app.address.pop();
            }
            KeyCode::Char(c) if (' '..='~').contains(&c) => app.address.push(c),
            _ => {}
        },
        SetupField::ClearError => {
            if matches!(code, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) {
                app.clear_error = !app.clear_error;
            }
        }
        SetupField::Connect => {}
    }
    SetupAction::Continue
}

/// Tuning-loop dispatch. Returns `Ok(true)` when the session should end;
/// driver faults propagate to the caller, which still runs cleanup.
pub fn handle_tuning_key(
    app: &mut App,
    driver: &mut dyn ArmDriver,
    key_event: KeyEvent,
) -> anyhow::Result<bool> {
    let KeyEvent { code, modifiers, .. } = key_event;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Char('r') => refresh_characteristics(app, driver)?,
        KeyCode::Up => joint_prev(app, driver)?,
        KeyCode::Down => joint_next(app, driver)?,
        KeyCode::Left => app.cycle_characteristic(false),
        KeyCode::Right => app.cycle_characteristic(true),
        KeyCode::Char('w') => apply_delta(app, driver, app.increment)?,
        KeyCode::Char('s') => apply_delta(app, driver, -app.increment)?,
        KeyCode::Char('W') => apply_delta(app, driver, app.increment * 10.0)?,
        KeyCode::Char('S') => apply_delta(app, driver, -(app.increment * 10.0))?,
        KeyCode::Char('+' | '=') => double_increment(app),
        KeyCode::Char('-') => halve_increment(app),
        _ => {}
    }
    Ok(false)
}

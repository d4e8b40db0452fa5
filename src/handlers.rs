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

use crate::app::{App, Phase};
use crate::characteristics::MIN_INCREMENT;
use crate::driver::{ArmDriver, DriverError, Mode};
use crate::logger;

/// Enter the tuning phase: snapshot the baseline once, then arm joint 0.
pub fn begin_tuning(app: &mut App, driver: &mut dyn ArmDriver) -> Result<(), DriverError> {
    app.num_joints = driver.num_joints();
    app.baseline = driver.get_joint_characteristics()?;
    app.characteristics = app.baseline.clone();
    app.phase = Phase::Tuning;
    select_joint(app, driver, 0)?;
    Ok(())
}

/// Put exactly one joint into external-effort mode and every other joint
/// into idle, then immediately command zero effort on it so the arm holds
/// still until the operator nudges a value. The order of the two calls
/// matters and is fixed.
pub fn select_joint(
    app: &mut App,
    driver: &mut dyn ArmDriver,
    joint_index: usize,
) -> Result<(), DriverError> {
    let mut modes = vec![Mode::Idle; app.num_joints];
    modes[joint_index] = Mode::ExternalEffort;
    driver.set_joint_modes(&modes)?;
    driver.set_joint_external_effort(joint_index, 0.0, false)?;
    app.joint_idx = joint_index;
    app.status = format!("Joint {} in external-effort mode", joint_index);
    logger::log_event(
        "select_joint",
        serde_json::json!({ "joint": joint_index }),
    );
    Ok(())
}

pub fn joint_next(app: &mut App, driver: &mut dyn ArmDriver) -> Result<(), DriverError> {
    let next = app.wrapped_joint(true);
    select_joint(app, driver, next)
}

pub fn joint_prev(app: &mut App, driver: &mut dyn ArmDriver) -> Result<(), DriverError> {
    let prev = app.wrapped_joint(false);
    select_joint(app, driver, prev)
}

/// Nudge the selected characteristic of the selected joint by `delta`.
///
/// The driver contract is array-granular: fetch the whole set fresh, change
/// one field, write the whole set back. There is deliberately no guard
/// between the fetch and the write-back; a concurrent external writer would
/// race this round trip, which is inherent to the bulk interface.
pub fn apply_delta(
    app: &mut App,
    driver: &mut dyn ArmDriver,
    delta: f64,
) -> Result<(), DriverError> {
    let mut chars = driver.get_joint_characteristics()?;
    let kind = app.selected_kind();
    let jc = &mut chars[app.joint_idx];
    let old_value = kind.get(jc);
    let new_value = kind.clamp(old_value + delta);
    kind.set(jc, new_value);
    driver.set_joint_characteristics(&chars)?;
    app.characteristics = chars;
    app.status = format!(
        "Joint {} {}: {:+.8} -> {:+.8}",
        app.joint_idx,
        kind.name(),
        old_value,
        new_value
    );
    logger::log_event(
        "apply_delta",
        serde_json::json!({
            "joint": app.joint_idx,
            "characteristic": kind.name(),
            "delta": delta,
            "old": old_value,
            "new": new_value,
        }),
    );
    Ok(())
}

/// Re-fetch the characteristic set for display.
pub fn refresh_characteristics(
    app: &mut App,
    driver: &mut dyn ArmDriver,
) -> Result<(), DriverError> {
    app.characteristics = driver.get_joint_characteristics()?;
    app.status = "Refreshed".to_string();
    Ok(())
}

pub fn double_increment(app: &mut App) {
    app.increment *= 2.0;
    app.status = format!("Increment {:.2e}", app.increment);
}

pub fn halve_increment(app: &mut App) {
    app.increment = (app.increment / 2.0).max(MIN_INCREMENT);
    app.status = format!("Increment {:.2e}", app.increment);
}

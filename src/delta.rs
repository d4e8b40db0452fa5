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

//! Display-only comparison against the baseline snapshot taken at session
//! start. Nothing here mutates either input.

use crate::characteristics::CharKind;
use crate::driver::JointCharacteristic;

/// Differences below this are considered display noise, not a change.
pub const CHANGE_EPSILON: f64 = 1e-12;

/// Signed difference of the current value against the baseline.
pub fn delta(current: f64, baseline: f64) -> f64 {
    current - baseline
}

/// Whether a cell should be annotated as changed.
pub fn changed(current: f64, baseline: f64) -> bool {
    delta(current, baseline).abs() > CHANGE_EPSILON
}

/// Delta of one (joint, characteristic) cell across two snapshots.
pub fn cell_delta(
    current: &[JointCharacteristic],
    baseline: &[JointCharacteristic],
    joint: usize,
    kind: CharKind,
) -> f64 {
    delta(kind.get(&current[joint]), kind.get(&baseline[joint]))
}

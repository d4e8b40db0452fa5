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

use crate::driver::JointCharacteristic;

/// Step size a fresh tuning session starts with.
pub const DEFAULT_INCREMENT: f64 = 1e-3;
/// Halving the increment never goes below this.
pub const MIN_INCREMENT: f64 = 1e-12;

/// Allowed range for `effort_correction`.
pub const EFFORT_CORRECTION_MIN: f64 = 0.2;
pub const EFFORT_CORRECTION_MAX: f64 = 5.0;
/// `friction_transition_velocity` is a divisor downstream and may never
/// reach zero; edits are floored here.
pub const FRICTION_VELOCITY_FLOOR: f64 = 1e-12;

/// The six tunable per-joint characteristics, in grid column order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CharKind {
    FrictionConstantTerm,
    FrictionCoulombCoef,
    FrictionViscousCoef,
    FrictionTransitionVelocity,
    PositionOffset,
    EffortCorrection,
}

impl CharKind {
    pub const ALL: [CharKind; 6] = [
        CharKind::FrictionConstantTerm,
        CharKind::FrictionCoulombCoef,
        CharKind::FrictionViscousCoef,
        CharKind::FrictionTransitionVelocity,
        CharKind::PositionOffset,
        CharKind::EffortCorrection,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Stable identifier matching the driver-side field name.
    pub fn name(&self) -> &'static str {
        match self {
            CharKind::FrictionConstantTerm => "friction_constant_term",
            CharKind::FrictionCoulombCoef => "friction_coulomb_coef",
            CharKind::FrictionViscousCoef => "friction_viscous_coef",
            CharKind::FrictionTransitionVelocity => "friction_transition_velocity",
            CharKind::PositionOffset => "position_offset",
            CharKind::EffortCorrection => "effort_correction",
        }
    }

    /// Short label used as a grid column header.
    pub fn label(&self) -> &'static str {
        match self {
            CharKind::FrictionConstantTerm => "Fric Const Term",
            CharKind::FrictionCoulombCoef => "Fric Coulomb",
            CharKind::FrictionViscousCoef => "Fric Viscous",
            CharKind::FrictionTransitionVelocity => "Fric Trans Vel",
            CharKind::PositionOffset => "Pos Offset",
            CharKind::EffortCorrection => "Effort Correction",
        }
    }

    /// Unit text, arm joints first then the gripper joint.
    pub fn unit(&self) -> &'static str {
        match self {
            CharKind::FrictionConstantTerm => "Nm | N",
            CharKind::FrictionCoulombCoef => "Nm/Nm | N/N",
            CharKind::FrictionViscousCoef => "Nm/(rad/s) | N/(m/s)",
            CharKind::FrictionTransitionVelocity => "rad/s | m/s",
            CharKind::PositionOffset => "rad | m",
            CharKind::EffortCorrection => "motor effort / Nm or N",
        }
    }

    /// Read this characteristic from a joint record.
    pub fn get(&self, jc: &JointCharacteristic) -> f64 {
        match self {
            CharKind::FrictionConstantTerm => jc.friction_constant_term,
            CharKind::FrictionCoulombCoef => jc.friction_coulomb_coef,
            CharKind::FrictionViscousCoef => jc.friction_viscous_coef,
            CharKind::FrictionTransitionVelocity => jc.friction_transition_velocity,
            CharKind::PositionOffset => jc.position_offset,
            CharKind::EffortCorrection => jc.effort_correction,
        }
    }

    /// Write this characteristic into a joint record.
    pub fn set(&self, jc: &mut JointCharacteristic, value: f64) {
        match self {
            CharKind::FrictionConstantTerm => jc.friction_constant_term = value,
            CharKind::FrictionCoulombCoef => jc.friction_coulomb_coef = value,
            CharKind::FrictionViscousCoef => jc.friction_viscous_coef = value,
            CharKind::FrictionTransitionVelocity => jc.friction_transition_velocity = value,
            CharKind::PositionOffset => jc.position_offset = value,
            CharKind::EffortCorrection => jc.effort_correction = value,
        }
    }

    /// Clamp a candidate value to the safe range for this characteristic.
    /// Fields without a physical bound pass through unchanged.
    pub fn clamp(&self, value: f64) -> f64 {
        match self {
            CharKind::EffortCorrection => {
                value.clamp(EFFORT_CORRECTION_MIN, EFFORT_CORRECTION_MAX)
            }
            CharKind::FrictionTransitionVelocity => value.max(FRICTION_VELOCITY_FLOOR),
            _ => value,
        }
    }
}

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

use crate::characteristics::{CharKind, DEFAULT_INCREMENT};
use crate::driver::{ConnectParams, EndEffectorKind, JointCharacteristic, Model};

pub const DEFAULT_ADDRESS: &str = "192.168.1.2";

/// Which screen the session is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Tuning,
}

/// Focus within the setup screen, in navigation order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetupField {
    EndEffector,
    Address,
    ClearError,
    Connect,
}

impl SetupField {
    const ORDER: [SetupField; 4] = [
        SetupField::EndEffector,
        SetupField::Address,
        SetupField::ClearError,
        SetupField::Connect,
    ];

    pub fn next(&self) -> SetupField {
        let i = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> SetupField {
        let i = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

pub struct App {
    pub phase: Phase,
    pub status: String,
    // setup screen
    pub setup_field: SetupField,
    pub ee_idx: usize,
    pub address: String,
    pub clear_error: bool,
    pub connect_error: String,
    // tuning screen
    pub num_joints: usize,
    pub joint_idx: usize,
    pub char_idx: usize,
    pub increment: f64,
    /// Latest characteristics fetched from the driver, display only.
    pub characteristics: Vec<JointCharacteristic>,
    /// Snapshot taken once when tuning starts; never written afterwards.
    pub baseline: Vec<JointCharacteristic>,
}

impl App {
    pub fn new(cli_address: Option<String>) -> Self {
        Self {
            phase: Phase::Setup,
            status: String::from(
                "↑↓: field | ←→: change | Enter: confirm | type when IP focused | Esc: quit",
            ),
            setup_field: SetupField::EndEffector,
            ee_idx: 1, // WXAI V0 Leader
            address: cli_address.unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            clear_error: false,
            connect_error: String::new(),
            num_joints: 0,
            joint_idx: 0,
            char_idx: 0,
            increment: DEFAULT_INCREMENT,
            characteristics: Vec::new(),
            baseline: Vec::new(),
        }
    }

    pub fn end_effector(&self) -> EndEffectorKind {
        EndEffectorKind::ALL[self.ee_idx % EndEffectorKind::ALL.len()]
    }

    pub fn connect_params(&self) -> ConnectParams {
        ConnectParams {
            model: Model::WxaiV0,
            end_effector: self.end_effector(),
            address: self.address.clone(),
            clear_error: self.clear_error,
        }
    }

    pub fn selected_kind(&self) -> CharKind {
        CharKind::ALL[self.char_idx % CharKind::COUNT]
    }

    /// Value of the selected cell in the latest fetch, if any.
    pub fn selected_value(&self) -> Option<f64> {
        self.characteristics
            .get(self.joint_idx)
            .map(|jc| self.selected_kind().get(jc))
    }

    /// Baseline value of the selected cell, if any.
    pub fn selected_baseline(&self) -> Option<f64> {
        self.baseline
            .get(self.joint_idx)
            .map(|jc| self.selected_kind().get(jc))
    }

    pub fn cycle_end_effector(&mut self, forward: bool) {
        let n = EndEffectorKind::ALL.len();
        self.ee_idx = if forward {
            (self.ee_idx + 1) % n
        } else {
            (self.ee_idx + n - 1) % n
        };
    }

    pub fn cycle_characteristic(&mut self, forward: bool) {
        let n = CharKind::COUNT;
        self.char_idx = if forward {
            (self.char_idx + 1) % n
        } else {
            (self.char_idx + n - 1) % n
        };
    }

    /// Next joint index in the given direction, wrapping over the joint
    /// count. Pure; pushing modes to the driver is the caller's job.
    pub fn wrapped_joint(&self, forward: bool) -> usize {
        let n = self.num_joints.max(1);
        if forward {
            (self.joint_idx + 1) % n
        } else {
            (self.joint_idx + n - 1) % n
        }
    }
}

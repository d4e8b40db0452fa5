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

use serde::Serialize;
use thiserror::Error;

/// Operation mode of a single joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// Joint is braked.
    Idle,
    /// Track a commanded position.
    Position,
    /// Track a commanded velocity.
    Velocity,
    /// Apply a commanded external effort directly.
    ExternalEffort,
    /// Apply a commanded total effort directly.
    Effort,
}

/// Robot models this tool knows how to talk to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Model {
    WxaiV0,
}

impl Model {
    /// Joint count for the model, gripper included.
    pub fn num_joints(&self) -> usize {
        match self {
            Model::WxaiV0 => 7,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Model::WxaiV0 => "WXAI V0",
        }
    }
}

/// Standard end-effector variants selectable during setup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum EndEffectorKind {
    WxaiV0Base,
    WxaiV0Leader,
    WxaiV0Follower,
    NoGripper,
}

impl EndEffectorKind {
    pub const ALL: [EndEffectorKind; 4] = [
        EndEffectorKind::WxaiV0Base,
        EndEffectorKind::WxaiV0Leader,
        EndEffectorKind::WxaiV0Follower,
        EndEffectorKind::NoGripper,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EndEffectorKind::WxaiV0Base => "WXAI V0 Base",
            EndEffectorKind::WxaiV0Leader => "WXAI V0 Leader",
            EndEffectorKind::WxaiV0Follower => "WXAI V0 Follower",
            EndEffectorKind::NoGripper => "No Gripper",
        }
    }
}

/// Per-joint calibration record. Units are Nm for arm joints and N for the
/// gripper joint unless noted otherwise on the field.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct JointCharacteristic {
    /// Friction constant term in Nm | N.
    pub friction_constant_term: f64,
    /// Friction coulomb coefficient in Nm/Nm | N/N.
    pub friction_coulomb_coef: f64,
    /// Friction viscous coefficient in Nm/(rad/s) | N/(m/s).
    pub friction_viscous_coef: f64,
    /// Friction transition velocity in rad/s | m/s. Must stay positive; it
    /// is used as a divisor in the firmware's friction model.
    pub friction_transition_velocity: f64,
    /// Position offset in rad | m.
    pub position_offset: f64,
    /// Effort correction in motor effort unit / Nm or N. Must stay within
    /// [0.2, 5.0].
    pub effort_correction: f64,
}

impl Default for JointCharacteristic {
    fn default() -> Self {
        Self {
            friction_constant_term: 0.0,
            friction_coulomb_coef: 0.0,
            friction_viscous_coef: 0.0,
            friction_transition_velocity: 0.15,
            position_offset: 0.0,
            effort_correction: 1.0,
        }
    }
}

/// Everything the setup screen collects before a connect attempt.
#[derive(Clone, Debug)]
pub struct ConnectParams {
    pub model: Model,
    pub end_effector: EndEffectorKind,
    pub address: String,
    pub clear_error: bool,
}

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("arm fault: {0}")]
    Fault(String),
}

/// Capability set of a configured arm driver.
///
/// This is the post-connection surface the tuning loop owns exclusively.
/// Construction (`configure`) lives on the concrete driver; the setup screen
/// reaches it through a connector closure so a transport-backed driver can
/// plug in behind the same seam. Every call is synchronous: it either
/// completes or reports a fault, with no retry or timeout wrapping here.
#[cfg_attr(test, mockall::automock)]
pub trait ArmDriver {
    /// Joint count of the connected arm, gripper included.
    fn num_joints(&self) -> usize;

    /// Push a full mode vector; its length must equal the joint count.
    fn set_joint_modes(&mut self, modes: &[Mode]) -> Result<(), DriverError>;

    /// Command an external effort on one joint. `blocking` asks the driver
    /// to wait for the goal before returning.
    fn set_joint_external_effort(
        &mut self,
        joint_index: usize,
        effort: f64,
        blocking: bool,
    ) -> Result<(), DriverError>;

    /// Fetch the characteristics of all joints, ordered by joint index.
    fn get_joint_characteristics(&self) -> Result<Vec<JointCharacteristic>, DriverError>;

    /// Write back the characteristics of all joints in one bulk call. The
    /// driver contract is array-granular; there is no per-field write.
    fn set_joint_characteristics(
        &mut self,
        characteristics: &[JointCharacteristic],
    ) -> Result<(), DriverError>;

    /// Return the arm to a safe idle state and release the transport.
    fn cleanup(&mut self) -> Result<(), DriverError>;
}

/// Builds a configured driver from the negotiated parameters.
pub type Connector = dyn Fn(&ConnectParams) -> Result<Box<dyn ArmDriver>, DriverError>;

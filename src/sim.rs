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

//! In-process arm standing behind the `ArmDriver` seam. It enforces the same
//! call contracts a transport-backed driver would (mode-vector length,
//! mode-consistent effort commands, characteristic bounds on bulk writes) so
//! the tuning loop can be exercised end to end without hardware.

use std::net::Ipv4Addr;

use crate::characteristics::{
    EFFORT_CORRECTION_MAX, EFFORT_CORRECTION_MIN,
};
use crate::driver::{
    ArmDriver, ConnectParams, DriverError, JointCharacteristic, Mode, Model,
};

#[derive(Debug)]
pub struct SimArmDriver {
    model: Model,
    address: String,
    configured: bool,
    modes: Vec<Mode>,
    external_efforts: Vec<f64>,
    characteristics: Vec<JointCharacteristic>,
    error_state: bool,
}

impl SimArmDriver {
    /// Connect to the simulated arm. The address must be a well-formed IPv4
    /// string; anything else reports the same connection error a real
    /// transport would on a bad target.
    pub fn configure(params: &ConnectParams) -> Result<Self, DriverError> {
        let addr: Ipv4Addr = params.address.parse().map_err(|_| {
            DriverError::Connection(format!(
                "failed to reach arm at '{}': invalid IPv4 address",
                params.address
            ))
        })?;
        if addr.is_unspecified() {
            return Err(DriverError::Connection(format!(
                "failed to reach arm at '{}': host unreachable",
                addr
            )));
        }

        let n = params.model.num_joints();
        Ok(Self {
            model: params.model,
            address: params.address.clone(),
            configured: true,
            modes: vec![Mode::Idle; n],
            external_efforts: vec![0.0; n],
            characteristics: vec![JointCharacteristic::default(); n],
            error_state: false,
        })
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn external_efforts(&self) -> &[f64] {
        &self.external_efforts
    }

    fn check_configured(&self) -> Result<(), DriverError> {
        if self.configured {
            Ok(())
        } else {
            Err(DriverError::Fault("driver is not configured".to_string()))
        }
    }

    fn check_error_state(&self) -> Result<(), DriverError> {
        if self.error_state {
            Err(DriverError::Fault(
                "arm is in error state; reconnect with clear-error".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl ArmDriver for SimArmDriver {
    fn num_joints(&self) -> usize {
        self.model.num_joints()
    }

    fn set_joint_modes(&mut self, modes: &[Mode]) -> Result<(), DriverError> {
        self.check_configured()?;
        self.check_error_state()?;
        if modes.len() != self.num_joints() {
            return Err(DriverError::InvalidArgument(format!(
                "expected {} joint modes, got {}",
                self.num_joints(),
                modes.len()
            )));
        }
        self.modes.copy_from_slice(modes);
        Ok(())
    }

    fn set_joint_external_effort(
        &mut self,
        joint_index: usize,
        effort: f64,
        _blocking: bool,
    ) -> Result<(), DriverError> {
        self.check_configured()?;
        self.check_error_state()?;
        if joint_index >= self.num_joints() {
            return Err(DriverError::InvalidArgument(format!(
                "joint index {} out of range 0..{}",
                joint_index,
                self.num_joints()
            )));
        }
        // Commanding a joint whose configured mode differs drives the real
        // arm into error state; the sim does the same.
        if self.modes[joint_index] != Mode::ExternalEffort {
            self.error_state = true;
            return Err(DriverError::Fault(format!(
                "joint {} is not in external-effort mode",
                joint_index
            )));
        }
        self.external_efforts[joint_index] = effort;
        Ok(())
    }

    fn get_joint_characteristics(&self) -> Result<Vec<JointCharacteristic>, DriverError> {
        self.check_configured()?;
        Ok(self.characteristics.clone())
    }

    fn set_joint_characteristics(
        &mut self,
        characteristics: &[JointCharacteristic],
    ) -> Result<(), DriverError> {
        self.check_configured()?;
        self.check_error_state()?;
        if characteristics.len() != self.num_joints() {
            return Err(DriverError::InvalidArgument(format!(
                "expected {} joint characteristics, got {}",
                self.num_joints(),
                characteristics.len()
            )));
        }
        for (i, jc) in characteristics.iter().enumerate() {
            if jc.effort_correction < EFFORT_CORRECTION_MIN
                || jc.effort_correction > EFFORT_CORRECTION_MAX
            {
                return Err(DriverError::InvalidArgument(format!(
                    "joint {}: effort_correction {} outside [{}, {}]",
                    i, jc.effort_correction, EFFORT_CORRECTION_MIN, EFFORT_CORRECTION_MAX
                )));
            }
            if jc.friction_transition_velocity <= 0.0 {
                return Err(DriverError::InvalidArgument(format!(
                    "joint {}: friction_transition_velocity {} must be positive",
                    i, jc.friction_transition_velocity
                )));
            }
        }
        self.characteristics.clear();
        self.characteristics.extend_from_slice(characteristics);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), DriverError> {
        for m in &mut self.modes {
            *m = Mode::Idle;
        }
        for e in &mut self.external_efforts {
            *e = 0.0;
        }
        self.configured = false;
        self.error_state = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::EndEffectorKind;

    fn params(address: &str) -> ConnectParams {
        ConnectParams {
            model: Model::WxaiV0,
            end_effector: EndEffectorKind::WxaiV0Leader,
            address: address.to_string(),
            clear_error: false,
        }
    }

    #[test]
    fn test_configure_rejects_bad_address() {
        let err = SimArmDriver::configure(&params("not-an-ip")).unwrap_err();
        assert!(matches!(err, DriverError::Connection(_)));
        let err = SimArmDriver::configure(&params("0.0.0.0")).unwrap_err();
        assert!(matches!(err, DriverError::Connection(_)));
    }

    #[test]
    fn test_configure_starts_idle() {
        let sim = SimArmDriver::configure(&params("192.168.1.2")).unwrap();
        assert_eq!(sim.num_joints(), 7);
        assert!(sim.modes().iter().all(|m| *m == Mode::Idle));
    }

    #[test]
    fn test_mode_vector_length_enforced() {
        let mut sim = SimArmDriver::configure(&params("192.168.1.2")).unwrap();
        let err = sim.set_joint_modes(&[Mode::Idle; 6]).unwrap_err();
        assert!(matches!(err, DriverError::InvalidArgument(_)));
    }

    #[test]
    fn test_effort_requires_external_effort_mode() {
        let mut sim = SimArmDriver::configure(&params("192.168.1.2")).unwrap();
        let err = sim.set_joint_external_effort(0, 0.0, false).unwrap_err();
        assert!(matches!(err, DriverError::Fault(_)));
        // The arm is now faulted; further mutation is refused.
        let mut modes = vec![Mode::Idle; 7];
        modes[0] = Mode::ExternalEffort;
        assert!(sim.set_joint_modes(&modes).is_err());
    }

    #[test]
    fn test_effort_accepted_in_matching_mode() {
        let mut sim = SimArmDriver::configure(&params("192.168.1.2")).unwrap();
        let mut modes = vec![Mode::Idle; 7];
        modes[3] = Mode::ExternalEffort;
        sim.set_joint_modes(&modes).unwrap();
        sim.set_joint_external_effort(3, 0.0, false).unwrap();
        assert_eq!(sim.external_efforts()[3], 0.0);
    }

    #[test]
    fn test_characteristics_bounds_enforced_on_write() {
        let mut sim = SimArmDriver::configure(&params("192.168.1.2")).unwrap();
        let mut chars = sim.get_joint_characteristics().unwrap();

        chars[0].effort_correction = 0.1;
        assert!(sim.set_joint_characteristics(&chars).is_err());

        chars[0].effort_correction = 1.0;
        chars[1].friction_transition_velocity = 0.0;
        assert!(sim.set_joint_characteristics(&chars).is_err());

        chars[1].friction_transition_velocity = 1e-12;
        sim.set_joint_characteristics(&chars).unwrap();
        let back = sim.get_joint_characteristics().unwrap();
        assert_eq!(back[1].friction_transition_velocity, 1e-12);
    }

    #[test]
    fn test_cleanup_idles_everything() {
        let mut sim = SimArmDriver::configure(&params("192.168.1.2")).unwrap();
        let mut modes = vec![Mode::Idle; 7];
        modes[0] = Mode::ExternalEffort;
        sim.set_joint_modes(&modes).unwrap();
        sim.cleanup().unwrap();
        assert!(sim.modes().iter().all(|m| *m == Mode::Idle));
        // Cleanup releases the session; commands need a fresh configure.
        assert!(sim.set_joint_modes(&vec![Mode::Idle; 7]).is_err());
        // A second cleanup is harmless.
        sim.cleanup().unwrap();
    }
}

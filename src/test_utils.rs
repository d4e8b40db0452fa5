/*
 * Test utilities and fixture helpers for Armtune
 *
 * Common constructors shared across test modules.
 */

#[cfg(test)]
pub mod test_utils {
    use crate::app::{App, Phase};
    use crate::driver::JointCharacteristic;

    /// Characteristic set of `n` joints with per-joint distinct values so
    /// index mix-ups show up in assertions.
    pub fn make_characteristics(n: usize) -> Vec<JointCharacteristic> {
        (0..n)
            .map(|i| JointCharacteristic {
                friction_constant_term: 0.1 * i as f64,
                friction_coulomb_coef: 0.01 * i as f64,
                friction_viscous_coef: 0.001 * i as f64,
                friction_transition_velocity: 0.15,
                position_offset: 0.0,
                effort_correction: 1.0,
            })
            .collect()
    }

    /// App already in the tuning phase with a baseline in place.
    pub fn make_tuning_app(num_joints: usize) -> App {
        let mut app = App::new(None);
        app.phase = Phase::Tuning;
        app.num_joints = num_joints;
        app.baseline = make_characteristics(num_joints);
        app.characteristics = app.baseline.clone();
        app
    }
}

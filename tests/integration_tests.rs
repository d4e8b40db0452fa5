/*
 * Integration tests for Armtune
 *
 * These drive the setup state machine and the tuning command loop end to
 * end against the simulated arm, checking the safety-relevant invariants:
 * mode-swap sequencing, clamp behavior, and baseline immutability.
 */

use armtune::app::{App, Phase, SetupField};
use armtune::characteristics::{CharKind, DEFAULT_INCREMENT, MIN_INCREMENT};
use armtune::delta;
use armtune::driver::{
    ArmDriver, ConnectParams, DriverError, EndEffectorKind, JointCharacteristic, Mode, Model,
};
use armtune::events::{handle_setup_key, handle_tuning_key, SetupAction};
use armtune::handlers;
use armtune::sim::SimArmDriver;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn connect_sim(address: &str) -> SimArmDriver {
    SimArmDriver::configure(&ConnectParams {
        model: Model::WxaiV0,
        end_effector: EndEffectorKind::WxaiV0Leader,
        address: address.to_string(),
        clear_error: false,
    })
    .expect("sim connect")
}

/// Test double that records every hardware call, for sequencing checks the
/// sim cannot express.
#[derive(Default)]
struct RecordingDriver {
    num_joints: usize,
    calls: Vec<Call>,
    characteristics: Vec<JointCharacteristic>,
}

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Modes(Vec<Mode>),
    Effort(usize, f64),
    SetChars,
}

impl RecordingDriver {
    fn new(num_joints: usize) -> Self {
        Self {
            num_joints,
            calls: Vec::new(),
            characteristics: vec![JointCharacteristic::default(); num_joints],
        }
    }
}

impl ArmDriver for RecordingDriver {
    fn num_joints(&self) -> usize {
        self.num_joints
    }

    fn set_joint_modes(&mut self, modes: &[Mode]) -> Result<(), DriverError> {
        self.calls.push(Call::Modes(modes.to_vec()));
        Ok(())
    }

    fn set_joint_external_effort(
        &mut self,
        joint_index: usize,
        effort: f64,
        _blocking: bool,
    ) -> Result<(), DriverError> {
        self.calls.push(Call::Effort(joint_index, effort));
        Ok(())
    }

    fn get_joint_characteristics(&self) -> Result<Vec<JointCharacteristic>, DriverError> {
        Ok(self.characteristics.clone())
    }

    fn set_joint_characteristics(
        &mut self,
        characteristics: &[JointCharacteristic],
    ) -> Result<(), DriverError> {
        self.calls.push(Call::SetChars);
        self.characteristics = characteristics.to_vec();
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
}

#[test]
fn test_six_down_presses_wrap_to_zero_with_six_mode_swaps() {
    let mut app = App::new(None);
    let mut driver = RecordingDriver::new(6);
    handlers::begin_tuning(&mut app, &mut driver).unwrap();
    assert_eq!(app.joint_idx, 0);

    for _ in 0..6 {
        handle_tuning_key(&mut app, &mut driver, key(KeyCode::Down)).unwrap();
    }
    assert_eq!(app.joint_idx, 0);

    // Initial arm of joint 0 plus six selection changes, each an exact
    // two-step sequence: mode vector push, then zero effort on that joint.
    let expected_joints = [0usize, 1, 2, 3, 4, 5, 0];
    assert_eq!(driver.calls.len(), 2 * expected_joints.len());
    for (i, &j) in expected_joints.iter().enumerate() {
        match &driver.calls[2 * i] {
            Call::Modes(modes) => {
                assert_eq!(modes.len(), 6);
                for (k, m) in modes.iter().enumerate() {
                    let want = if k == j { Mode::ExternalEffort } else { Mode::Idle };
                    assert_eq!(*m, want, "swap {} joint {}", i, k);
                }
            }
            other => panic!("expected mode push at call {}, got {:?}", 2 * i, other),
        }
        assert_eq!(driver.calls[2 * i + 1], Call::Effort(j, 0.0));
    }
}

#[test]
fn test_failed_connect_preserves_negotiator_state() {
    let mut app = App::new(None);

    // Operator edits the address, toggles clear-error, cycles end effector.
    handle_setup_key(&mut app, key(KeyCode::Right)); // ee -> Follower
    handle_setup_key(&mut app, key(KeyCode::Down)); // focus address
    handle_setup_key(&mut app, key(KeyCode::Backspace));
    handle_setup_key(&mut app, key(KeyCode::Char('x')));
    handle_setup_key(&mut app, key(KeyCode::Down)); // focus clear-error
    handle_setup_key(&mut app, key(KeyCode::Char(' ')));
    handle_setup_key(&mut app, key(KeyCode::Down)); // focus connect
    assert_eq!(app.setup_field, SetupField::Connect);

    let action = handle_setup_key(&mut app, key(KeyCode::Enter));
    assert_eq!(action, SetupAction::Connect);

    // The address now ends in 'x', so the attempt fails like run_app's would.
    let err = SimArmDriver::configure(&app.connect_params()).unwrap_err();
    app.connect_error = err.to_string();

    assert_eq!(app.phase, Phase::Setup);
    assert_eq!(app.setup_field, SetupField::Connect);
    assert_eq!(app.address, "192.168.1.x");
    assert_eq!(app.end_effector(), EndEffectorKind::WxaiV0Follower);
    assert!(app.clear_error);
    assert!(app.connect_error.contains("192.168.1.x"));

    // Fixing the address from the same state succeeds.
    app.setup_field = SetupField::Address;
    handle_setup_key(&mut app, key(KeyCode::Backspace));
    handle_setup_key(&mut app, key(KeyCode::Char('7')));
    assert!(SimArmDriver::configure(&app.connect_params()).is_ok());
}

#[test]
fn test_baseline_immutable_across_delta_sequence() {
    let mut app = App::new(None);
    let mut driver = connect_sim("192.168.1.2");
    handlers::begin_tuning(&mut app, &mut driver).unwrap();
    let baseline = app.baseline.clone();

    for k in [
        KeyCode::Char('w'),
        KeyCode::Char('w'),
        KeyCode::Char('+'),
        KeyCode::Char('w'),
        KeyCode::Right,
        KeyCode::Char('s'),
        KeyCode::Down,
        KeyCode::Char('W'),
    ] {
        handle_tuning_key(&mut app, &mut driver, key(k)).unwrap();
    }

    assert_eq!(app.baseline, baseline);
    // And the display copy genuinely moved away from it.
    assert!(app
        .characteristics
        .iter()
        .zip(&app.baseline)
        .any(|(c, b)| c != b));
}

#[test]
fn test_displayed_delta_equals_current_minus_baseline() {
    let mut app = App::new(None);
    let mut driver = connect_sim("192.168.1.2");
    handlers::begin_tuning(&mut app, &mut driver).unwrap();

    // Nudge joint 0 friction_constant_term up three increments.
    for _ in 0..3 {
        handle_tuning_key(&mut app, &mut driver, key(KeyCode::Char('w'))).unwrap();
    }
    let d = delta::cell_delta(
        &app.characteristics,
        &app.baseline,
        0,
        CharKind::FrictionConstantTerm,
    );
    assert!((d - 3.0 * DEFAULT_INCREMENT).abs() < 1e-12);
    assert!(delta::changed(
        CharKind::FrictionConstantTerm.get(&app.characteristics[0]),
        CharKind::FrictionConstantTerm.get(&app.baseline[0]),
    ));
    // Untouched cells show zero delta.
    assert_eq!(
        delta::cell_delta(&app.characteristics, &app.baseline, 1, CharKind::PositionOffset),
        0.0
    );
}

#[test]
fn test_effort_correction_clamp_scenario() {
    let mut app = App::new(None);
    let mut driver = connect_sim("192.168.1.2");
    handlers::begin_tuning(&mut app, &mut driver).unwrap();
    app.char_idx = 5; // effort_correction, defaults to 1.0

    handlers::apply_delta(&mut app, &mut driver, -2.0).unwrap();
    assert_eq!(app.characteristics[0].effort_correction, 0.2);
    // The clamped write was accepted by the arm too.
    assert_eq!(
        driver.get_joint_characteristics().unwrap()[0].effort_correction,
        0.2
    );
}

#[test]
fn test_friction_transition_velocity_floor_scenario() {
    let mut app = App::new(None);
    let mut driver = connect_sim("192.168.1.2");
    handlers::begin_tuning(&mut app, &mut driver).unwrap();
    app.char_idx = 3; // friction_transition_velocity, defaults to 0.15

    // Bring it down to 1e-11 first, then push far past zero.
    handlers::apply_delta(&mut app, &mut driver, -(0.15 - 1e-11)).unwrap();
    assert!((app.characteristics[0].friction_transition_velocity - 1e-11).abs() < 1e-15);
    handlers::apply_delta(&mut app, &mut driver, -1.0).unwrap();
    assert_eq!(app.characteristics[0].friction_transition_velocity, 1e-12);
}

#[test]
fn test_increment_keys_schedule_and_floor() {
    let mut app = App::new(None);
    let mut driver = RecordingDriver::new(2);
    handlers::begin_tuning(&mut app, &mut driver).unwrap();

    for _ in 0..3 {
        handle_tuning_key(&mut app, &mut driver, key(KeyCode::Char('+'))).unwrap();
    }
    handle_tuning_key(&mut app, &mut driver, key(KeyCode::Char('-'))).unwrap();
    assert!((app.increment - DEFAULT_INCREMENT * 4.0).abs() < 1e-15);

    for _ in 0..64 {
        handle_tuning_key(&mut app, &mut driver, key(KeyCode::Char('-'))).unwrap();
    }
    assert_eq!(app.increment, MIN_INCREMENT);
}

#[test]
fn test_fault_propagates_and_cleanup_still_succeeds() {
    let mut app = App::new(None);
    let mut driver = connect_sim("192.168.1.2");
    handlers::begin_tuning(&mut app, &mut driver).unwrap();

    // Drive the sim into its error state the way a real arm would get
    // there: command a joint whose configured mode does not match.
    assert!(driver.set_joint_external_effort(3, 0.1, false).is_err());

    // The next nudge now fails and would unwind the tuning loop...
    assert!(handle_tuning_key(&mut app, &mut driver, key(KeyCode::Char('w'))).is_err());

    // ...but the guaranteed cleanup still returns the arm to idle.
    driver.cleanup().unwrap();
    assert!(driver.modes().iter().all(|m| *m == Mode::Idle));
}

#[test]
fn test_quit_keys_end_session_without_hardware_calls() {
    let mut app = App::new(None);
    let mut driver = RecordingDriver::new(2);
    handlers::begin_tuning(&mut app, &mut driver).unwrap();
    let calls_before = driver.calls.len();

    assert!(handle_tuning_key(&mut app, &mut driver, key(KeyCode::Char('q'))).unwrap());
    assert!(handle_tuning_key(&mut app, &mut driver, key(KeyCode::Esc)).unwrap());
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(handle_tuning_key(&mut app, &mut driver, ctrl_c).unwrap());
    assert_eq!(driver.calls.len(), calls_before);
}

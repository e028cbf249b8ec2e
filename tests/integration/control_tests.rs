//! Scenario tests for the sample → decision → actuator pipeline.
//!
//! Each scenario publishes a sample (or a settings change), runs one
//! control tick, and checks the externally observable status.

use std::sync::Arc;

use thermostat::app::service::ControlService;
use thermostat::{ControllerError, ControllerState, Mode, Status, SystemConfig};

use crate::mock_hw::{ActuatorCall, MockActuator, RecordingSink};

/// One thermostat under test with synchronous ticks.
struct Harness {
    state: Arc<ControllerState>,
    service: ControlService,
    actuator: MockActuator,
    sink: RecordingSink,
}

impl Harness {
    fn new(mode: Mode, setpoint: f32, margin: f32) -> Self {
        let config = SystemConfig {
            mode,
            setpoint,
            margin,
            telemetry_interval_secs: 0,
            ..SystemConfig::default()
        };
        let state = Arc::new(ControllerState::new(&config));
        let service = ControlService::new(state.clone(), &config);
        let mut harness = Self {
            state,
            service,
            actuator: MockActuator::new(),
            sink: RecordingSink::new(),
        };
        harness.service.start(&mut harness.sink);
        harness
    }

    fn tick(&mut self) {
        self.service.tick(&mut self.actuator, &mut self.sink);
    }

    /// Publish a sample, then run one control tick.
    fn sample(&mut self, value: f32) {
        self.state.publish_temperature(value);
        self.tick();
    }

    fn status(&self) -> Status {
        self.state.status()
    }
}

// ── Fail-safe: no data, no action ─────────────────────────────

#[test]
fn no_data_keeps_inactive_in_every_mode() {
    for mode in [Mode::Off, Mode::Heat, Mode::Cool, Mode::Auto] {
        let mut h = Harness::new(mode, 70.0, 2.0);
        for _ in 0..3 {
            h.tick();
        }
        assert_eq!(h.status(), Status::Inactive, "mode {mode:?}");
        assert_eq!(
            h.state.controller_error(),
            Some(ControllerError::NoTemperatureData)
        );
        assert!(
            h.actuator.calls.is_empty(),
            "no data must never move the actuator (mode {mode:?})"
        );
    }
}

#[test]
fn error_clears_on_first_sample() {
    let mut h = Harness::new(Mode::Heat, 70.0, 2.0);
    h.tick();
    assert_eq!(
        h.state.controller_error(),
        Some(ControllerError::NoTemperatureData)
    );
    h.sample(72.0);
    assert_eq!(h.state.controller_error(), None);
}

// ── Heating mode suite ────────────────────────────────────────

#[test]
fn heating_mode_sequence() {
    let mut h = Harness::new(Mode::Heat, 70.0, 2.0);

    // Above setpoint: inactive.
    h.sample(72.0);
    assert_eq!(h.status(), Status::Inactive);

    // Below setpoint but within margin: still inactive.
    h.sample(68.1);
    assert_eq!(h.status(), Status::Inactive);

    // Below setpoint and margin: heating.
    h.sample(67.9);
    assert_eq!(h.status(), Status::Heating);

    // Recovered into the band: still heating.
    h.sample(68.1);
    assert_eq!(h.status(), Status::Heating);

    // Just below setpoint: still heating.
    h.sample(69.9);
    assert_eq!(h.status(), Status::Heating);

    // Just above setpoint: inactive.
    h.sample(70.1);
    assert_eq!(h.status(), Status::Inactive);

    // Back below setpoint but within margin: stays inactive (hysteresis).
    h.sample(69.9);
    assert_eq!(h.status(), Status::Inactive);

    // Below the band again: heating.
    h.sample(67.9);
    assert_eq!(h.status(), Status::Heating);

    // Mode off: inactive within one tick.
    h.state.set_mode(Mode::Off);
    h.tick();
    assert_eq!(h.status(), Status::Inactive);
}

#[test]
fn heat_mode_ignores_high_temperatures() {
    let mut h = Harness::new(Mode::Heat, 70.0, 2.0);
    h.sample(100.0);
    assert_eq!(h.status(), Status::Inactive);
    assert!(h.actuator.calls.is_empty());
}

// ── Cooling mode suite ────────────────────────────────────────

#[test]
fn cooling_mode_sequence() {
    let mut h = Harness::new(Mode::Cool, 70.0, 2.0);

    // Below setpoint: inactive.
    h.sample(68.0);
    assert_eq!(h.status(), Status::Inactive);

    // Above setpoint but within margin: still inactive.
    h.sample(71.9);
    assert_eq!(h.status(), Status::Inactive);

    // Above setpoint and margin: cooling.
    h.sample(72.1);
    assert_eq!(h.status(), Status::Cooling);

    // Back into the band: still cooling.
    h.sample(71.9);
    assert_eq!(h.status(), Status::Cooling);

    // Just above setpoint: still cooling.
    h.sample(70.1);
    assert_eq!(h.status(), Status::Cooling);

    // Just below setpoint: inactive.
    h.sample(69.9);
    assert_eq!(h.status(), Status::Inactive);

    // Back above setpoint but within margin: stays inactive.
    h.sample(70.1);
    assert_eq!(h.status(), Status::Inactive);

    // Above the band again: cooling.
    h.sample(72.1);
    assert_eq!(h.status(), Status::Cooling);

    h.state.set_mode(Mode::Off);
    h.tick();
    assert_eq!(h.status(), Status::Inactive);
}

#[test]
fn cool_mode_ignores_low_temperatures() {
    let mut h = Harness::new(Mode::Cool, 70.0, 2.0);
    h.sample(30.0);
    assert_eq!(h.status(), Status::Inactive);
    assert!(h.actuator.calls.is_empty());
}

// ── Auto mode suite ───────────────────────────────────────────

#[test]
fn auto_mode_sequence() {
    let mut h = Harness::new(Mode::Auto, 70.0, 2.0);

    // At setpoint: inactive.
    h.sample(70.0);
    assert_eq!(h.status(), Status::Inactive);

    // Heating leg.
    h.sample(68.1);
    assert_eq!(h.status(), Status::Inactive);
    h.sample(67.9);
    assert_eq!(h.status(), Status::Heating);
    h.sample(69.9);
    assert_eq!(h.status(), Status::Heating);
    h.sample(70.1);
    assert_eq!(h.status(), Status::Inactive);

    // Cooling leg.
    h.sample(71.9);
    assert_eq!(h.status(), Status::Inactive);
    h.sample(72.1);
    assert_eq!(h.status(), Status::Cooling);
    h.sample(70.1);
    assert_eq!(h.status(), Status::Cooling);
    h.sample(69.9);
    assert_eq!(h.status(), Status::Inactive);

    h.state.set_mode(Mode::Off);
    h.tick();
    assert_eq!(h.status(), Status::Inactive);
}

// ── Boundary cases ────────────────────────────────────────────

#[test]
fn extreme_temperatures_pick_the_right_direction() {
    let mut h = Harness::new(Mode::Auto, 70.0, 2.0);

    h.sample(30.0);
    assert_eq!(h.status(), Status::Heating);

    h.sample(100.0);
    assert_eq!(h.status(), Status::Cooling);
}

#[test]
fn margin_shrink_makes_standing_temperature_decisive() {
    let mut h = Harness::new(Mode::Auto, 70.0, 2.0);

    // Within margin: nothing to do.
    h.sample(68.5);
    assert_eq!(h.status(), Status::Inactive);

    // Margin change alone, no new sample: next tick re-evaluates.
    h.state.set_margin(1.0);
    h.tick();
    assert_eq!(h.status(), Status::Heating);
}

#[test]
fn setpoint_drop_flips_heating_to_cooling() {
    let mut h = Harness::new(Mode::Auto, 70.0, 1.0);

    h.sample(69.0);
    h.state.set_margin(1.0);
    h.state.set_setpoint(70.5);
    h.tick();
    // 69.0 < 70.5 - 1.0, so heating.
    assert_eq!(h.status(), Status::Heating);

    // Setpoint lowered to 60 while heating at 69.0.
    h.state.set_setpoint(60.0);
    h.tick();
    assert_eq!(h.status(), Status::Cooling);

    // The supersede stops the heater before starting the cooler and
    // publishes a single Heating -> Cooling transition.
    let n = h.actuator.calls.len();
    assert_eq!(
        &h.actuator.calls[n - 2..],
        &[ActuatorCall::StopHeating, ActuatorCall::StartCooling]
    );
    assert!(h
        .sink
        .status_changes()
        .contains(&(Status::Heating, Status::Cooling)));
    assert!(
        !h.sink
            .status_changes()
            .iter()
            .any(|&(from, to)| from == Status::Heating && to == Status::Inactive),
        "no phantom Inactive between heating and cooling"
    );
}

#[test]
fn off_mode_stops_an_active_cooler() {
    let mut h = Harness::new(Mode::Cool, 70.0, 2.0);
    h.sample(80.0);
    assert_eq!(h.status(), Status::Cooling);

    h.state.set_mode(Mode::Off);
    h.tick();
    assert_eq!(h.status(), Status::Inactive);
    assert_eq!(h.actuator.last_call(), Some(ActuatorCall::StopCooling));

    // Further ticks in Off are no-ops regardless of temperature.
    let calls_before = h.actuator.calls.len();
    h.sample(100.0);
    h.sample(30.0);
    assert_eq!(h.status(), Status::Inactive);
    assert_eq!(h.actuator.calls.len(), calls_before);
}

#[test]
fn repeated_ticks_with_unchanged_inputs_are_stable() {
    let mut h = Harness::new(Mode::Heat, 70.0, 2.0);
    h.sample(67.9);
    assert_eq!(h.status(), Status::Heating);

    let calls_before = h.actuator.calls.len();
    for _ in 0..5 {
        h.tick();
    }
    assert_eq!(h.status(), Status::Heating);
    assert_eq!(
        h.actuator.calls.len(),
        calls_before,
        "stable inputs must not re-command the actuator"
    );
}

#[test]
fn settings_change_applies_on_next_tick_not_immediately() {
    let mut h = Harness::new(Mode::Heat, 70.0, 2.0);
    h.sample(67.9);
    assert_eq!(h.status(), Status::Heating);

    // Turning the mode off does nothing until the loop next wakes.
    h.state.set_mode(Mode::Off);
    assert_eq!(h.status(), Status::Heating);
    h.tick();
    assert_eq!(h.status(), Status::Inactive);
}

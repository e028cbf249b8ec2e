//! Control service: the per-tick orchestration core.
//!
//! [`ControlService`] owns the tick sequence: read the temperature cell,
//! run the pure decision, drive the actuator port, and publish status and
//! controller error back into shared state. It is hardware-agnostic; all
//! I/O flows through port traits injected at the call site, making the
//! whole service testable with mock adapters.
//!
//! ```text
//!  ControllerState ──▶ ┌────────────────────────┐ ──▶ EventSink
//!   (cells)            │     ControlService      │
//!        ActuatorPort ◀─│  decide · apply · emit │
//!                      └────────────────────────┘
//! ```

use std::sync::Arc;

use log::{debug, warn};

use crate::config::SystemConfig;
use crate::control::{decide, Action};
use crate::error::ControllerError;
use crate::state::{ControllerState, Status};

use super::events::{TelemetrySnapshot, ThermostatEvent};
use super::ports::{ActuatorPort, EventSink};

/// The control loop core. One instance per thermostat, driven at a fixed
/// cadence by the runtime (or directly by tests).
pub struct ControlService {
    state: Arc<ControllerState>,
    tick_count: u64,
    /// Telemetry cadence in ticks; 0 disables telemetry events.
    telemetry_every_ticks: u64,
    /// Edge detector for fault events: true while the last tick had
    /// no data to act on.
    fault_active: bool,
}

impl ControlService {
    pub fn new(state: Arc<ControllerState>, config: &SystemConfig) -> Self {
        let telemetry_every_ticks =
            u64::from(config.telemetry_interval_secs) * 1000 / u64::from(config.control_loop_interval_ms);
        Self {
            state,
            tick_count: 0,
            telemetry_every_ticks,
            fault_active: false,
        }
    }

    /// Announce the initial status. Call once before the first `tick`.
    pub fn start(&self, sink: &mut impl EventSink) {
        sink.emit(&ThermostatEvent::Started(self.state.status()));
    }

    /// Run one full control cycle: read sample → decide → actuate → report.
    ///
    /// At most one status write per tick. A tick without a valid sample
    /// reports `NoTemperatureData` and leaves the actuator untouched;
    /// absence of data never triggers an actuator change.
    pub fn tick(&mut self, actuator: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.tick_count += 1;
        let prev_status = self.state.status();

        match self.state.temperature() {
            None => {
                self.state
                    .set_controller_error(Some(ControllerError::NoTemperatureData));
                if !self.fault_active {
                    self.fault_active = true;
                    warn!("control tick with no temperature data, holding");
                    sink.emit(&ThermostatEvent::FaultDetected(
                        ControllerError::NoTemperatureData,
                    ));
                }
            }
            Some(temperature) => {
                self.state.set_controller_error(None);
                if self.fault_active {
                    self.fault_active = false;
                    sink.emit(&ThermostatEvent::FaultCleared);
                }

                let settings = self.state.settings();
                let action = decide(
                    settings.mode,
                    prev_status,
                    temperature,
                    settings.setpoint,
                    settings.margin,
                );
                if let Some(action) = action {
                    debug!(
                        "tick {}: {:?} at {:.2} (setpoint {:.2}, margin {:.2}) -> {:?}",
                        self.tick_count, settings.mode, temperature, settings.setpoint,
                        settings.margin, action,
                    );
                    self.apply(action, prev_status, actuator);
                }
            }
        }

        let status = self.state.status();
        if status != prev_status {
            sink.emit(&ThermostatEvent::StatusChanged {
                from: prev_status,
                to: status,
            });
        }

        if self.telemetry_every_ticks > 0 && self.tick_count % self.telemetry_every_ticks == 0 {
            sink.emit(&ThermostatEvent::Telemetry(self.snapshot()));
        }
    }

    /// Build a telemetry snapshot from the current cells.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        let settings = self.state.settings();
        TelemetrySnapshot {
            status: self.state.status(),
            mode: settings.mode,
            temperature: self.state.temperature(),
            setpoint: settings.setpoint,
            margin: settings.margin,
            error: self.state.controller_error(),
            tick_count: self.tick_count,
        }
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate a decision into port calls and the single status write.
    ///
    /// Starting one direction while the other is active stops the other
    /// device first, but the shared status moves in one write so no reader
    /// can observe a phantom `Inactive` between the two.
    fn apply(&self, action: Action, current: Status, actuator: &mut impl ActuatorPort) {
        match action {
            Action::StartHeating => {
                if current == Status::Cooling {
                    actuator.stop_cooling();
                }
                actuator.start_heating();
                self.state.set_status(Status::Heating);
            }
            Action::StartCooling => {
                if current == Status::Heating {
                    actuator.stop_heating();
                }
                actuator.start_cooling();
                self.state.set_status(Status::Cooling);
            }
            Action::StopHeating => {
                actuator.stop_heating();
                self.state.set_status(Status::Inactive);
            }
            Action::StopCooling => {
                actuator.stop_cooling();
                self.state.set_status(Status::Inactive);
            }
        }
    }
}

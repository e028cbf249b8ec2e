//! Log-backed actuator stub.
//!
//! Stands in for the physical heater/AC drivers: each port call becomes a
//! log line. A real deployment swaps this for a GPIO/relay adapter
//! implementing the same trait.

use log::info;

use crate::app::ports::ActuatorPort;

/// Adapter that logs every actuator command instead of switching hardware.
pub struct LogActuator;

impl LogActuator {
    pub fn new() -> Self {
        Self
    }
}

impl ActuatorPort for LogActuator {
    fn start_heating(&mut self) {
        info!("ACTUATOR | heater on");
    }

    fn stop_heating(&mut self) {
        info!("ACTUATOR | heater off");
    }

    fn start_cooling(&mut self) {
        info!("ACTUATOR | cooler on");
    }

    fn stop_cooling(&mut self) {
        info!("ACTUATOR | cooler off");
    }
}

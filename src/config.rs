//! System configuration parameters.
//!
//! All tunable parameters for the thermostat. Values can be overridden via
//! a JSON config file supplied by the harness; runtime setting changes go
//! through the [`Thermostat`](crate::runtime::Thermostat) facade instead.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::state::Mode;

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Initial settings ---
    /// Target temperature the controller maintains.
    pub setpoint: f32,
    /// Hysteresis band half-width around the setpoint. Must be >= 0.
    pub margin: f32,
    /// Initial operating mode.
    pub mode: Mode,

    // --- Timing ---
    /// Control loop tick interval (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Socket read timeout for the temperature listener (milliseconds).
    /// Bounds how long shutdown can take to be observed.
    pub socket_timeout_ms: u32,
    /// Telemetry report interval (seconds). 0 disables telemetry events.
    pub telemetry_interval_secs: u32,

    // --- Transport ---
    /// Local address the temperature listener binds to.
    pub listen_addr: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Initial settings
            setpoint: 72.0,
            margin: 1.0,
            mode: Mode::Off,

            // Timing
            control_loop_interval_ms: 1000, // 1 Hz
            socket_timeout_ms: 250,
            telemetry_interval_secs: 60, // 1/min

            // Transport
            listen_addr: "127.0.0.1:1234".to_string(),
        }
    }
}

impl SystemConfig {
    /// Range-check every field. Called at startup and whenever a config is
    /// hot-loaded; the runtime setters apply the same rules per field.
    pub fn validate(&self) -> Result<()> {
        if !self.setpoint.is_finite() {
            return Err(Error::Config("setpoint must be finite"));
        }
        if !self.margin.is_finite() {
            return Err(Error::Config("margin must be finite"));
        }
        if self.margin < 0.0 {
            return Err(Error::Config("margin must be >= 0"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be > 0"));
        }
        if self.socket_timeout_ms == 0 {
            return Err(Error::Config("socket_timeout_ms must be > 0"));
        }
        Ok(())
    }
}

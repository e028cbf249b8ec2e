//! Thermostat control core.
//!
//! Decides whether a heating/cooling actuator should be on, based on a
//! live temperature reading, a target setpoint, a hysteresis margin, and
//! an operating mode (off/heat/cool/auto). Two concurrent activities:
//! a UDP temperature ingestor publishing the latest sample into a shared
//! cell, and a periodic control loop applying the hysteresis decision and
//! driving the actuator port.
//!
//! The library exposes the pure-logic modules for integration testing and
//! embedding; the `thermostat` binary wires them to a logging actuator
//! stub and a Ctrl-C lifecycle.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod ingest;
pub mod runtime;
pub mod state;

mod error;

pub use config::SystemConfig;
pub use error::{ControllerError, Error, Result};
pub use runtime::{StopHandle, Thermostat};
pub use state::{ControllerState, Mode, SettingsSnapshot, Status};

//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the thermostat: per-tick
//! control orchestration and fault/telemetry reporting. All interaction
//! with the outside world happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without sockets, timers,
//! or real actuator hardware.

pub mod events;
pub mod ports;
pub mod service;

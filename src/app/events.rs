//! Outbound application events.
//!
//! The [`ControlService`](super::service::ControlService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them.

use crate::error::ControllerError;
use crate::state::{Mode, Status};

/// Structured events emitted by the control core.
#[derive(Debug, Clone)]
pub enum ThermostatEvent {
    /// The control loop has started (carries initial status).
    Started(Status),

    /// The actuation status changed this tick.
    StatusChanged { from: Status, to: Status },

    /// A control cycle had no data to act on (first occurrence only;
    /// repeated no-data ticks do not re-emit).
    FaultDetected(ControllerError),

    /// The first valid sample arrived after a fault.
    FaultCleared,

    /// Periodic telemetry snapshot.
    Telemetry(TelemetrySnapshot),
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy)]
pub struct TelemetrySnapshot {
    pub status: Status,
    pub mode: Mode,
    /// Latest sample; `None` until the first datagram arrives.
    pub temperature: Option<f32>,
    pub setpoint: f32,
    pub margin: f32,
    pub error: Option<ControllerError>,
    pub tick_count: u64,
}

//! Port traits: the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService (domain)
//! ```
//!
//! Driven adapters (actuator drivers, event sinks) implement these traits.
//! The [`ControlService`](super::service::ControlService) consumes them via
//! generics, so the domain core never touches hardware directly.

use super::events::ThermostatEvent;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the control loop calls this to command the heating
/// and cooling devices.
///
/// Calls are fire-and-forget: the control loop consults no return status
/// and reflects each call in the shared `Status` field itself. Hardware
/// error handling belongs to the implementing driver.
pub trait ActuatorPort {
    /// Turn the heating device on.
    fn start_heating(&mut self);

    /// Turn the heating device off.
    fn stop_heating(&mut self);

    /// Turn the cooling device on.
    fn start_cooling(&mut self);

    /// Turn the cooling device off.
    fn stop_cooling(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`ThermostatEvent`]s through this port.
/// Adapters decide where they go (log line, MQTT, test recorder, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &ThermostatEvent);
}

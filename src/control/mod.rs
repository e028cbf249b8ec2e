//! Control decision logic.
//!
//! Pure functions only: the decision over `(mode, status, temperature,
//! setpoint, margin)` lives here, with no knowledge of cells, ports, or
//! timing. The per-tick orchestration that feeds it is
//! [`ControlService`](crate::app::service::ControlService).

pub mod decision;

pub use decision::{decide, Action};

//! Shared controller state.
//!
//! [`ControllerState`] is the single aggregate shared between the two
//! long-running activities (temperature ingestor, control loop) and the
//! external configuration callers. Every field is an independent lock-free
//! atomic cell, so no reader can observe a torn value and no lock is ever
//! held across a suspension point.
//!
//! Writer roles are strict:
//! - temperature cell: written by the ingestor only
//! - settings cells: written by the configuration interface only
//! - status and controller-error cells: written by the control loop only
//!
//! Cross-field consistency is intentionally NOT guaranteed. A control tick
//! may observe a freshly-written setpoint together with the previous margin;
//! the next tick converges. Consolidating the cells behind one mutex would
//! buy stronger consistency at the cost of locking, and the decision rules
//! tolerate the weaker model.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::SystemConfig;
use crate::error::ControllerError;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Operator-selected permission for which actuator directions are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Mode {
    /// No actuation; any active heating/cooling is stopped within one tick.
    Off = 0,
    /// Only heating is reachable.
    Heat = 1,
    /// Only cooling is reachable.
    Cool = 2,
    /// Both directions are reachable.
    Auto = 3,
}

impl Mode {
    /// Convert a raw cell value back to `Mode`. Panics on out-of-range in
    /// debug builds; returns `Off` in release (safe fallback).
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Off,
            1 => Self::Heat,
            2 => Self::Cool,
            3 => Self::Auto,
            _ => {
                debug_assert!(false, "invalid mode value: {raw}");
                Self::Off
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// The controller's current actuation state. Exactly one of the three
/// holds at any time; the control loop is the sole writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Status {
    Inactive = 0,
    Heating = 1,
    Cooling = 2,
}

impl Status {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Inactive,
            1 => Self::Heating,
            2 => Self::Cooling,
            _ => {
                debug_assert!(false, "invalid status value: {raw}");
                Self::Inactive
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Settings snapshot
// ---------------------------------------------------------------------------

/// Point-in-time read of the three settings cells.
///
/// The three loads are independent; see the module docs for the
/// cross-field consistency caveat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingsSnapshot {
    pub mode: Mode,
    pub setpoint: f32,
    pub margin: f32,
}

// ---------------------------------------------------------------------------
// ControllerState
// ---------------------------------------------------------------------------

/// Raw controller-error cell values.
const ERR_NONE: u8 = 0;
const ERR_NO_TEMP_DATA: u8 = 1;

/// The shared state aggregate. Constructed once at startup and passed by
/// `Arc` to every activity.
///
/// These cells carry no validation: range checks on setpoint/margin belong
/// to the configuration interface in front of them.
pub struct ControllerState {
    // -- Temperature sample (writer: ingestor) --
    /// IEEE-754 bit pattern of the latest sample.
    temp_bits: AtomicU32,
    /// False until the first sample arrives; never cleared afterwards.
    temp_valid: AtomicBool,
    /// Milliseconds since `started` at which the last sample was stored.
    temp_updated_ms: AtomicU64,

    // -- Settings (writer: configuration interface) --
    setpoint_bits: AtomicU32,
    margin_bits: AtomicU32,
    mode: AtomicU8,

    // -- Outputs (writer: control loop) --
    status: AtomicU8,
    error: AtomicU8,

    /// Monotonic reference for the sample-age stamp.
    started: Instant,
}

impl ControllerState {
    /// Create the aggregate with the configured initial settings, no valid
    /// sample, `Inactive` status, and `NoTemperatureData` reported.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            temp_bits: AtomicU32::new(0.0f32.to_bits()),
            temp_valid: AtomicBool::new(false),
            temp_updated_ms: AtomicU64::new(0),
            setpoint_bits: AtomicU32::new(config.setpoint.to_bits()),
            margin_bits: AtomicU32::new(config.margin.to_bits()),
            mode: AtomicU8::new(config.mode as u8),
            status: AtomicU8::new(Status::Inactive as u8),
            error: AtomicU8::new(ERR_NO_TEMP_DATA),
            started: Instant::now(),
        }
    }

    // ── Temperature cell ──────────────────────────────────────

    /// Store a new sample and mark the cell valid.
    ///
    /// Single-writer: only the ingestor calls this. The value is published
    /// with `Release` so a reader that observes `temp_valid == true` is
    /// guaranteed to see the bits written before (or after) that flag,
    /// never an uninitialised cell.
    pub fn publish_temperature(&self, value: f32) {
        self.temp_bits.store(value.to_bits(), Ordering::Relaxed);
        self.temp_updated_ms
            .store(self.started.elapsed().as_millis() as u64, Ordering::Relaxed);
        self.temp_valid.store(true, Ordering::Release);
    }

    /// Latest sample, or `None` if nothing has ever been received.
    pub fn temperature(&self) -> Option<f32> {
        if self.temp_valid.load(Ordering::Acquire) {
            Some(f32::from_bits(self.temp_bits.load(Ordering::Relaxed)))
        } else {
            None
        }
    }

    /// Time since the last sample was stored, or `None` before the first.
    ///
    /// Purely observational: the control loop does not act on staleness,
    /// only on "never received".
    pub fn sample_age(&self) -> Option<Duration> {
        if !self.temp_valid.load(Ordering::Acquire) {
            return None;
        }
        let updated = self.temp_updated_ms.load(Ordering::Relaxed);
        let now = self.started.elapsed().as_millis() as u64;
        Some(Duration::from_millis(now.saturating_sub(updated)))
    }

    // ── Settings cells ────────────────────────────────────────

    pub fn set_setpoint(&self, value: f32) {
        self.setpoint_bits.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn setpoint(&self) -> f32 {
        f32::from_bits(self.setpoint_bits.load(Ordering::Relaxed))
    }

    pub fn set_margin(&self, value: f32) {
        self.margin_bits.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn margin(&self) -> f32 {
        f32::from_bits(self.margin_bits.load(Ordering::Relaxed))
    }

    pub fn set_mode(&self, mode: Mode) {
        self.mode.store(mode as u8, Ordering::Relaxed);
    }

    pub fn mode(&self) -> Mode {
        Mode::from_u8(self.mode.load(Ordering::Relaxed))
    }

    /// Read all three settings cells. Three independent loads.
    pub fn settings(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            mode: self.mode(),
            setpoint: self.setpoint(),
            margin: self.margin(),
        }
    }

    // ── Output cells ──────────────────────────────────────────

    /// Single-writer: only the control loop calls this.
    pub fn set_status(&self, status: Status) {
        self.status.store(status as u8, Ordering::Release);
    }

    pub fn status(&self) -> Status {
        Status::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Single-writer: only the control loop calls this, once per tick.
    pub fn set_controller_error(&self, error: Option<ControllerError>) {
        let raw = match error {
            None => ERR_NONE,
            Some(ControllerError::NoTemperatureData) => ERR_NO_TEMP_DATA,
        };
        self.error.store(raw, Ordering::Release);
    }

    pub fn controller_error(&self) -> Option<ControllerError> {
        match self.error.load(Ordering::Acquire) {
            ERR_NONE => None,
            ERR_NO_TEMP_DATA => Some(ControllerError::NoTemperatureData),
            raw => {
                debug_assert!(false, "invalid error value: {raw}");
                None
            }
        }
    }
}

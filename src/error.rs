//! Unified error types for the thermostat core.
//!
//! Follows a single-funnel design: every fallible operation in the library
//! converts into the crate-level [`Error`], keeping error handling uniform
//! at the API boundary. All variants are `Copy` so they can be cheaply
//! passed around without allocation.
//!
//! The controller's only runtime fault, [`ControllerError::NoTemperatureData`],
//! is deliberately NOT part of [`Error`]: it is a queryable state value that
//! the control loop overwrites every cycle, never a propagated failure.

use core::fmt;

// ---------------------------------------------------------------------------
// Crate-level error
// ---------------------------------------------------------------------------

/// Every fallible library operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A configuration value failed range validation.
    /// The `&'static str` describes which field and why.
    Config(&'static str),
    /// A transport operation (socket bind, thread spawn) failed.
    Transport(std::io::ErrorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Transport(kind) => write!(f, "transport: {kind}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Transport(e.kind())
    }
}

// ---------------------------------------------------------------------------
// Controller error (queryable state, not a fault)
// ---------------------------------------------------------------------------

/// Condition reported by the most recent control cycle.
///
/// Exposed through `controller_error()` as `Option<ControllerError>`:
/// `None` means the last cycle had a valid sample to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// No temperature sample has ever been received. The control loop
    /// takes no actuator action while this condition holds.
    NoTemperatureData,
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTemperatureData => write!(f, "no temperature data"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

//! Hysteresis decision function.
//!
//! One decision per control tick. The rules run in strict priority order
//! and at most one fires:
//!
//! ```text
//!  1. Off                                        -> stop whatever is active
//!  2. Cool|Auto, temp > setpoint + margin        -> start cooling
//!  3. Heat|Auto, temp < setpoint - margin        -> start heating
//!  4. Heating,   temp >= setpoint                -> stop heating
//!  5. Cooling,   temp <= setpoint                -> stop cooling
//!  6. otherwise                                  -> hold
//! ```
//!
//! Start thresholds sit a full margin beyond the setpoint while stop
//! thresholds sit on the bare setpoint. The asymmetry is what prevents the
//! actuator from chattering when the temperature hovers near the target:
//! once started, actuation runs until the setpoint itself is crossed.
//!
//! With a NaN temperature every comparison is false and the rules fall
//! through to "hold"; invalid samples never move the actuator.

use crate::state::{Mode, Status};

/// Actuator action requested by a single decision.
///
/// `Start*` from the opposite active state implies leaving that state
/// first; the service collapses this into one status write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartHeating,
    StopHeating,
    StartCooling,
    StopCooling,
}

/// Decide what the actuator should do this tick, or `None` to hold.
///
/// Pure and total: no side effects, defined for every input including
/// non-finite temperatures.
pub fn decide(
    mode: Mode,
    status: Status,
    temperature: f32,
    setpoint: f32,
    margin: f32,
) -> Option<Action> {
    // Exhaustive on Mode: adding a mode variant fails to compile until the
    // gating here is decided.
    let (heat_allowed, cool_allowed) = match mode {
        Mode::Off => {
            return match status {
                Status::Heating => Some(Action::StopHeating),
                Status::Cooling => Some(Action::StopCooling),
                Status::Inactive => None,
            };
        }
        Mode::Heat => (true, false),
        Mode::Cool => (false, true),
        Mode::Auto => (true, true),
    };

    if cool_allowed && temperature > setpoint + margin && status != Status::Cooling {
        return Some(Action::StartCooling);
    }
    if heat_allowed && temperature < setpoint - margin && status != Status::Heating {
        return Some(Action::StartHeating);
    }
    if status == Status::Heating && temperature >= setpoint {
        return Some(Action::StopHeating);
    }
    if status == Status::Cooling && temperature <= setpoint {
        return Some(Action::StopCooling);
    }

    None
}

//! Temperature ingestor.
//!
//! The write side of the temperature cell: one `accept_sample` call per
//! inbound message. No processing, no buffering, no validation of the
//! value itself; range policy (if any) belongs to whatever feeds this.

use std::sync::Arc;

use log::debug;

use crate::state::ControllerState;

/// Wire format: one host-endian IEEE-754 `f32` per datagram.
pub const SAMPLE_LEN: usize = 4;

/// Decode a single temperature sample from a raw datagram payload.
///
/// Returns `None` unless the payload is exactly [`SAMPLE_LEN`] bytes;
/// framing errors are the transport's concern and are dropped there.
pub fn decode_sample(payload: &[u8]) -> Option<f32> {
    let bytes: [u8; SAMPLE_LEN] = payload.try_into().ok()?;
    Some(f32::from_ne_bytes(bytes))
}

/// Writer handle for the shared temperature cell.
///
/// Cheap to clone; every clone publishes into the same cell. By convention
/// a single transport task holds the only live handle (single-writer role).
#[derive(Clone)]
pub struct TemperatureIngestor {
    state: Arc<ControllerState>,
}

impl TemperatureIngestor {
    pub fn new(state: Arc<ControllerState>) -> Self {
        Self { state }
    }

    /// Accept an externally-supplied sample and publish it.
    ///
    /// Overwrites the previous sample and marks the cell valid. NaN and
    /// out-of-range values pass through untouched; the decision rules treat
    /// non-finite samples as "hold".
    pub fn accept_sample(&self, value: f32) {
        debug!("sample accepted: {value:.2}");
        self.state.publish_temperature(value);
    }
}

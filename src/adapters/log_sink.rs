//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger. A future MQTT or home-automation adapter would implement
//! the same trait.

use log::info;

use crate::app::events::ThermostatEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ThermostatEvent`] as one line.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ThermostatEvent) {
        match event {
            ThermostatEvent::Started(status) => {
                info!("START | initial_status={status:?}");
            }
            ThermostatEvent::StatusChanged { from, to } => {
                info!("STATUS | {from:?} -> {to:?}");
            }
            ThermostatEvent::FaultDetected(err) => {
                info!("FAULT | detected: {err}");
            }
            ThermostatEvent::FaultCleared => {
                info!("FAULT | cleared");
            }
            ThermostatEvent::Telemetry(t) => {
                info!(
                    "TELEM | status={:?} | mode={:?} | temp={} | setpoint={:.1} \
                     margin={:.1} | err={} | tick={}",
                    t.status,
                    t.mode,
                    t.temperature
                        .map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}")),
                    t.setpoint,
                    t.margin,
                    t.error.map_or_else(|| "none".to_string(), |e| e.to_string()),
                    t.tick_count,
                );
            }
        }
    }
}

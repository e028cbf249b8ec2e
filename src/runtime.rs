//! Process runtime: thread lifecycle and the public facade.
//!
//! [`Thermostat`] wires the two long-running activities together:
//!
//! ```text
//!  UDP listener thread ──▶ temperature cell ──▶ control loop thread
//!                                                    │
//!  configuration calls ──▶ settings cells ───────────┤
//!                                                    ▼
//!                              status / error cells ──▶ observers
//! ```
//!
//! Both threads poll a shared running flag: the control loop once per tick,
//! the listener once per socket timeout. [`Thermostat::shutdown`] clears
//! the flag and joins both, so no thread outlives the facade.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{info, warn};

use crate::app::ports::{ActuatorPort, EventSink};
use crate::app::service::ControlService;
use crate::config::SystemConfig;
use crate::error::{ControllerError, Error, Result};
use crate::ingest::TemperatureIngestor;
use crate::state::{ControllerState, Mode, Status};
use crate::adapters::udp::UdpListener;

// ───────────────────────────────────────────────────────────────
// Stop handle
// ───────────────────────────────────────────────────────────────

/// Cloneable handle that requests shutdown of a running [`Thermostat`].
///
/// Safe to use from a signal handler: requesting a stop is a single atomic
/// store.
#[derive(Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Ask both loops to exit at their next wake-up.
    pub fn request_stop(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

// ───────────────────────────────────────────────────────────────
// Thermostat
// ───────────────────────────────────────────────────────────────

/// A running thermostat: control loop + temperature listener + the shared
/// state they communicate through.
///
/// The facade is also the external configuration interface: setters write
/// the settings cells directly and take effect on the next control tick,
/// never mid-cycle.
pub struct Thermostat {
    state: Arc<ControllerState>,
    running: Arc<AtomicBool>,
    listen_addr: SocketAddr,
    control_handle: Option<JoinHandle<()>>,
    listener_handle: Option<JoinHandle<()>>,
}

impl Thermostat {
    /// Validate the configuration, bind the listener, and start both
    /// threads.
    ///
    /// The actuator and sink move into the control thread; tests that need
    /// to inspect them drive [`ControlService`] directly instead.
    pub fn spawn<A, S>(config: SystemConfig, actuator: A, sink: S) -> Result<Self>
    where
        A: ActuatorPort + Send + 'static,
        S: EventSink + Send + 'static,
    {
        config.validate()?;

        let state = Arc::new(ControllerState::new(&config));
        let running = Arc::new(AtomicBool::new(true));

        let listener = UdpListener::bind(
            &config.listen_addr,
            Duration::from_millis(u64::from(config.socket_timeout_ms)),
            TemperatureIngestor::new(state.clone()),
            running.clone(),
        )?;
        let listen_addr = listener.local_addr();
        let listener_handle = thread::Builder::new()
            .name("thermostat-ingest".into())
            .spawn(move || listener.run())?;

        let mut service = ControlService::new(state.clone(), &config);
        let tick = Duration::from_millis(u64::from(config.control_loop_interval_ms));
        let control_running = running.clone();
        let control_handle = thread::Builder::new()
            .name("thermostat-control".into())
            .spawn(move || {
                let mut actuator = actuator;
                let mut sink = sink;
                service.start(&mut sink);
                while control_running.load(Ordering::Relaxed) {
                    service.tick(&mut actuator, &mut sink);
                    thread::sleep(tick);
                }
                info!("control loop stopped after {} ticks", service.tick_count());
            })?;

        Ok(Self {
            state,
            running,
            listen_addr,
            control_handle: Some(control_handle),
            listener_handle: Some(listener_handle),
        })
    }

    // ── Configuration interface ───────────────────────────────

    /// Set the operating mode. Takes effect on the next tick.
    pub fn set_mode(&self, mode: Mode) {
        self.state.set_mode(mode);
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Set the target setpoint. Rejects non-finite values.
    pub fn set_setpoint(&self, setpoint: f32) -> Result<()> {
        if !setpoint.is_finite() {
            return Err(Error::Config("setpoint must be finite"));
        }
        self.state.set_setpoint(setpoint);
        Ok(())
    }

    pub fn setpoint(&self) -> f32 {
        self.state.setpoint()
    }

    /// Set the hysteresis margin. Rejects non-finite or negative values.
    pub fn set_margin(&self, margin: f32) -> Result<()> {
        if !margin.is_finite() {
            return Err(Error::Config("margin must be finite"));
        }
        if margin < 0.0 {
            return Err(Error::Config("margin must be >= 0"));
        }
        self.state.set_margin(margin);
        Ok(())
    }

    pub fn margin(&self) -> f32 {
        self.state.margin()
    }

    // ── Observability interface ───────────────────────────────

    /// Current actuation status.
    pub fn status(&self) -> Status {
        self.state.status()
    }

    /// Error reported by the most recent control cycle.
    pub fn controller_error(&self) -> Option<ControllerError> {
        self.state.controller_error()
    }

    /// Latest temperature sample, or `None` before the first datagram.
    pub fn current_temperature(&self) -> Option<f32> {
        self.state.temperature()
    }

    /// Age of the latest sample. Observational only; see the design notes.
    pub fn sample_age(&self) -> Option<Duration> {
        self.state.sample_age()
    }

    /// Address the temperature listener is bound to (resolves port 0).
    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Handle for requesting shutdown from another context (e.g. a signal
    /// handler).
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.running.clone())
    }

    /// Block until both threads exit. Returns once a stop has been
    /// requested via a [`StopHandle`] and observed.
    pub fn wait(mut self) {
        self.join_threads();
    }

    /// Request shutdown and join both threads.
    pub fn shutdown(mut self) {
        self.running.store(false, Ordering::Relaxed);
        self.join_threads();
    }

    fn join_threads(&mut self) {
        if let Some(handle) = self.control_handle.take() {
            if handle.join().is_err() {
                warn!("control thread panicked");
            }
        }
        if let Some(handle) = self.listener_handle.take() {
            if handle.join().is_err() {
                warn!("listener thread panicked");
            }
        }
    }
}

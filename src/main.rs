//! Thermostat daemon entry point.
//!
//! Harness around the control core: CLI parsing, logging, config file
//! loading, and signal-driven shutdown. All control semantics live in the
//! library; this binary only wires adapters to the runtime.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use thermostat::adapters::log_actuator::LogActuator;
use thermostat::adapters::log_sink::LogEventSink;
use thermostat::{SystemConfig, Thermostat};

/// Hysteresis thermostat daemon with a UDP temperature feed.
#[derive(Parser, Debug)]
#[command(name = "thermostat", version, about, long_about = None)]
struct Args {
    /// Path to a JSON config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the temperature listener bind address
    #[arg(short, long)]
    listen: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<SystemConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            let config: SystemConfig = serde_json::from_str(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))?;
            info!("config loaded from {}", path.display());
            config
        }
        None => {
            warn!("no config file given, using defaults");
            SystemConfig::default()
        }
    };
    if let Some(listen) = &args.listen {
        config.listen_addr.clone_from(listen);
    }
    config.validate().context("validating configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    info!("thermostat v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    info!(
        "listening on {} | tick {}ms | setpoint {:.1} margin {:.1} mode {:?}",
        config.listen_addr,
        config.control_loop_interval_ms,
        config.setpoint,
        config.margin,
        config.mode,
    );

    let thermostat = Thermostat::spawn(config, LogActuator::new(), LogEventSink::new())
        .context("starting thermostat")?;

    let stop = thermostat.stop_handle();
    ctrlc::set_handler(move || {
        info!("shutdown signal received");
        stop.request_stop();
    })
    .context("installing signal handler")?;

    thermostat.wait();
    info!("shutdown complete");
    Ok(())
}

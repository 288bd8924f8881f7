//! # smarthome — control panel process
//!
//! Composition root that wires the devices into a controller and runs the
//! console panel on stdin/stdout.
//!
//! ## Responsibilities
//! - Load configuration (`smarthome.toml`, optional)
//! - Initialise logging to stderr
//! - Construct the light, thermostat and lock, and build the controller
//! - Run the console panel until the user quits or input ends
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use smarthome_adapter_console::{ConsolePanel, PanelHandles};
use smarthome_app::SmartHome;
use smarthome_domain::device::{Device, Light, Lock, Thermostat};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .with_writer(std::io::stderr)
        .init();

    let (home, handles) = assemble(&config);
    tracing::info!(devices = home.len(), "smart home ready");

    let stdin = std::io::stdin();
    ConsolePanel::new(home, handles, stdin.lock(), std::io::stdout()).run()?;

    Ok(())
}

/// Build the controller in panel order: light, thermostat, lock.
fn assemble(config: &Config) -> (SmartHome, PanelHandles) {
    let light = Light::new(config.light.on);
    let thermostat = Thermostat::new(config.thermostat.degrees)
        .with_night_degrees(config.thermostat.night_degrees)
        .with_eco_degrees(config.thermostat.eco_degrees);
    let lock = Lock::new(config.lock.locked).with_lock_on_sleep(config.modes.lock_on_sleep);

    let handles = PanelHandles {
        light: light.id(),
        lock: lock.id(),
        thermostat: thermostat.id(),
    };
    let home = SmartHome::builder()
        .add_device(light)
        .add_device(thermostat)
        .add_device(lock)
        .build();

    (home, handles)
}

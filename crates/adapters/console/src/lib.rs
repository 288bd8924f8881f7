//! # smarthome-adapter-console
//!
//! Text-mode control panel for a [`SmartHome`].
//!
//! Each input line is parsed into a [`Command`], and each command maps to
//! exactly one controller operation. After every state-changing command the
//! panel re-reads the affected devices through the controller and prints
//! them. The panel owns no state of its own beyond the device handles.
//!
//! ## Dependency rule
//!
//! Depends on `smarthome-app` and `smarthome-domain` only.

mod command;

use std::io::{BufRead, Write};

use smarthome_app::SmartHome;
use smarthome_domain::device::DeviceKind;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::DeviceId;
use smarthome_domain::state::StateValue;

pub use command::{Command, CommandError};

const HELP: &str = "\
commands:
  light on|off           switch the light
  lock lock|unlock       lock or unlock the door (alias: door)
  thermostat <degrees>   set the temperature (alias: temp)
  mode <name>            broadcast a mode (sleep, vacation, ...)
  status                 show every device
  help                   show this message
  quit                   leave the panel (alias: exit)";

/// Handles of the devices the panel has controls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelHandles {
    pub light: DeviceId,
    pub lock: DeviceId,
    pub thermostat: DeviceId,
}

/// Errors that end a console session.
///
/// Bad input and controller errors are reported on the console and do not
/// end the session; only a broken terminal does.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("console I/O failed")]
    Io(#[from] std::io::Error),
}

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented control panel over a reader and a writer.
pub struct ConsolePanel<R, W> {
    home: SmartHome,
    handles: PanelHandles,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePanel<R, W> {
    pub fn new(home: SmartHome, handles: PanelHandles, input: R, output: W) -> Self {
        Self {
            home,
            handles,
            input,
            output,
        }
    }

    /// Read and execute commands until `quit` or end of input, then hand the
    /// controller back.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if reading or writing the console fails.
    pub fn run(mut self) -> Result<SmartHome, ConsoleError> {
        writeln!(self.output, "Smart Home Control System (type `help` for commands)")?;
        self.render_status()?;

        let mut raw = Vec::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            raw.clear();
            if self.input.read_until(b'\n', &mut raw)? == 0 {
                writeln!(self.output)?;
                break;
            }

            // Undecodable bytes become U+FFFD and fail to parse like any typo.
            let line = String::from_utf8_lossy(&raw);
            let flow = match line.parse::<Command>() {
                Ok(command) => self.execute(command)?,
                Err(CommandError::Empty) => Flow::Continue,
                Err(err) => {
                    tracing::debug!(error = %err, "rejected console input");
                    writeln!(self.output, "Invalid input: {err}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }

        tracing::info!("console session closed");
        Ok(self.home)
    }

    /// Execute one command against the controller and print the outcome.
    ///
    /// Controller failures are printed, not returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if writing the console fails.
    pub fn execute(&mut self, command: Command) -> Result<Flow, ConsoleError> {
        match command {
            Command::Light(on) => {
                self.apply(|home, handles| {
                    home.set_device_state(handles.light, StateValue::Bool(on))
                })?;
                self.render_light()?;
            }
            Command::Lock(locked) => {
                self.apply(|home, handles| {
                    home.set_device_state(handles.lock, StateValue::Bool(locked))
                })?;
                self.render_lock()?;
            }
            Command::Thermostat(degrees) => {
                self.apply(|home, handles| {
                    home.set_device_state(handles.thermostat, StateValue::Degrees(degrees))
                })?;
                self.render_thermostat()?;
            }
            Command::Mode(name) => {
                self.apply(|home, _| home.send_message(&name))?;
                self.render_status()?;
            }
            Command::Status => self.render_status()?,
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    #[must_use]
    pub fn home(&self) -> &SmartHome {
        &self.home
    }

    fn apply(
        &mut self,
        operation: impl FnOnce(&mut SmartHome, PanelHandles) -> Result<(), SmartHomeError>,
    ) -> Result<(), ConsoleError> {
        if let Err(err) = operation(&mut self.home, self.handles) {
            self.report(&err)?;
        }
        Ok(())
    }

    fn report(&mut self, err: &SmartHomeError) -> Result<(), ConsoleError> {
        tracing::warn!(error = %err, "controller rejected command");
        write!(self.output, "Error: {err}")?;
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            write!(self.output, ": {cause}")?;
            source = std::error::Error::source(cause);
        }
        if let SmartHomeError::ModeHandlerFailure(broadcast) = err {
            for failure in &broadcast.failures {
                let name = self
                    .home
                    .device(failure.device)
                    .map_or("unknown device", |device| device.name());
                write!(self.output, "\n  {name}: {}", failure.error)?;
                if let Some(cause) = std::error::Error::source(&failure.error) {
                    write!(self.output, ": {cause}")?;
                }
            }
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn render_status(&mut self) -> Result<(), ConsoleError> {
        self.render_light()?;
        self.render_lock()?;
        self.render_thermostat()
    }

    /// State behind `handle`, if it is registered and of the expected kind.
    fn reading(&self, handle: DeviceId, kind: DeviceKind) -> Option<StateValue> {
        self.home
            .device(handle)
            .filter(|device| device.kind() == kind)
            .map(|device| device.state())
    }

    fn render_light(&mut self) -> Result<(), ConsoleError> {
        match self.reading(self.handles.light, DeviceKind::Light) {
            Some(StateValue::Bool(on)) => {
                writeln!(self.output, "Light is {}", if on { "ON" } else { "OFF" })?;
            }
            _ => writeln!(self.output, "Light is unavailable")?,
        }
        Ok(())
    }

    fn render_lock(&mut self) -> Result<(), ConsoleError> {
        match self.reading(self.handles.lock, DeviceKind::Lock) {
            Some(StateValue::Bool(locked)) => {
                let label = if locked { "LOCKED" } else { "UNLOCKED" };
                writeln!(self.output, "Door is {label}")?;
            }
            _ => writeln!(self.output, "Door is unavailable")?,
        }
        Ok(())
    }

    fn render_thermostat(&mut self) -> Result<(), ConsoleError> {
        match self.reading(self.handles.thermostat, DeviceKind::Thermostat) {
            Some(StateValue::Degrees(degrees)) => {
                writeln!(self.output, "Temperature: {degrees}\u{b0}C")?;
            }
            _ => writeln!(self.output, "Temperature: unavailable")?,
        }
        Ok(())
    }
}

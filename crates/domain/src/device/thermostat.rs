//! Thermostat — an unbounded integer setpoint with night and eco presets.
//!
//! `Sleep` lowers the setpoint to the night preset (never raises it) and
//! `Vacation` sets the eco preset. Both are idempotent.

use crate::error::{InvalidStateError, ModeError};
use crate::id::DeviceId;
use crate::mode::Mode;
use crate::state::StateValue;

use super::{Device, DeviceKind, expect_degrees};

pub const DEFAULT_DEGREES: i32 = 20;
pub const DEFAULT_NIGHT_DEGREES: i32 = 18;
pub const DEFAULT_ECO_DEGREES: i32 = 16;

/// A thermostat holding a setpoint in whole degrees Celsius.
///
/// No range is enforced: any `i32` is accepted as a setpoint.
#[derive(Debug, Clone)]
pub struct Thermostat {
    id: DeviceId,
    name: String,
    degrees: i32,
    night_degrees: i32,
    eco_degrees: i32,
}

impl Default for Thermostat {
    fn default() -> Self {
        Self::new(DEFAULT_DEGREES)
    }
}

impl Thermostat {
    #[must_use]
    pub fn new(degrees: i32) -> Self {
        Self {
            id: DeviceId::new(),
            name: "Thermostat".to_string(),
            degrees,
            night_degrees: DEFAULT_NIGHT_DEGREES,
            eco_degrees: DEFAULT_ECO_DEGREES,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Setpoint ceiling applied by `Sleep`.
    #[must_use]
    pub fn with_night_degrees(mut self, degrees: i32) -> Self {
        self.night_degrees = degrees;
        self
    }

    /// Setpoint applied by `Vacation`.
    #[must_use]
    pub fn with_eco_degrees(mut self, degrees: i32) -> Self {
        self.eco_degrees = degrees;
        self
    }

    #[must_use]
    pub fn degrees(&self) -> i32 {
        self.degrees
    }

    /// Set an absolute temperature.
    pub fn adjust_temperature(&mut self, degrees: i32) {
        self.degrees = degrees;
    }
}

impl Device for Thermostat {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Thermostat
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> StateValue {
        StateValue::Degrees(self.degrees)
    }

    fn set_state(&mut self, value: StateValue) -> Result<(), InvalidStateError> {
        self.adjust_temperature(expect_degrees(value)?);
        Ok(())
    }

    fn apply_mode(&mut self, mode: &Mode) -> Result<(), ModeError> {
        match mode {
            Mode::Sleep => self.degrees = self.degrees.min(self.night_degrees),
            Mode::Vacation => self.degrees = self.eco_degrees,
            Mode::Other(_) => {}
        }
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn Device> {
        Box::new(self.clone())
    }
}

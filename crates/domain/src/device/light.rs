//! Light — switched off by both `Sleep` and `Vacation`.

use crate::error::{InvalidStateError, ModeError};
use crate::id::DeviceId;
use crate::mode::Mode;
use crate::state::StateValue;

use super::{Device, DeviceKind, expect_bool};

/// A light that is either on or off.
#[derive(Debug, Clone)]
pub struct Light {
    id: DeviceId,
    name: String,
    on: bool,
}

impl Default for Light {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Light {
    #[must_use]
    pub fn new(on: bool) -> Self {
        Self {
            id: DeviceId::new(),
            name: "Light".to_string(),
            on,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Device for Light {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Light
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> StateValue {
        StateValue::Bool(self.on)
    }

    fn set_state(&mut self, value: StateValue) -> Result<(), InvalidStateError> {
        self.on = expect_bool(value)?;
        Ok(())
    }

    fn apply_mode(&mut self, mode: &Mode) -> Result<(), ModeError> {
        match mode {
            Mode::Sleep | Mode::Vacation => self.on = false,
            Mode::Other(_) => {}
        }
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn Device> {
        Box::new(self.clone())
    }
}

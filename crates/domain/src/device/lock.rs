//! Door lock — locks on `Vacation`; `Sleep` only locks when enabled.

use crate::error::{InvalidStateError, ModeError};
use crate::id::DeviceId;
use crate::mode::Mode;
use crate::state::StateValue;

use super::{Device, DeviceKind, expect_bool};

/// A door lock that is either locked or unlocked.
#[derive(Debug, Clone)]
pub struct Lock {
    id: DeviceId,
    name: String,
    locked: bool,
    lock_on_sleep: bool,
}

impl Default for Lock {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Lock {
    #[must_use]
    pub fn new(locked: bool) -> Self {
        Self {
            id: DeviceId::new(),
            name: "Door Lock".to_string(),
            locked,
            lock_on_sleep: false,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Also lock the door when `Sleep` is broadcast. Off by default.
    #[must_use]
    pub fn with_lock_on_sleep(mut self, lock_on_sleep: bool) -> Self {
        self.lock_on_sleep = lock_on_sleep;
        self
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Device for Lock {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Lock
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> StateValue {
        StateValue::Bool(self.locked)
    }

    fn set_state(&mut self, value: StateValue) -> Result<(), InvalidStateError> {
        self.locked = expect_bool(value)?;
        Ok(())
    }

    fn apply_mode(&mut self, mode: &Mode) -> Result<(), ModeError> {
        match mode {
            Mode::Vacation => self.locked = true,
            Mode::Sleep if self.lock_on_sleep => self.locked = true,
            Mode::Sleep | Mode::Other(_) => {}
        }
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn Device> {
        Box::new(self.clone())
    }
}

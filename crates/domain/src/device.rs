//! Device — a unit of controllable state.
//!
//! Every device exposes the same contract: read its state, overwrite its
//! state, and react to a broadcast [`Mode`]. Each implementation keeps its
//! state private and decides alone what a mode means to it.

mod light;
mod lock;
mod thermostat;

pub use light::Light;
pub use lock::Lock;
pub use thermostat::{DEFAULT_DEGREES, DEFAULT_ECO_DEGREES, DEFAULT_NIGHT_DEGREES, Thermostat};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidStateError, ModeError};
use crate::id::DeviceId;
use crate::mode::Mode;
use crate::state::{StateKind, StateValue};

/// The family a device belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Light,
    Lock,
    Thermostat,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Lock => f.write_str("lock"),
            Self::Thermostat => f.write_str("thermostat"),
        }
    }
}

/// The uniform contract every registered device satisfies.
pub trait Device: fmt::Debug {
    /// Stable handle, assigned when the device is constructed.
    fn id(&self) -> DeviceId;

    fn kind(&self) -> DeviceKind;

    /// Human-readable name used in logs and the control panel.
    fn name(&self) -> &str;

    /// Current observable state. No side effects.
    fn state(&self) -> StateValue;

    /// Overwrite the device state.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError`] when `value` is of the wrong kind for
    /// this device; the device is left unchanged.
    fn set_state(&mut self, value: StateValue) -> Result<(), InvalidStateError>;

    /// React to a broadcast mode. Unrecognised modes are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError`] when the device hits an internal fault while
    /// applying the mode. The built-in devices never fail.
    fn apply_mode(&mut self, mode: &Mode) -> Result<(), ModeError>;

    /// Clone into a new boxed trait object with the same handle and state.
    fn boxed_clone(&self) -> Box<dyn Device>;
}

impl Clone for Box<dyn Device> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// Check a value's kind against the one a device expects.
pub(crate) fn expect_bool(value: StateValue) -> Result<bool, InvalidStateError> {
    value.as_bool().ok_or(InvalidStateError {
        expected: StateKind::Bool,
        actual: value.kind(),
    })
}

pub(crate) fn expect_degrees(value: StateValue) -> Result<i32, InvalidStateError> {
    value.as_degrees().ok_or(InvalidStateError {
        expected: StateKind::Degrees,
        actual: value.kind(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_kind_as_lowercase_name() {
        let json = serde_json::to_string(&DeviceKind::Thermostat).unwrap();
        assert_eq!(json, "\"thermostat\"");
        let parsed: DeviceKind = serde_json::from_str("\"lock\"").unwrap();
        assert_eq!(parsed, DeviceKind::Lock);
    }

    #[test]
    fn should_display_kind_as_lowercase_name() {
        assert_eq!(DeviceKind::Light.to_string(), "light");
    }

    #[test]
    fn should_keep_kind_when_cloning_boxed_device() {
        let original: Box<dyn Device> = Box::new(Lock::default());
        assert_eq!(original.clone().kind(), DeviceKind::Lock);
    }

    #[test]
    fn should_keep_handle_and_state_when_cloning_boxed_device() {
        let original: Box<dyn Device> = Box::new(Thermostat::new(23));
        let copy = original.clone();
        assert_eq!(copy.id(), original.id());
        assert_eq!(copy.state(), StateValue::Degrees(23));
    }

    #[test]
    fn should_not_share_state_between_boxed_clones() {
        let original: Box<dyn Device> = Box::new(Light::new(false));
        let mut copy = original.clone();
        copy.set_state(StateValue::Bool(true)).unwrap();
        assert_eq!(original.state(), StateValue::Bool(false));
    }
}

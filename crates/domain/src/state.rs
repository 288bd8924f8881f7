//! Observable device state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The current state of a device, as read or written through the
/// [`Device`](crate::device::Device) contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// On/off or locked/unlocked.
    Bool(bool),
    /// Temperature setpoint in whole degrees Celsius.
    Degrees(i32),
}

impl StateValue {
    #[must_use]
    pub fn kind(self) -> StateKind {
        match self {
            Self::Bool(_) => StateKind::Bool,
            Self::Degrees(_) => StateKind::Degrees,
        }
    }

    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(value),
            Self::Degrees(_) => None,
        }
    }

    #[must_use]
    pub fn as_degrees(self) -> Option<i32> {
        match self {
            Self::Degrees(value) => Some(value),
            Self::Bool(_) => None,
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for StateValue {
    fn from(value: i32) -> Self {
        Self::Degrees(value)
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => value.fmt(f),
            Self::Degrees(value) => write!(f, "{value}\u{b0}C"),
        }
    }
}

/// The shape of a [`StateValue`], used to report type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Bool,
    Degrees,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("boolean"),
            Self::Degrees => f.write_str("degrees"),
        }
    }
}

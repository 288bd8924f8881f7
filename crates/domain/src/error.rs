//! Error types used across the workspace.
//!
//! Each failure has its own typed error; [`SmartHomeError`] wraps them via
//! `#[from]` so callers can match on the category.

use crate::id::DeviceId;
use crate::mode::Mode;
use crate::state::StateKind;

/// Top-level error returned by controller operations.
#[derive(Debug, thiserror::Error)]
pub enum SmartHomeError {
    #[error("device not registered")]
    DeviceNotRegistered(#[from] NotRegisteredError),

    #[error("invalid state value")]
    InvalidState(#[from] InvalidStateError),

    #[error("mode handler failure")]
    ModeHandlerFailure(#[from] BroadcastError),
}

/// The handle does not belong to any device owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device {id} is not registered")]
pub struct NotRegisteredError {
    pub id: DeviceId,
}

/// A state value of the wrong kind was written to a device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a {expected} state, got {actual}")]
pub struct InvalidStateError {
    pub expected: StateKind,
    pub actual: StateKind,
}

/// A device could not apply a mode.
#[derive(Debug, thiserror::Error)]
#[error("failed to apply mode {mode}")]
pub struct ModeError {
    pub mode: Mode,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl ModeError {
    pub fn new(mode: Mode, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            mode,
            source: source.into(),
        }
    }
}

/// One device that failed during a broadcast.
#[derive(Debug, thiserror::Error)]
#[error("device {device} failed")]
pub struct DeviceFailure {
    pub device: DeviceId,
    #[source]
    pub error: ModeError,
}

/// Every failure collected while broadcasting a mode.
///
/// Produced only after all devices have been attempted; `failures` keeps
/// broadcast order.
#[derive(Debug, thiserror::Error)]
#[error("{count} of {attempted} deliveries of mode {mode} failed", count = .failures.len())]
pub struct BroadcastError {
    pub mode: Mode,
    pub attempted: usize,
    pub failures: Vec<DeviceFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_not_registered_into_top_level_error() {
        let err: SmartHomeError = NotRegisteredError { id: DeviceId::new() }.into();
        assert!(matches!(err, SmartHomeError::DeviceNotRegistered(_)));
    }

    #[test]
    fn should_display_invalid_state_kinds() {
        let err = InvalidStateError {
            expected: StateKind::Degrees,
            actual: StateKind::Bool,
        };
        assert_eq!(err.to_string(), "expected a degrees state, got boolean");
    }

    #[test]
    fn should_keep_mode_error_source() {
        let err = ModeError::new(Mode::Sleep, "motor jammed");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "motor jammed");
        assert_eq!(err.to_string(), "failed to apply mode Sleep");
    }

    #[test]
    fn should_summarise_broadcast_failures() {
        let err = BroadcastError {
            mode: Mode::Vacation,
            attempted: 3,
            failures: vec![DeviceFailure {
                device: DeviceId::new(),
                error: ModeError::new(Mode::Vacation, "offline"),
            }],
        };
        assert_eq!(err.to_string(), "1 of 3 deliveries of mode Vacation failed");
    }
}

//! Opaque device handles backed by UUIDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique handle for a [`Device`](crate::device::Device).
///
/// Handles are generated when a device is constructed and never change.
/// The controller addresses devices by handle only, so two devices with
/// identical state are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(uuid::Uuid);

impl Default for DeviceId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl DeviceId {
    /// Generate a new random handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DeviceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

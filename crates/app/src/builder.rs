//! Builder — accumulates devices, then freezes them into a [`SmartHome`].

use smarthome_domain::device::Device;

use crate::controller::SmartHome;

/// Step-by-step builder for [`SmartHome`].
///
/// Devices are registered in call order, which becomes the broadcast order.
/// No uniqueness check is made. [`build`](Self::build) takes a value
/// snapshot, so it can be called repeatedly and later registrations never
/// reach a controller that was already built.
#[derive(Debug, Default, Clone)]
pub struct SmartHomeBuilder {
    devices: Vec<Box<dyn Device>>,
}

impl SmartHomeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_device(mut self, device: impl Device + 'static) -> Self {
        self.devices.push(Box::new(device));
        self
    }

    /// Number of registrations so far, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Produce a controller over a snapshot of the registrations.
    ///
    /// Building with no devices is valid. Each call yields a fresh controller
    /// with the same order, handles and initial states.
    #[must_use]
    pub fn build(&self) -> SmartHome {
        tracing::debug!(registrations = self.devices.len(), "building controller");
        SmartHome::from_registrations(self.devices.clone())
    }
}

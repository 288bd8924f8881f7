//! Controller — owns the registered devices and coordinates them.
//!
//! The controller is a coordinator, not a state cache: every read goes
//! straight to the owning device.

use std::collections::HashMap;

use smarthome_domain::device::Device;
use smarthome_domain::error::{BroadcastError, DeviceFailure, NotRegisteredError, SmartHomeError};
use smarthome_domain::id::DeviceId;
use smarthome_domain::mode::Mode;
use smarthome_domain::state::StateValue;

use crate::builder::SmartHomeBuilder;

/// The home controller, produced by [`SmartHomeBuilder::build`].
///
/// The device set is closed: devices are never added or removed after
/// construction, only their state changes. Each device instance is stored
/// once; `broadcast_order` holds one slot per registration, so a device
/// registered twice receives every broadcast twice.
#[derive(Debug)]
pub struct SmartHome {
    devices: Vec<Box<dyn Device>>,
    index: HashMap<DeviceId, usize>,
    broadcast_order: Vec<usize>,
}

impl SmartHome {
    /// Create a builder for constructing a [`SmartHome`].
    #[must_use]
    pub fn builder() -> SmartHomeBuilder {
        SmartHomeBuilder::default()
    }

    /// The first registration of a handle owns the instance; later ones only
    /// add a broadcast slot.
    pub(crate) fn from_registrations(registrations: Vec<Box<dyn Device>>) -> Self {
        let mut devices = Vec::new();
        let mut index = HashMap::new();
        let mut broadcast_order = Vec::with_capacity(registrations.len());

        for device in registrations {
            let position = *index.entry(device.id()).or_insert_with(|| {
                devices.push(device);
                devices.len() - 1
            });
            broadcast_order.push(position);
        }

        Self {
            devices,
            index,
            broadcast_order,
        }
    }

    /// Overwrite the state of a registered device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::DeviceNotRegistered`] when `id` is not owned
    /// by this controller, or [`SmartHomeError::InvalidState`] when `value`
    /// has the wrong kind for the device. Nothing is mutated on error.
    #[tracing::instrument(skip(self))]
    pub fn set_device_state(
        &mut self,
        id: DeviceId,
        value: StateValue,
    ) -> Result<(), SmartHomeError> {
        let position = self.position(id)?;
        let device = &mut self.devices[position];
        device.set_state(value)?;
        tracing::debug!(device = device.name(), state = %value, "device state set");
        Ok(())
    }

    /// Broadcast a mode by name. See [`broadcast`](Self::broadcast).
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::ModeHandlerFailure`] if any device failed.
    pub fn send_message(&mut self, mode: &str) -> Result<(), SmartHomeError> {
        self.broadcast(&Mode::parse(mode))
    }

    /// Deliver `mode` to every registration, in registration order.
    ///
    /// A failing device never stops delivery to the devices after it; all
    /// failures are collected and returned together once the broadcast is
    /// complete.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::ModeHandlerFailure`] listing every device
    /// whose handler failed.
    #[tracing::instrument(skip(self, mode), fields(mode = %mode))]
    pub fn broadcast(&mut self, mode: &Mode) -> Result<(), SmartHomeError> {
        if !mode.is_known() {
            tracing::debug!("mode is not one of the built-in modes");
        }
        let mut failures = Vec::new();

        for &position in &self.broadcast_order {
            let device = &mut self.devices[position];
            match device.apply_mode(mode) {
                Ok(()) => {
                    tracing::debug!(device = device.name(), state = %device.state(), "mode applied");
                }
                Err(error) => {
                    tracing::warn!(device = device.name(), error = %error, "mode handler failed");
                    failures.push(DeviceFailure {
                        device: device.id(),
                        error,
                    });
                }
            }
        }

        if failures.is_empty() {
            return Ok(());
        }
        Err(BroadcastError {
            mode: mode.clone(),
            attempted: self.broadcast_order.len(),
            failures,
        }
        .into())
    }

    /// Read the current state of a registered device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::DeviceNotRegistered`] when `id` is unknown.
    pub fn state(&self, id: DeviceId) -> Result<StateValue, SmartHomeError> {
        let position = self.position(id)?;
        Ok(self.devices[position].state())
    }

    /// Borrow a registered device for read-only inspection.
    #[must_use]
    pub fn device(&self, id: DeviceId) -> Option<&(dyn Device + 'static)> {
        let position = *self.index.get(&id)?;
        Some(&*self.devices[position])
    }

    /// Whether `id` belongs to a device owned by this controller.
    #[must_use]
    pub fn contains(&self, id: DeviceId) -> bool {
        self.index.contains_key(&id)
    }

    /// Owned devices, each once, in first-registration order.
    pub fn devices(&self) -> impl Iterator<Item = &(dyn Device + 'static)> {
        self.devices.iter().map(|device| &**device)
    }

    /// Handles in the order a broadcast visits them, duplicates included.
    pub fn broadcast_order(&self) -> impl Iterator<Item = DeviceId> {
        self.broadcast_order
            .iter()
            .map(|&position| self.devices[position].id())
    }

    /// Number of distinct devices owned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    fn position(&self, id: DeviceId) -> Result<usize, NotRegisteredError> {
        self.index.get(&id).copied().ok_or(NotRegisteredError { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use smarthome_domain::device::{DeviceKind, Light, Lock, Thermostat};
    use smarthome_domain::error::{InvalidStateError, ModeError};

    /// Records the label of every device a mode reaches, optionally failing
    /// on delivery.
    #[derive(Debug, Clone)]
    struct ProbeDevice {
        id: DeviceId,
        label: &'static str,
        journal: Rc<RefCell<Vec<&'static str>>>,
        fails: bool,
    }

    impl ProbeDevice {
        fn new(label: &'static str, journal: &Rc<RefCell<Vec<&'static str>>>) -> Self {
            Self {
                id: DeviceId::new(),
                label,
                journal: Rc::clone(journal),
                fails: false,
            }
        }

        fn failing(mut self) -> Self {
            self.fails = true;
            self
        }
    }

    impl Device for ProbeDevice {
        fn id(&self) -> DeviceId {
            self.id
        }

        fn kind(&self) -> DeviceKind {
            DeviceKind::Light
        }

        fn name(&self) -> &str {
            self.label
        }

        fn state(&self) -> StateValue {
            StateValue::Bool(false)
        }

        fn set_state(&mut self, _value: StateValue) -> Result<(), InvalidStateError> {
            Ok(())
        }

        fn apply_mode(&mut self, mode: &Mode) -> Result<(), ModeError> {
            self.journal.borrow_mut().push(self.label);
            if self.fails {
                return Err(ModeError::new(mode.clone(), "relay stuck"));
            }
            Ok(())
        }

        fn boxed_clone(&self) -> Box<dyn Device> {
            Box::new(self.clone())
        }
    }

    fn journal() -> Rc<RefCell<Vec<&'static str>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn should_broadcast_in_registration_order() {
        let log = journal();
        let mut home = SmartHome::builder()
            .add_device(ProbeDevice::new("c", &log))
            .add_device(ProbeDevice::new("a", &log))
            .add_device(ProbeDevice::new("b", &log))
            .build();

        home.send_message("Sleep").unwrap();

        assert_eq!(*log.borrow(), vec!["c", "a", "b"]);
    }

    #[test]
    fn should_broadcast_in_registration_order_with_interleaved_duplicates() {
        let log = journal();
        let a = ProbeDevice::new("a", &log);
        let b = ProbeDevice::new("b", &log);
        let mut home = SmartHome::builder()
            .add_device(a.clone())
            .add_device(b.clone())
            .add_device(a.clone())
            .add_device(ProbeDevice::new("c", &log))
            .add_device(b.clone())
            .build();

        home.send_message("Vacation").unwrap();

        assert_eq!(*log.borrow(), vec!["a", "b", "a", "c", "b"]);
        assert_eq!(home.len(), 3);
        let order: Vec<DeviceId> = home.broadcast_order().collect();
        assert_eq!(order[..3], [a.id, b.id, a.id]);
        assert_eq!(order[4], b.id);
    }

    #[test]
    fn should_turn_light_off_on_sleep_and_stay_off_when_repeated() {
        let light = Light::new(true);
        let id = light.id();
        let mut home = SmartHome::builder().add_device(light).build();

        home.send_message("Sleep").unwrap();
        assert_eq!(home.state(id).unwrap(), StateValue::Bool(false));

        home.send_message("Sleep").unwrap();
        assert_eq!(home.state(id).unwrap(), StateValue::Bool(false));
    }

    #[test]
    fn should_only_change_targeted_device() {
        let light = Light::new(false);
        let other = Light::new(false);
        let thermostat = Thermostat::new(20);
        let (light_id, other_id, thermostat_id) = (light.id(), other.id(), thermostat.id());
        let mut home = SmartHome::builder()
            .add_device(light)
            .add_device(other)
            .add_device(thermostat)
            .build();

        home.set_device_state(light_id, StateValue::Bool(true)).unwrap();

        assert_eq!(home.state(light_id).unwrap(), StateValue::Bool(true));
        assert_eq!(home.state(other_id).unwrap(), StateValue::Bool(false));
        assert_eq!(home.state(thermostat_id).unwrap(), StateValue::Degrees(20));
    }

    #[test]
    fn should_leave_every_device_unchanged_for_unknown_mode() {
        let light = Light::new(true);
        let lock = Lock::new(false);
        let thermostat = Thermostat::new(23);
        let ids = [light.id(), lock.id(), thermostat.id()];
        let mut home = SmartHome::builder()
            .add_device(light)
            .add_device(lock)
            .add_device(thermostat)
            .build();

        home.send_message("Party").unwrap();

        assert_eq!(home.state(ids[0]).unwrap(), StateValue::Bool(true));
        assert_eq!(home.state(ids[1]).unwrap(), StateValue::Bool(false));
        assert_eq!(home.state(ids[2]).unwrap(), StateValue::Degrees(23));
    }

    #[test]
    fn should_reject_unregistered_device_without_mutating_anything() {
        let registered = Light::new(false);
        let registered_id = registered.id();
        let stranger = Light::new(false);
        let mut home = SmartHome::builder().add_device(registered).build();

        let result = home.set_device_state(stranger.id(), StateValue::Bool(true));

        assert!(matches!(
            result,
            Err(SmartHomeError::DeviceNotRegistered(NotRegisteredError { id })) if id == stranger.id()
        ));
        assert!(!stranger.is_on());
        assert_eq!(home.state(registered_id).unwrap(), StateValue::Bool(false));
    }

    #[test]
    fn should_report_unregistered_device_on_read() {
        let home = SmartHome::builder().build();
        assert!(matches!(
            home.state(DeviceId::new()),
            Err(SmartHomeError::DeviceNotRegistered(_))
        ));
        assert!(home.device(DeviceId::new()).is_none());
    }

    #[test]
    fn should_round_trip_thermostat_setpoint() {
        let thermostat = Thermostat::new(20);
        let id = thermostat.id();
        let mut home = SmartHome::builder().add_device(thermostat).build();

        home.set_device_state(id, StateValue::Degrees(21)).unwrap();
        home.set_device_state(id, StateValue::Degrees(21)).unwrap();

        assert_eq!(home.state(id).unwrap(), StateValue::Degrees(21));
    }

    #[test]
    fn should_reject_wrong_kind_of_state() {
        let thermostat = Thermostat::new(20);
        let id = thermostat.id();
        let mut home = SmartHome::builder().add_device(thermostat).build();

        let result = home.set_device_state(id, StateValue::Bool(true));

        assert!(matches!(result, Err(SmartHomeError::InvalidState(_))));
        assert_eq!(home.state(id).unwrap(), StateValue::Degrees(20));
    }

    #[test]
    fn should_apply_vacation_to_every_device() {
        let light = Light::new(false);
        let lock = Lock::new(false);
        let thermostat = Thermostat::new(20);
        let (light_id, lock_id, thermostat_id) = (light.id(), lock.id(), thermostat.id());
        let mut home = SmartHome::builder()
            .add_device(light)
            .add_device(lock)
            .add_device(thermostat)
            .build();

        home.send_message("Vacation").unwrap();

        assert_eq!(home.state(light_id).unwrap(), StateValue::Bool(false));
        assert_eq!(home.state(lock_id).unwrap(), StateValue::Bool(true));
        // Default eco setpoint.
        assert_eq!(home.state(thermostat_id).unwrap(), StateValue::Degrees(16));
    }

    #[test]
    fn should_keep_delivering_after_a_device_fails() {
        let log = journal();
        let broken = ProbeDevice::new("broken", &log).failing();
        let also_broken = ProbeDevice::new("also_broken", &log).failing();
        let broken_ids = [broken.id, also_broken.id];
        let light = Light::new(true);
        let light_id = light.id();
        let mut home = SmartHome::builder()
            .add_device(broken)
            .add_device(ProbeDevice::new("healthy", &log))
            .add_device(also_broken)
            .add_device(light)
            .build();

        let err = home.send_message("Sleep").unwrap_err();

        assert_eq!(*log.borrow(), vec!["broken", "healthy", "also_broken"]);
        assert_eq!(home.state(light_id).unwrap(), StateValue::Bool(false));
        let SmartHomeError::ModeHandlerFailure(broadcast) = err else {
            panic!("expected ModeHandlerFailure");
        };
        assert_eq!(broadcast.mode, Mode::Sleep);
        assert_eq!(broadcast.attempted, 4);
        let failed: Vec<DeviceId> = broadcast.failures.iter().map(|f| f.device).collect();
        assert_eq!(failed, broken_ids);
    }

    #[test]
    fn should_deliver_twice_to_device_registered_twice() {
        let log = journal();
        let probe = ProbeDevice::new("dup", &log);
        let home_builder = SmartHome::builder()
            .add_device(probe.clone())
            .add_device(probe.clone());
        let mut home = home_builder.build();

        home.send_message("Vacation").unwrap();

        assert_eq!(*log.borrow(), vec!["dup", "dup"]);
        assert_eq!(home.len(), 1);
        assert_eq!(home.broadcast_order().collect::<Vec<_>>(), vec![probe.id, probe.id]);
    }

    #[test]
    fn should_keep_first_instance_for_duplicate_handle() {
        let light = Light::new(true);
        let id = light.id();
        let mut switched_off = light.clone();
        switched_off.set_state(StateValue::Bool(false)).unwrap();

        let home = SmartHome::builder()
            .add_device(light)
            .add_device(switched_off)
            .build();

        assert_eq!(home.state(id).unwrap(), StateValue::Bool(true));
    }

    #[test]
    fn should_accept_broadcast_with_no_devices() {
        let mut home = SmartHome::builder().build();
        assert!(home.is_empty());
        assert!(home.send_message("Sleep").is_ok());
    }

    #[test]
    fn should_expose_devices_in_registration_order() {
        let light = Light::default().with_name("Hall");
        let lock = Lock::default().with_name("Front door");
        let home = SmartHome::builder().add_device(light).add_device(lock).build();

        let names: Vec<&str> = home.devices().map(|device| device.name()).collect();
        assert_eq!(names, vec!["Hall", "Front door"]);
    }
}

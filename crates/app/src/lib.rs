//! # smarthome-app
//!
//! Application layer — the device controller.
//!
//! ## Responsibilities
//! - [`SmartHomeBuilder`](builder::SmartHomeBuilder) accumulates devices in
//!   registration order and freezes them into a controller
//! - [`SmartHome`](controller::SmartHome) owns the devices, applies direct
//!   state changes, and broadcasts modes to every device in order
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only. Never imports adapter crates.

pub mod builder;
pub mod controller;

pub use builder::SmartHomeBuilder;
pub use controller::SmartHome;

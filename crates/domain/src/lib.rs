//! # smarthome-domain
//!
//! Pure domain model for the smarthome controller.
//!
//! ## Responsibilities
//! - Foundational types: typed device handles, state values, error conventions
//! - Define the **Device** contract (read state, set state, react to a mode)
//! - Provide the built-in devices: [`Light`](device::Light),
//!   [`Lock`](device::Lock) and [`Thermostat`](device::Thermostat)
//! - Define **Modes** (named broadcast commands such as `Sleep` or `Vacation`)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.

pub mod error;
pub mod id;
pub mod state;

pub mod device;
pub mod mode;

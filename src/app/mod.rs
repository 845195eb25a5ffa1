//! Application core — door logic orchestration, zero direct I/O.
//!
//! The [`service`] wraps the relay state machine and status indicator.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;

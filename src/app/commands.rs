//! Inbound commands to the door service.
//!
//! These represent requests from the accessory-protocol host (controller
//! writes, identify, link status) that the
//! [`DoorService`](super::service::DoorService) interprets and acts upon.

use crate::lock::LockState;

/// Whether the host accessory stack currently has a live controller link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connected,
}

/// Commands that external adapters can send into the door service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorCommand {
    /// The controller wrote a new lock target (runs the update routine).
    SetTarget(LockState),

    /// The target characteristic changed without going through the update
    /// routine.  Only the reported state follows it, on the next tick.
    SetTargetOutOfBand(LockState),

    /// The controller asked the accessory to identify itself.
    Identify,

    /// The host link came up or went down.
    SetLink(LinkState),
}

//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DoorService (domain)
//! ```
//!
//! Driven adapters (relay, status LED, clock, event sinks) implement these
//! traits.  The [`DoorService`](super::service::DoorService) and the
//! [`DoorActuator`](crate::lock::DoorActuator) consume them via generics,
//! so the state machine never touches hardware directly.

use embedded_hal::delay::DelayNs;

use crate::error::RelayError;

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → door strike)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the door strike relay.
///
/// Errors are reported but the domain treats them as non-fatal: the
/// relay is always commanded back to its released level regardless.
pub trait RelayPort {
    /// Drive the relay coil active.
    fn energise(&mut self) -> Result<(), RelayError>;

    /// Return the relay to its inactive (default) level.
    fn release(&mut self) -> Result<(), RelayError>;

    /// Whether the relay was last commanded active.
    fn is_energised(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → status LED)
// ───────────────────────────────────────────────────────────────

pub trait IndicatorPort {
    fn set_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: monotonic time → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock used to time deferred relay pulses.
pub trait ClockPort {
    /// Milliseconds since boot.  Must never go backwards.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`DoorEvent`](super::events::DoorEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::DoorEvent);
}

// ───────────────────────────────────────────────────────────────
// Combined hardware bound
// ───────────────────────────────────────────────────────────────

/// Everything the door service needs from the board in one borrow.
///
/// A single adapter satisfies all four so the service can read the clock,
/// sleep, and drive outputs without juggling overlapping borrows.
pub trait DoorHardware: RelayPort + IndicatorPort + ClockPort + DelayNs {}

impl<T> DoorHardware for T where T: RelayPort + IndicatorPort + ClockPort + DelayNs {}

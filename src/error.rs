//! Unified error types for the door opener firmware.
//!
//! The door state machine itself has no failure path: relay writes are
//! best-effort and logged.  These types exist so drivers and bootstrap code
//! can report what went wrong in a uniform, `Copy` shape.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The relay output could not be driven.
    Relay(RelayError),
    /// The status LED output could not be driven.
    Indicator,
    /// The control button input could not be read.
    Button { gpio: i32 },
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relay(e) => write!(f, "relay: {e}"),
            Self::Indicator => write!(f, "indicator: GPIO write failed"),
            Self::Button { gpio } => write!(f, "control button: GPIO{gpio} read failed"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Relay errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayError {
    /// The GPIO driver rejected the level change.
    GpioWriteFailed {
        /// GPIO number of the relay line.
        gpio: i32,
        /// Level that was being written.
        energise: bool,
    },
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed { gpio, energise } => write!(
                f,
                "GPIO{} write failed ({})",
                gpio,
                if *energise { "energise" } else { "release" }
            ),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<RelayError> for Error {
    fn from(e: RelayError) -> Self {
        Self::Relay(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

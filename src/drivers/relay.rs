//! Door strike relay driver.
//!
//! One digital output drives the relay coil.  The driver owns the pin,
//! knows which level energises the coil, and parks it at the released
//! level on construction.
//!
//! ## Safety contract
//!
//! The driver is a dumb actuator: it never times a pulse itself.  The
//! [`DoorActuator`](crate::lock::DoorActuator) guarantees every energise
//! is followed by a release.

use embedded_hal::digital::OutputPin;
use log::info;

use crate::app::ports::RelayPort;
use crate::error::RelayError;

pub struct RelayDriver<P: OutputPin> {
    pin: P,
    gpio: i32,
    active_high: bool,
    energised: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take ownership of `pin` and drive it to the released level.
    pub fn new(pin: P, gpio: i32, active_high: bool) -> Result<Self, RelayError> {
        let mut relay = Self {
            pin,
            gpio,
            active_high,
            energised: true,
        };
        relay.release()?;
        info!(
            "Relay: GPIO{} ready (active {})",
            gpio,
            if active_high { "HIGH" } else { "LOW" }
        );
        Ok(relay)
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    fn write(&mut self, energise: bool) -> Result<(), RelayError> {
        let high = energise == self.active_high;
        let res = if high { self.pin.set_high() } else { self.pin.set_low() };
        res.map_err(|_| RelayError::GpioWriteFailed {
            gpio: self.gpio,
            energise,
        })?;
        self.energised = energise;
        Ok(())
    }
}

impl<P: OutputPin> RelayPort for RelayDriver<P> {
    fn energise(&mut self) -> Result<(), RelayError> {
        self.write(true)
    }

    fn release(&mut self) -> Result<(), RelayError> {
        self.write(false)
    }

    fn is_energised(&self) -> bool {
        self.energised
    }
}

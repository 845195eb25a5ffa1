//! Single-colour status LED driver.
//!
//! Generic over any `embedded_hal` output pin: on ESP-IDF this is a
//! `PinDriver`, on host tests a recording mock.  Only level changes reach
//! the pin, so the pattern engine can be ticked at the full poll rate.

use embedded_hal::digital::OutputPin;

use crate::error::{Error, Result};

pub struct StatusLed<P: OutputPin> {
    pin: P,
    lit: Option<bool>,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, lit: None }
    }

    pub fn set(&mut self, on: bool) -> Result<()> {
        if self.lit == Some(on) {
            return Ok(());
        }
        let res = if on { self.pin.set_high() } else { self.pin.set_low() };
        res.map_err(|_| Error::Indicator)?;
        self.lit = Some(on);
        Ok(())
    }

    pub fn off(&mut self) -> Result<()> {
        self.set(false)
    }
}

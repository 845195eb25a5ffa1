//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the relay driver, the status LED, the clock, and a delay source,
//! exposing them through [`RelayPort`], [`IndicatorPort`], [`ClockPort`]
//! and `DelayNs`.  This is the only module in the system that touches
//! actual hardware; pins and delay are generic so host tests can plug in
//! mocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{ClockPort, IndicatorPort, RelayPort};
use crate::drivers::relay::RelayDriver;
use crate::drivers::status_led::StatusLed;
use crate::error::RelayError;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<R, L, C, D>
where
    R: OutputPin,
    L: OutputPin,
    C: ClockPort,
    D: DelayNs,
{
    relay: RelayDriver<R>,
    led: StatusLed<L>,
    clock: C,
    delay: D,
}

impl<R, L, C, D> HardwareAdapter<R, L, C, D>
where
    R: OutputPin,
    L: OutputPin,
    C: ClockPort,
    D: DelayNs,
{
    pub fn new(relay: RelayDriver<R>, led: StatusLed<L>, clock: C, delay: D) -> Self {
        Self {
            relay,
            led,
            clock,
            delay,
        }
    }

    /// Release the relay and darken the LED.
    pub fn all_off(&mut self) {
        if let Err(e) = self.relay.release() {
            warn!("all_off: {}", e);
        }
        if let Err(e) = self.led.off() {
            warn!("all_off: {}", e);
        }
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl<R, L, C, D> RelayPort for HardwareAdapter<R, L, C, D>
where
    R: OutputPin,
    L: OutputPin,
    C: ClockPort,
    D: DelayNs,
{
    fn energise(&mut self) -> Result<(), RelayError> {
        self.relay.energise()
    }

    fn release(&mut self) -> Result<(), RelayError> {
        self.relay.release()
    }

    fn is_energised(&self) -> bool {
        self.relay.is_energised()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<R, L, C, D> IndicatorPort for HardwareAdapter<R, L, C, D>
where
    R: OutputPin,
    L: OutputPin,
    C: ClockPort,
    D: DelayNs,
{
    fn set_indicator(&mut self, on: bool) {
        if let Err(e) = self.led.set(on) {
            warn!("Status LED: {}", e);
        }
    }
}

// ── ClockPort / DelayNs passthrough ───────────────────────────

impl<R, L, C, D> ClockPort for HardwareAdapter<R, L, C, D>
where
    R: OutputPin,
    L: OutputPin,
    C: ClockPort,
    D: DelayNs,
{
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

impl<R, L, C, D> DelayNs for HardwareAdapter<R, L, C, D>
where
    R: OutputPin,
    L: OutputPin,
    C: ClockPort,
    D: DelayNs,
{
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

//! Door strike state machine.
//!
//! ```text
//!            update(Unsecured)                 poll, c != t
//!   (c, t) ──────────────────▶ pulse ──▶ (S, S)    (c, t) ──────▶ (t, t)
//!   (c, t) ──────────────────────────▶ (S, S)
//!            update(Secured)
//! ```
//!
//! [`DoorActuator`] tracks the lock target written by the controller and
//! the current state reported back to it.  An open request energises the
//! relay for a fixed dwell; afterwards both values always read `Secured`,
//! so the controller shows the door locked after every interaction.

pub mod pulse;

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::app::events::DoorEvent;
use crate::app::ports::{EventSink, RelayPort};
use crate::config::{ActuatorConfig, PulseMode};

pub use pulse::PulseTimer;

// ---------------------------------------------------------------------------
// Lock state
// ---------------------------------------------------------------------------

/// Value of the lock target / current characteristics.
///
/// The accessory protocol encodes these as booleans: `true` = secured
/// (locked, strike engaged), `false` = unsecured (open requested).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockState {
    Unsecured,
    Secured,
}

impl LockState {
    pub const fn from_bool(secured: bool) -> Self {
        if secured { Self::Secured } else { Self::Unsecured }
    }

    pub const fn is_secured(self) -> bool {
        matches!(self, Self::Secured)
    }
}

impl From<bool> for LockState {
    fn from(secured: bool) -> Self {
        Self::from_bool(secured)
    }
}

impl From<LockState> for bool {
    fn from(state: LockState) -> Self {
        state.is_secured()
    }
}

/// Snapshot of both characteristics, as the controller sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockCharacteristics {
    pub current: LockState,
    pub target: LockState,
}

// ---------------------------------------------------------------------------
// Actuator
// ---------------------------------------------------------------------------

pub struct DoorActuator {
    target: LockState,
    current: LockState,
    dwell_ms: u32,
    mode: PulseMode,
    pulse: PulseTimer,
}

impl DoorActuator {
    /// Both characteristics start out `Secured`.
    pub fn new(dwell_ms: u32, mode: PulseMode) -> Self {
        Self {
            target: LockState::Secured,
            current: LockState::Secured,
            dwell_ms,
            mode,
            pulse: PulseTimer::new(),
        }
    }

    pub fn from_config(config: &ActuatorConfig) -> Self {
        Self::new(config.pulse_dwell_ms, config.pulse_mode)
    }

    /// Handle a controller write to the lock target.
    ///
    /// An `Unsecured` request pulses the relay.  Whatever was requested,
    /// both characteristics read `Secured` afterwards.  Always returns
    /// `true`; relay errors are logged and swallowed.
    pub fn update(
        &mut self,
        requested: LockState,
        hw: &mut (impl RelayPort + DelayNs),
        now_ms: u64,
        sink: &mut impl EventSink,
    ) -> bool {
        let open = !requested.is_secured();

        if open && self.pulse.is_armed() {
            debug!("Relay pulse already pending, open request ignored");
        } else if open {
            if let Err(e) = hw.energise() {
                warn!("Relay energise failed: {}", e);
            }
            self.current = self.target;
            sink.emit(&DoorEvent::DoorOpened {
                dwell_ms: self.dwell_ms,
            });

            match self.mode {
                PulseMode::Blocking => hw.delay_ms(self.dwell_ms),
                PulseMode::Deferred => {
                    self.pulse.arm(now_ms, self.dwell_ms);
                }
            }
        }

        match self.mode {
            PulseMode::Blocking => {
                release(hw);
                if open {
                    sink.emit(&DoorEvent::PulseEnded {
                        held_ms: u64::from(self.dwell_ms),
                    });
                }
            }
            // A pending pulse runs to its deadline; it cannot be cut short.
            PulseMode::Deferred if !self.pulse.is_armed() => release(hw),
            PulseMode::Deferred => {}
        }

        self.target = LockState::Secured;
        self.current = LockState::Secured;
        true
    }

    /// Host loop callback.  Never blocks.
    ///
    /// Releases the relay once a deferred pulse reaches its deadline, then
    /// brings the reported state in line with the target.  Returns `true`
    /// if the reported state changed.
    pub fn poll(
        &mut self,
        relay: &mut impl RelayPort,
        now_ms: u64,
        sink: &mut impl EventSink,
    ) -> bool {
        if let Some(held_ms) = self.pulse.take_expired(now_ms) {
            release(relay);
            sink.emit(&DoorEvent::PulseEnded { held_ms });
        }

        if self.target == self.current {
            return false;
        }
        self.current = self.target;
        sink.emit(&DoorEvent::StateReported {
            current: self.current,
        });
        true
    }

    /// Out-of-band write to the target; no actuation.
    pub fn set_target(&mut self, target: LockState) {
        self.target = target;
    }

    pub fn target(&self) -> LockState {
        self.target
    }

    pub fn current(&self) -> LockState {
        self.current
    }

    pub fn characteristics(&self) -> LockCharacteristics {
        LockCharacteristics {
            current: self.current,
            target: self.target,
        }
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse.is_armed()
    }

    pub fn pulse_deadline(&self) -> Option<u64> {
        self.pulse.deadline()
    }

    pub fn dwell_ms(&self) -> u32 {
        self.dwell_ms
    }

    pub fn mode(&self) -> PulseMode {
        self.mode
    }

    #[cfg(test)]
    pub(crate) fn force_current(&mut self, current: LockState) {
        self.current = current;
    }
}

fn release(relay: &mut impl RelayPort) {
    if let Err(e) = relay.release() {
        warn!("Relay release failed: {}", e);
    }
}

//! Status LED pattern engine with priority-based pattern selection.
//!
//! Generates the on/off level for the single-colour status LED.  The
//! door service calls `tick()` every host poll and feeds the result to
//! the [`IndicatorPort`](crate::app::ports::IndicatorPort).
//!
//! ## Priority hierarchy (highest first)
//!
//! 1. **Identify** — fast blink for a few seconds after a controller
//!    identify request
//! 2. **Pulse** — solid while the relay is energised
//! 3. **Link** — double blink while disconnected, solid once connected
//!
//! ## Pattern types
//!
//! | Pattern     | Description                           | Period |
//! |-------------|---------------------------------------|--------|
//! | Solid       | Constantly on                         | —      |
//! | FastBlink   | On/off square wave                    | 250 ms |
//! | DoubleBlink | Two 125 ms flashes, then 600 ms pause | 975 ms |

use crate::app::commands::LinkState;

/// How long the identify pattern runs.
pub const IDENTIFY_DURATION_MS: u32 = 3_000;

/// Pattern identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternId {
    Solid,
    FastBlink,
    DoubleBlink,
}

/// Status LED pattern engine.  Stack-allocated, no heap.
pub struct IndicatorEngine {
    phase_ms: u32,
    /// `None` until the first tick.
    active: Option<PatternId>,
    link: LinkState,
    pulse_active: bool,
    identify_remaining_ms: u32,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self {
            phase_ms: 0,
            active: None,
            link: LinkState::Disconnected,
            pulse_active: false,
            identify_remaining_ms: 0,
        }
    }

    /// Set the link-layer pattern source (lowest priority).
    pub fn set_link(&mut self, link: LinkState) {
        self.link = link;
    }

    pub fn link(&self) -> LinkState {
        self.link
    }

    /// Mark the relay pulse as active or finished.
    pub fn set_pulse_active(&mut self, active: bool) {
        self.pulse_active = active;
    }

    /// Start (or restart) the identify pattern.
    pub fn start_identify(&mut self) {
        self.identify_remaining_ms = IDENTIFY_DURATION_MS;
    }

    pub fn is_identifying(&self) -> bool {
        self.identify_remaining_ms > 0
    }

    /// Advance the pattern phase and return the LED level.
    /// `delta_ms` is the time since the last call.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        let selected = self.select_active();
        if self.active != Some(selected) {
            self.phase_ms = 0;
            self.active = Some(selected);
        } else {
            self.phase_ms = self.phase_ms.wrapping_add(delta_ms);
        }

        let on = Self::generate(selected, self.phase_ms);
        self.identify_remaining_ms = self.identify_remaining_ms.saturating_sub(delta_ms);
        on
    }

    fn select_active(&self) -> PatternId {
        if self.identify_remaining_ms > 0 {
            PatternId::FastBlink
        } else if self.pulse_active {
            PatternId::Solid
        } else {
            match self.link {
                LinkState::Connected => PatternId::Solid,
                LinkState::Disconnected => PatternId::DoubleBlink,
            }
        }
    }

    fn generate(pattern: PatternId, phase_ms: u32) -> bool {
        match pattern {
            PatternId::Solid => true,
            PatternId::FastBlink => (phase_ms % 250) < 125,
            PatternId::DoubleBlink => {
                let cycle = phase_ms % 975;
                cycle < 125 || (250..375).contains(&cycle)
            }
        }
    }
}

//! Deadline bookkeeping for a deferred relay pulse.
//!
//! Instead of sleeping through the dwell, the actuator arms a
//! [`PulseTimer`] when the relay is energised and the host loop polls it.
//! Times are monotonic milliseconds from the [`ClockPort`].
//!
//! [`ClockPort`]: crate::app::ports::ClockPort

/// An armed-or-idle relay pulse deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PulseTimer {
    /// When the relay was first energised for the pending pulse.
    started_ms: u64,
    /// When the relay must be released.  `None` = idle.
    deadline_ms: Option<u64>,
}

impl PulseTimer {
    pub const fn new() -> Self {
        Self {
            started_ms: 0,
            deadline_ms: None,
        }
    }

    /// Arm the timer for `dwell_ms` from `now_ms`.
    ///
    /// A pending pulse keeps its deadline; the relay hold never exceeds one
    /// dwell.  Returns `false` if a pulse was already pending.
    pub fn arm(&mut self, now_ms: u64, dwell_ms: u32) -> bool {
        if self.deadline_ms.is_some() {
            return false;
        }
        self.started_ms = now_ms;
        self.deadline_ms = Some(now_ms.saturating_add(u64::from(dwell_ms)));
        true
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// If the deadline has been reached, disarm and return how long the
    /// relay was held.
    pub fn take_expired(&mut self, now_ms: u64) -> Option<u64> {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                Some(now_ms.saturating_sub(self.started_ms))
            }
            _ => None,
        }
    }
}

//! Accessory characteristic bridge.
//!
//! The seam between the host accessory-protocol stack and the door core.
//! The stack pushes controller writes in through the `on_*` callbacks and
//! reads the published characteristics back out; the main loop drains the
//! queued commands into the [`DoorService`](crate::app::service::DoorService)
//! and publishes the snapshot after every tick.
//!
//! ```text
//!  accessory stack ──on_target_write──▶ queue ──next_command──▶ DoorService
//!  control button  ──on_button────────▶ queue
//!  accessory stack ◀──characteristics── snapshot ◀──publish──── main loop
//! ```

use heapless::Deque;
use log::warn;

use crate::app::commands::{DoorCommand, LinkState};
use crate::drivers::button::ButtonEvent;
use crate::lock::{LockCharacteristics, LockState};

/// Pending controller requests the bridge holds between polls.
pub const COMMAND_QUEUE_CAP: usize = 8;

pub struct AccessoryBridge {
    pending: Deque<DoorCommand, COMMAND_QUEUE_CAP>,
    published: LockCharacteristics,
    changed: bool,
    dropped: u32,
}

impl Default for AccessoryBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessoryBridge {
    pub fn new() -> Self {
        Self {
            pending: Deque::new(),
            published: LockCharacteristics {
                current: LockState::Secured,
                target: LockState::Secured,
            },
            changed: false,
            dropped: 0,
        }
    }

    // ── Stack → door ──────────────────────────────────────────

    /// The controller wrote the lock target characteristic.
    pub fn on_target_write(&mut self, secured: bool) {
        self.enqueue(DoorCommand::SetTarget(LockState::from_bool(secured)));
    }

    /// The target changed without a controller write (e.g. restored by the
    /// stack).  Only the reported state follows.
    pub fn on_target_restored(&mut self, secured: bool) {
        self.enqueue(DoorCommand::SetTargetOutOfBand(LockState::from_bool(secured)));
    }

    pub fn on_identify(&mut self) {
        self.enqueue(DoorCommand::Identify);
    }

    pub fn on_link(&mut self, link: LinkState) {
        self.enqueue(DoorCommand::SetLink(link));
    }

    /// A local button gesture.  A short press opens the door the same way
    /// a controller write does; a long press runs the identify pattern.
    pub fn on_button(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::ShortPress => self.on_target_write(false),
            ButtonEvent::LongPress => self.on_identify(),
        }
    }

    /// Next queued command, oldest first.
    pub fn next_command(&mut self) -> Option<DoorCommand> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Commands discarded because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    // ── Door → stack ──────────────────────────────────────────

    /// Store the latest characteristic values.
    pub fn publish(&mut self, snapshot: LockCharacteristics) {
        if snapshot != self.published {
            self.published = snapshot;
            self.changed = true;
        }
    }

    /// Values for the controller to read.
    pub fn characteristics(&self) -> LockCharacteristics {
        self.published
    }

    /// Whether the published values changed since the last call.  The
    /// stack uses this to decide when to send notifications.
    pub fn take_changed(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }

    fn enqueue(&mut self, cmd: DoorCommand) {
        if self.pending.is_full() {
            if let Some(oldest) = self.pending.pop_front() {
                warn!("Accessory queue full, dropping {:?}", oldest);
            }
            self.dropped = self.dropped.saturating_add(1);
        }
        // Cannot fail: a slot was freed above if the queue was full.
        let _ = self.pending.push_back(cmd);
    }
}

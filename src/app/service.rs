//! Door service — the hexagonal core.
//!
//! [`DoorService`] owns the relay state machine and the status indicator
//! engine.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  DoorCommand ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │      DoorService       │
//!  DoorHardware ◀──│ DoorActuator·Indicator │
//!                  └────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::ActuatorConfig;
use crate::drivers::led_patterns::IndicatorEngine;
use crate::lock::{DoorActuator, LockCharacteristics, LockState};

use super::commands::DoorCommand;
use super::events::DoorEvent;
use super::ports::{DoorHardware, EventSink};

/// Accessory-information strings the host stack advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessoryInfo<'a> {
    pub name: &'a str,
    pub manufacturer: &'a str,
    pub model: &'a str,
}

// ───────────────────────────────────────────────────────────────
// DoorService
// ───────────────────────────────────────────────────────────────

/// The door service orchestrates all domain logic.
pub struct DoorService {
    actuator: DoorActuator,
    indicator: IndicatorEngine,
    config: ActuatorConfig,
    last_tick_ms: Option<u64>,
    tick_count: u64,
}

impl DoorService {
    /// Construct the service from configuration.
    ///
    /// Does **not** announce itself — call [`start`](Self::start) next.
    pub fn new(config: ActuatorConfig) -> Self {
        Self {
            actuator: DoorActuator::from_config(&config),
            indicator: IndicatorEngine::new(),
            config,
            last_tick_ms: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        let c = self.actuator.characteristics();
        sink.emit(&DoorEvent::Started {
            current: c.current,
            target: c.target,
        });
        info!(
            "DoorService started ('{}', dwell {}ms, {:?})",
            self.config.accessory_name,
            self.actuator.dwell_ms(),
            self.actuator.mode()
        );
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an inbound command from the accessory bridge.
    ///
    /// Returns the success flag reported back to the controller, which
    /// is always `true`.
    pub fn handle_command(
        &mut self,
        cmd: DoorCommand,
        hw: &mut impl DoorHardware,
        sink: &mut impl EventSink,
    ) -> bool {
        match cmd {
            DoorCommand::SetTarget(requested) => {
                debug!("Controller target write: {:?}", requested);
                if !requested.is_secured() {
                    self.indicator.set_pulse_active(true);
                    hw.set_indicator(true);
                }
                let now = hw.now_ms();
                let ok = self.actuator.update(requested, hw, now, sink);
                self.indicator.set_pulse_active(self.actuator.is_pulsing());
                ok
            }
            DoorCommand::SetTargetOutOfBand(target) => {
                self.actuator.set_target(target);
                true
            }
            DoorCommand::Identify => {
                self.indicator.start_identify();
                sink.emit(&DoorEvent::Identify);
                true
            }
            DoorCommand::SetLink(link) => {
                if link != self.indicator.link() {
                    self.indicator.set_link(link);
                    sink.emit(&DoorEvent::LinkChanged(link));
                }
                true
            }
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Host loop callback: finish any due relay pulse, reconcile the
    /// reported state, and refresh the status LED.
    ///
    /// Returns the characteristic values to publish.
    pub fn tick(
        &mut self,
        hw: &mut impl DoorHardware,
        sink: &mut impl EventSink,
    ) -> LockCharacteristics {
        self.tick_count += 1;
        let now = hw.now_ms();

        self.actuator.poll(hw, now, sink);
        self.indicator.set_pulse_active(self.actuator.is_pulsing());

        let delta_ms = self
            .last_tick_ms
            .map_or(0, |last| u32::try_from(now.saturating_sub(last)).unwrap_or(u32::MAX));
        self.last_tick_ms = Some(now);
        hw.set_indicator(self.indicator.tick(delta_ms));

        self.actuator.characteristics()
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn characteristics(&self) -> LockCharacteristics {
        self.actuator.characteristics()
    }

    pub fn target(&self) -> LockState {
        self.actuator.target()
    }

    pub fn current(&self) -> LockState {
        self.actuator.current()
    }

    pub fn is_pulsing(&self) -> bool {
        self.actuator.is_pulsing()
    }

    pub fn is_identifying(&self) -> bool {
        self.indicator.is_identifying()
    }

    pub fn accessory_info(&self) -> AccessoryInfo<'_> {
        AccessoryInfo {
            name: &self.config.accessory_name,
            manufacturer: &self.config.manufacturer,
            model: &self.config.model,
        }
    }

    /// Total host ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }
}

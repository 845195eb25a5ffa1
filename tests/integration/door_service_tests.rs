//! Integration tests for the DoorService → DoorActuator → relay pipeline.
//!
//! These run on the host and drive the service exactly as the host loop
//! does: commands in, `tick()` on every poll, relay edges timestamped by
//! the mock clock.

use super::mock_hw::{LogSink, MockHardware, RelayLevel};

use dooropener::app::commands::{DoorCommand, LinkState};
use dooropener::app::events::DoorEvent;
use dooropener::app::service::DoorService;
use dooropener::config::{ActuatorConfig, PulseMode};
use dooropener::lock::{LockCharacteristics, LockState};

const SECURED: LockCharacteristics = LockCharacteristics {
    current: LockState::Secured,
    target: LockState::Secured,
};

fn make_door(mode: PulseMode) -> (DoorService, MockHardware, LogSink) {
    let config = ActuatorConfig {
        pulse_mode: mode,
        ..ActuatorConfig::default()
    };
    let mut door = DoorService::new(config);
    let hw = MockHardware::new();
    let mut sink = LogSink::new();
    door.start(&mut sink);
    (door, hw, sink)
}

/// Tick every poll interval until `until_ms` on the mock clock.
fn run_until(door: &mut DoorService, hw: &mut MockHardware, sink: &mut LogSink, until_ms: u64) {
    let step = u64::from(door.config().poll_interval_ms);
    while hw.clock_ms < until_ms {
        hw.advance(step);
        door.tick(hw, sink);
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn starts_secured_and_announces() {
    let (door, hw, sink) = make_door(PulseMode::Deferred);
    assert_eq!(door.characteristics(), SECURED);
    assert_eq!(
        sink.events,
        vec![DoorEvent::Started {
            current: LockState::Secured,
            target: LockState::Secured,
        }]
    );
    assert!(hw.relay_log.is_empty());
}

// ── Open request, blocking dwell ──────────────────────────────

#[test]
fn blocking_open_pulses_for_exact_dwell() {
    let (mut door, mut hw, mut sink) = make_door(PulseMode::Blocking);

    let ok = door.handle_command(DoorCommand::SetTarget(LockState::Unsecured), &mut hw, &mut sink);

    assert!(ok);
    assert!(!hw.relay_on, "relay must be released before update returns");
    assert_eq!(hw.pulse_windows(), vec![(0, 2000)]);
    assert_eq!(hw.slept_ms, 2000);
    assert_eq!(door.characteristics(), SECURED);
    assert_eq!(sink.count(|e| matches!(e, DoorEvent::DoorOpened { .. })), 1);
}

// ── Open request, deferred dwell ──────────────────────────────

#[test]
fn deferred_open_releases_after_dwell_without_blocking() {
    let (mut door, mut hw, mut sink) = make_door(PulseMode::Deferred);
    hw.advance(500);

    door.handle_command(DoorCommand::SetTarget(LockState::Unsecured), &mut hw, &mut sink);

    assert_eq!(hw.slept_ms, 0, "deferred update must not sleep");
    assert!(hw.relay_on);
    assert!(door.is_pulsing());
    assert_eq!(door.characteristics(), SECURED);

    run_until(&mut door, &mut hw, &mut sink, 2480);
    assert!(hw.relay_on, "still inside the dwell");

    run_until(&mut door, &mut hw, &mut sink, 2600);
    assert!(!hw.relay_on);
    assert!(!door.is_pulsing());

    let windows = hw.pulse_windows();
    assert_eq!(windows.len(), 1);
    let (start, end) = windows[0];
    assert_eq!(start, 500);
    assert_eq!(end - start, 2000, "20 ms polling lands exactly on the deadline");
    assert!(sink.events.contains(&DoorEvent::PulseEnded { held_ms: 2000 }));
}

#[test]
fn second_open_during_pulse_does_not_extend_it() {
    let (mut door, mut hw, mut sink) = make_door(PulseMode::Deferred);

    door.handle_command(DoorCommand::SetTarget(LockState::Unsecured), &mut hw, &mut sink);
    run_until(&mut door, &mut hw, &mut sink, 1000);
    assert!(door.handle_command(DoorCommand::SetTarget(LockState::Unsecured), &mut hw, &mut sink));
    run_until(&mut door, &mut hw, &mut sink, 3500);

    assert_eq!(hw.pulse_windows(), vec![(0, 2000)]);
    assert_eq!(sink.count(|e| matches!(e, DoorEvent::DoorOpened { .. })), 1);
    assert_eq!(sink.count(|e| matches!(e, DoorEvent::PulseEnded { .. })), 1);
}

#[test]
fn repeated_opens_never_hold_the_relay_past_one_dwell() {
    let (mut door, mut hw, mut sink) = make_door(PulseMode::Deferred);
    let dwell = u64::from(door.config().pulse_dwell_ms);

    for _ in 0..10 {
        door.handle_command(DoorCommand::SetTarget(LockState::Unsecured), &mut hw, &mut sink);
        let until = hw.clock_ms + 1500;
        run_until(&mut door, &mut hw, &mut sink, until);
    }
    let until = hw.clock_ms + 2500;
    run_until(&mut door, &mut hw, &mut sink, until);

    assert!(!hw.relay_on);
    let windows = hw.pulse_windows();
    assert_eq!(windows, vec![(0, 2000), (3000, 5000), (6000, 8000), (9000, 11000), (12000, 14000)]);
    assert!(windows.iter().all(|(start, end)| end - start <= dwell));
}

// ── Lock request ──────────────────────────────────────────────

#[test]
fn secured_request_never_energises_relay() {
    for mode in [PulseMode::Blocking, PulseMode::Deferred] {
        let (mut door, mut hw, mut sink) = make_door(mode);

        assert!(door.handle_command(DoorCommand::SetTarget(LockState::Secured), &mut hw, &mut sink));
        run_until(&mut door, &mut hw, &mut sink, 3000);

        assert_eq!(hw.pulses(), 0, "{:?}", mode);
        assert!(hw.relay_log.iter().all(|e| e.level == RelayLevel::Released));
        assert_eq!(door.characteristics(), SECURED);
    }
}

// ── Host loop reconciliation ──────────────────────────────────

#[test]
fn tick_converges_current_to_target_without_relay_action() {
    let (mut door, mut hw, mut sink) = make_door(PulseMode::Deferred);

    // Reach (current=Unsecured, target=Secured) through out-of-band writes.
    door.handle_command(DoorCommand::SetTargetOutOfBand(LockState::Unsecured), &mut hw, &mut sink);
    door.tick(&mut hw, &mut sink);
    door.handle_command(DoorCommand::SetTargetOutOfBand(LockState::Secured), &mut hw, &mut sink);
    assert_eq!(door.current(), LockState::Unsecured);
    assert_eq!(door.target(), LockState::Secured);

    let snapshot = door.tick(&mut hw, &mut sink);

    assert_eq!(snapshot, SECURED);
    assert!(hw.relay_log.is_empty(), "reconciliation must not touch the relay");
    assert_eq!(
        sink.count(|e| matches!(e, DoorEvent::StateReported { .. })),
        2
    );
}

#[test]
fn tick_is_idempotent_when_in_sync() {
    let (mut door, mut hw, mut sink) = make_door(PulseMode::Deferred);
    let before = sink.events.len();

    for _ in 0..5 {
        assert_eq!(door.tick(&mut hw, &mut sink), SECURED);
    }

    assert_eq!(sink.events.len(), before);
    assert!(hw.relay_log.is_empty());
    assert_eq!(door.tick_count(), 5);
}

#[test]
fn update_forces_secured_even_after_out_of_band_unsecure() {
    let (mut door, mut hw, mut sink) = make_door(PulseMode::Deferred);
    door.handle_command(DoorCommand::SetTargetOutOfBand(LockState::Unsecured), &mut hw, &mut sink);
    door.tick(&mut hw, &mut sink);

    door.handle_command(DoorCommand::SetTarget(LockState::Secured), &mut hw, &mut sink);

    assert_eq!(door.characteristics(), SECURED);
    assert_eq!(hw.pulses(), 0);
}

// ── Status LED ────────────────────────────────────────────────

#[test]
fn led_is_solid_during_pulse_and_double_blinks_after() {
    let (mut door, mut hw, mut sink) = make_door(PulseMode::Deferred);
    door.tick(&mut hw, &mut sink);

    door.handle_command(DoorCommand::SetTarget(LockState::Unsecured), &mut hw, &mut sink);
    let mark = hw.led_log.len();
    run_until(&mut door, &mut hw, &mut sink, 1990);
    assert!(hw.led_on);
    assert!(
        hw.led_log[mark..].iter().all(|(on, _)| *on),
        "LED must stay lit for the whole pulse"
    );

    run_until(&mut door, &mut hw, &mut sink, 3500);
    assert!(hw.led_log.iter().any(|(on, at)| !*on && *at > 2000));
}

#[test]
fn identify_blinks_then_returns_to_link_pattern() {
    let (mut door, mut hw, mut sink) = make_door(PulseMode::Deferred);
    door.handle_command(DoorCommand::SetLink(LinkState::Connected), &mut hw, &mut sink);
    door.handle_command(DoorCommand::Identify, &mut hw, &mut sink);
    assert!(door.is_identifying());

    run_until(&mut door, &mut hw, &mut sink, 1000);
    let toggles = hw.led_log.len();
    assert!(toggles >= 6, "expected fast blinking, saw {} edges", toggles);

    run_until(&mut door, &mut hw, &mut sink, 3100);
    assert!(!door.is_identifying());
    run_until(&mut door, &mut hw, &mut sink, 4000);
    assert!(hw.led_on, "connected link shows solid");
    assert!(sink.events.contains(&DoorEvent::Identify));
    assert!(sink.events.contains(&DoorEvent::LinkChanged(LinkState::Connected)));
}

#[test]
fn repeated_link_state_is_not_re_announced() {
    let (mut door, mut hw, mut sink) = make_door(PulseMode::Deferred);
    door.handle_command(DoorCommand::SetLink(LinkState::Connected), &mut hw, &mut sink);
    door.handle_command(DoorCommand::SetLink(LinkState::Connected), &mut hw, &mut sink);
    assert_eq!(sink.count(|e| matches!(e, DoorEvent::LinkChanged(_))), 1);
}

//! Door Opener Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                     │
//! │                                                            │
//! │  HardwareAdapter            LogEventSink   AccessoryBridge │
//! │  (Relay+Indicator+Clock)    (EventSink)    (stack+button)  │
//! │                                                            │
//! │  ────────────── Port Trait Boundary ───────────────        │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │          DoorService (pure logic)                │      │
//! │  │  DoorActuator · IndicatorEngine                  │      │
//! │  └──────────────────────────────────────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Result, bail};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info};

use dooropener::adapters::accessory::AccessoryBridge;
use dooropener::adapters::hardware::HardwareAdapter;
use dooropener::adapters::log_sink::LogEventSink;
use dooropener::adapters::time::Esp32TimeAdapter;
use dooropener::app::ports::ClockPort;
use dooropener::app::service::DoorService;
use dooropener::config::ActuatorConfig;
use dooropener::drivers::button::ButtonDriver;
use dooropener::drivers::relay::RelayDriver;
use dooropener::drivers::status_led::StatusLed;
use dooropener::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("DoorOpener v{} booting", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = ActuatorConfig::default();
    config.validate()?;
    if config.relay_gpio != pins::RELAY_GPIO || config.status_led_gpio != pins::STATUS_LED_GPIO {
        bail!("config pins do not match the board wiring in pins.rs");
    }

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let relay_pin = PinDriver::output(peripherals.pins.gpio14)?;
    let led_pin = PinDriver::output(peripherals.pins.gpio2)?;
    let mut button_pin = PinDriver::input(peripherals.pins.gpio13)?;
    button_pin.set_pull(Pull::Up)?;

    // ── 4. Construct adapters ─────────────────────────────────
    let relay = RelayDriver::new(relay_pin, config.relay_gpio, config.relay_active_high)?;
    let mut log_sink = LogEventSink::new(relay.gpio());
    let mut button = ButtonDriver::new(button_pin, pins::CONTROL_BUTTON_GPIO);
    let mut hw = HardwareAdapter::new(
        relay,
        StatusLed::new(led_pin),
        Esp32TimeAdapter::new(),
        FreeRtos,
    );

    // The accessory-protocol stack attaches to this bridge: it pushes
    // controller writes in and reads the published characteristics back.
    let mut bridge = AccessoryBridge::new();

    // ── 5. Construct door service ─────────────────────────────
    let mut door = DoorService::new(config.clone());
    door.start(&mut log_sink);
    let accessory = door.accessory_info();
    info!(
        "Accessory: '{}' by {} ({})",
        accessory.name, accessory.manufacturer, accessory.model
    );

    info!("System ready. Entering host loop.");

    // ── 6. Host loop ──────────────────────────────────────────
    loop {
        match button.tick(hw.now_ms()) {
            Ok(Some(gesture)) => {
                info!("Control button: {:?}", gesture);
                bridge.on_button(gesture);
            }
            Ok(None) => {}
            Err(e) => {
                error!("{}; releasing outputs", e);
                hw.all_off();
                bail!(e);
            }
        }

        while let Some(cmd) = bridge.next_command() {
            door.handle_command(cmd, &mut hw, &mut log_sink);
        }

        let snapshot = door.tick(&mut hw, &mut log_sink);
        bridge.publish(snapshot);

        FreeRtos::delay_ms(config.poll_interval_ms);
    }
}
